use crate::canvas::CanvasClient;
use crate::connection::Transport;
use crate::report::{CourseReport, ResultRow, RowScores};
use crate::reporter::ErrorReporter;
use crate::rubric::aggregate;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ID_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]+").unwrap());

/// Splits free text into course IDs.
///
/// Tokens may be separated by commas, spaces or newlines. Anything that is
/// not made of ASCII digits is reported as a warning and skipped.
pub fn parse_course_ids(input: &str, reporter: &dyn ErrorReporter) -> Vec<u64> {
    let tokens: Vec<&str> = ID_SEPARATORS
        .split(input.trim())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        reporter.report("Please enter at least one course ID.");
        return Vec::new();
    }

    tokens
        .into_iter()
        .filter_map(|token| {
            let id = token
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| token.parse::<u64>().ok())
                .flatten();
            if id.is_none() {
                reporter.warn(&format!("The ID '{}' is not a valid course ID.", token));
            }
            id
        })
        .collect()
}

/// Walks courses and their assignments, producing one report per course.
pub struct RubricAnalyzer<'a, T: Transport> {
    client: &'a CanvasClient<T>,
}

impl<'a, T: Transport> RubricAnalyzer<'a, T> {
    pub fn new(client: &'a CanvasClient<T>) -> Self {
        RubricAnalyzer { client }
    }

    /// Parses `input` and hands each finished course to `on_course`, in input order.
    pub fn analyze_input_with<F>(&self, input: &str, mut on_course: F)
    where
        F: FnMut(CourseReport),
    {
        for course_id in parse_course_ids(input, self.client.reporter()) {
            on_course(self.analyze_course(course_id));
        }
    }

    pub fn analyze_input(&self, input: &str) -> Vec<CourseReport> {
        let mut reports = Vec::new();
        self.analyze_input_with(input, |report| reports.push(report));
        reports
    }

    /// Course, account, assignment list, then one detail request per assignment.
    pub fn analyze_course(&self, course_id: u64) -> CourseReport {
        let link_url = &self.client.credentials().url_links;
        info!("Analyzing course {}", course_id);

        let course = self.client.fetch_course(course_id);
        let account_id = course.as_ref().and_then(|course| course.account_id);
        let account = account_id.and_then(|id| self.client.fetch_account(id));

        let rows = match self.client.fetch_assignments(course_id) {
            Some(entries) if !entries.is_empty() => entries
                .into_iter()
                .map(|entry| self.analyze_assignment(course_id, entry))
                .collect(),
            _ => vec![ResultRow::no_assignments()],
        };

        CourseReport {
            course_id,
            course,
            account,
            course_link: format!("{}/courses/{}", link_url, course_id),
            account_link: account_id.map(|id| format!("{}/accounts/{}", link_url, id)),
            rows,
        }
    }

    fn analyze_assignment(&self, course_id: u64, entry: Value) -> ResultRow {
        let Some(summary) = self.client.decode_assignment_summary(course_id, entry) else {
            return ResultRow::fetch_error();
        };
        let Some(assignment) = self.client.fetch_assignment(course_id, summary.id) else {
            return ResultRow::fetch_error();
        };
        let Some(rubric) = assignment.rubric() else {
            return ResultRow::no_rubric(assignment.name.as_deref());
        };

        let settings = assignment.rubric_settings.as_ref();
        let points_possible = settings
            .and_then(|s| s.points_possible)
            .map_or(0, |points| points.trunc() as i64);
        let totals = aggregate(rubric);

        ResultRow::scored(
            format!(
                "{}/courses/{}/assignments/{}",
                self.client.credentials().url_links,
                course_id,
                summary.id
            ),
            assignment.name.as_deref(),
            settings.and_then(|s| s.title.as_deref()),
            RowScores::new(points_possible, &totals),
        )
    }
}
