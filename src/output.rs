//! Terminal rendering of course reports.

use crate::report::{CourseReport, ResultRow, ERROR_FETCHING, LINK_LABEL, NOT_AVAILABLE};
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Link")]
    link: String,
    #[tabled(rename = "Assignment Name")]
    assignment_name: String,
    #[tabled(rename = "Rúbrica")]
    rubric_title: String,
    #[tabled(rename = "Puntos Totales")]
    points_possible: String,
    #[tabled(rename = "Puntos Destacado")]
    destacado: String,
    #[tabled(rename = "Puntos Habilitado")]
    habilitado: String,
    #[tabled(rename = "Puntos En desarrollo")]
    en_desarrollo: String,
    #[tabled(rename = "Puntos No logrado")]
    no_logrado: String,
}

/// Link cell: an OSC 8 terminal hyperlink labelled `Ver Tarea`, or the
/// label followed by the plain URL.
fn link_cell(url: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, LINK_LABEL)
    } else {
        format!("{}: {}", LINK_LABEL, url)
    }
}

impl TableRow {
    fn new(row: &ResultRow, hyperlinks: bool) -> Self {
        let link = match &row.link {
            Some(url) => link_cell(url, hyperlinks),
            None => NOT_AVAILABLE.to_string(),
        };
        let unavailable = || ERROR_FETCHING.to_string();
        match &row.scores {
            Some(scores) => TableRow {
                link,
                assignment_name: row.assignment_name.clone(),
                rubric_title: row.rubric_title.clone(),
                points_possible: scores.points_possible.to_string(),
                destacado: scores.destacado.to_string(),
                habilitado: scores.habilitado.to_string(),
                en_desarrollo: scores.en_desarrollo.to_string(),
                no_logrado: scores.no_logrado.to_string(),
            },
            None => TableRow {
                link,
                assignment_name: row.assignment_name.clone(),
                rubric_title: row.rubric_title.clone(),
                points_possible: unavailable(),
                destacado: unavailable(),
                habilitado: unavailable(),
                en_desarrollo: unavailable(),
                no_logrado: unavailable(),
            },
        }
    }
}

/// Course header, account header and the assignment table.
///
/// Links become terminal hyperlinks whenever coloured output is enabled.
pub fn render_course(report: &CourseReport) -> String {
    render_course_with(report, colored::control::SHOULD_COLORIZE.should_colorize())
}

pub fn render_course_with(report: &CourseReport, hyperlinks: bool) -> String {
    let course_name = report
        .course
        .as_ref()
        .and_then(|course| course.name.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let sis_id = report
        .course
        .as_ref()
        .and_then(|course| course.sis_course_id.as_deref())
        .unwrap_or("-");

    let mut out = format!(
        "{} ({}) [{}] - {}\n",
        course_name.bold(),
        report.course_id,
        report.course_link,
        sis_id
    );

    if let (Some(account), Some(link)) = (&report.account, &report.account_link) {
        out.push_str(&format!(
            "  {} ({}) [{}]\n",
            account.name.as_deref().unwrap_or(NOT_AVAILABLE).italic(),
            account.id,
            link
        ));
    }

    let rows: Vec<TableRow> = report
        .rows
        .iter()
        .map(|row| TableRow::new(row, hyperlinks))
        .collect();
    out.push_str(&Table::new(rows).with(Style::modern()).to_string());
    out.push('\n');
    out
}
