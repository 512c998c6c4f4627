use crate::course::{Account, Course};
use crate::rubric::{Category, RubricTotals};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ERROR_FETCHING: &str = "Error al obtener datos";
pub const NO_RUBRIC: &str = "Sin rúbrica";
pub const NO_NAME: &str = "Sin nombre";
pub const NO_TITLE: &str = "Sin título";
pub const NOT_AVAILABLE: &str = "No disponible";
pub const NO_ASSIGNMENTS: &str = "No hay tareas";
pub const LINK_LABEL: &str = "Ver Tarea";

/// A number shown next to the value it was expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub value: i64,
    pub expected: i64,
}

impl Highlight {
    pub fn matches(&self) -> bool {
        self.value == self.expected
    }
}

/// Green when `value == expected`, red otherwise.
impl Display for Highlight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self.value.to_string();
        if self.matches() {
            write!(f, "{}", text.green())
        } else {
            write!(f, "{}", text.red())
        }
    }
}

pub fn format_highlight(value: i64, expected: i64) -> Highlight {
    Highlight { value, expected }
}

/// Point columns of a row whose rubric could be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowScores {
    pub points_possible: i64,
    pub destacado: Highlight,
    pub habilitado: Highlight,
    pub en_desarrollo: Highlight,
    pub no_logrado: Highlight,
}

impl RowScores {
    pub fn new(points_possible: i64, totals: &RubricTotals) -> Self {
        let highlight =
            |category: Category| format_highlight(totals.get(category), category.expected_points());
        RowScores {
            points_possible,
            destacado: highlight(Category::Destacado),
            habilitado: highlight(Category::Habilitado),
            en_desarrollo: highlight(Category::EnDesarrollo),
            no_logrado: highlight(Category::NoLogrado),
        }
    }

    pub fn all_match(&self) -> bool {
        [
            self.destacado,
            self.habilitado,
            self.en_desarrollo,
            self.no_logrado,
        ]
        .iter()
        .all(Highlight::matches)
    }
}

/// One line of the course table. `scores` is `None` for placeholder rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub link: Option<String>,
    pub assignment_name: String,
    pub rubric_title: String,
    pub scores: Option<RowScores>,
}

impl ResultRow {
    /// The assignment itself could not be fetched.
    pub fn fetch_error() -> Self {
        ResultRow {
            link: None,
            assignment_name: ERROR_FETCHING.to_string(),
            rubric_title: ERROR_FETCHING.to_string(),
            scores: None,
        }
    }

    /// The course has no assignments, or the list could not be fetched.
    pub fn no_assignments() -> Self {
        ResultRow {
            assignment_name: NO_ASSIGNMENTS.to_string(),
            ..ResultRow::fetch_error()
        }
    }

    pub fn no_rubric(assignment_name: Option<&str>) -> Self {
        ResultRow {
            link: None,
            assignment_name: assignment_name.unwrap_or(NO_NAME).to_string(),
            rubric_title: NO_RUBRIC.to_string(),
            scores: None,
        }
    }

    pub fn scored(
        link: String,
        assignment_name: Option<&str>,
        rubric_title: Option<&str>,
        scores: RowScores,
    ) -> Self {
        ResultRow {
            link: Some(link),
            assignment_name: assignment_name.unwrap_or(NO_NAME).to_string(),
            rubric_title: rubric_title.unwrap_or(NO_TITLE).to_string(),
            scores: Some(scores),
        }
    }
}

/// Everything shown for one course: header data plus one row per assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseReport {
    pub course_id: u64,
    pub course: Option<Course>,
    pub account: Option<Account>,
    pub course_link: String,
    pub account_link: Option<String>,
    pub rows: Vec<ResultRow>,
}
