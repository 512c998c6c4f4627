use serde::{Deserialize, Serialize};

/// Structure holding the course fields the report header needs.
///
/// Fields:
/// - `id`: Unique identifier of the course in the Canvas system.
/// - `name`: Official name of the course.
/// - `sis_course_id`: Identifier assigned by the student information system, if any.
/// - `account_id`: Sub-account the course belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Course {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sis_course_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<u64>,
}

/// Organizational unit (faculty, program...) owning a course.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}
