use crate::rubric::{Criterion, RubricSettings};
use serde::{Deserialize, Serialize};

/// Entry of the course assignment list.
///
/// The list endpoint leaves out rubric data, so each summary is followed by
/// a request for the full `Assignment`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AssignmentSummary {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Full assignment detail, including the embedded rubric.
///
/// Fields:
/// - `rubric`: criteria of the attached rubric, absent when the assignment has none.
/// - `rubric_settings`: title and maximum points of that rubric.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rubric: Option<Vec<Criterion>>,
    #[serde(default)]
    pub rubric_settings: Option<RubricSettings>,
}

impl Assignment {
    /// Criteria of the rubric, or `None` when there is nothing to aggregate.
    pub fn rubric(&self) -> Option<&[Criterion]> {
        self.rubric
            .as_deref()
            .filter(|criteria| !criteria.is_empty())
    }
}
