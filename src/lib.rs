//! # Canvas Rubric Analyzer
//!
//! This library checks the rubrics attached to Canvas LMS assignments against the
//! institutional rating scale: every criterion is expected to offer a *Destacado*,
//! *Habilitado*, *En desarrollo* and *No logrado* level, and the points of each level,
//! summed over the rubric, should add up to 100 / 60 / 30 / 0.
//!
//! ## Core Features
//!
//! - **Paginated API client:** `CanvasClient` sends bearer-authenticated requests and
//!   follows `Link: <...>; rel="next"` headers until the last page.
//! - **Rubric aggregation:** `aggregate` classifies ratings by their normalized
//!   description and sums the points per level.
//! - **Course analysis:** `RubricAnalyzer` walks course → account → assignments and
//!   produces one `ResultRow` per assignment, with placeholder rows on failure.
//!
//! Failures never abort a run. They are handed to an `ErrorReporter` and the affected
//! course or assignment gets a placeholder row.
//!
//! ### Example
//!
//! ```no_run
//! use canvas_rubric_analyzer::{CanvasClient, CanvasCredentials, RubricAnalyzer};
//!
//! let credentials = CanvasCredentials::credentials().expect("Canvas configuration");
//! let client = CanvasClient::new(credentials).expect("base URL");
//! for report in RubricAnalyzer::new(&client).analyze_input("1234, 5678") {
//!     println!("{}: {} assignments", report.course_id, report.rows.len());
//! }
//! ```
pub mod analyzer; // Course → assignments → rows pipeline.
mod assignment;
pub mod canvas; // Paginated HTTP client for the Canvas API.
pub mod connection; // Transport abstraction and Link header parsing.
mod course;
pub mod credentials; // Handles the storage and retrieval of Canvas API credentials.
pub mod error;
pub mod normalize;
pub mod output;
pub mod report;
pub mod reporter;
pub mod rubric;

#[cfg(test)]
mod test_support;

// Exports key structures for external use.
pub use analyzer::{parse_course_ids, RubricAnalyzer};
pub use assignment::{Assignment, AssignmentSummary};
pub use canvas::CanvasClient;
pub use connection::{HttpMethod, ReqwestTransport, Transport};
pub use course::{Account, Course};
pub use credentials::CanvasCredentials;
pub use error::{ConfigError, RequestError};
pub use normalize::normalize;
pub use report::{format_highlight, CourseReport, Highlight, ResultRow, RowScores};
pub use reporter::{ErrorReporter, LogReporter};
pub use rubric::{aggregate, Category, Criterion, Rating, RubricSettings, RubricTotals};
