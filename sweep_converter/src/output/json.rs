//!
//! Serializing the report to JSON.
//!

use crate::model::Report;

///
/// The report serialized to JSON.
///
#[derive(Default)]
pub struct Json {
    /// Serialized JSON.
    pub content: String,
}

impl From<Report> for Json {
    fn from(report: Report) -> Self {
        let mut content = serde_json::to_string_pretty(&report).expect("Always valid");
        content.push('\n');
        Self { content }
    }
}
