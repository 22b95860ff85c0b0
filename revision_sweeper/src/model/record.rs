//!
//! The result of sweeping one revision.
//!

use crate::model::sample::MetricSample;

///
/// The result of sweeping one revision.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevisionRecord {
    /// The 0-based position in the sweep plan.
    pub index: usize,
    /// The version control identifier.
    #[serde(rename = "commit")]
    pub revision_id: String,
    /// The samples parsed from the benchmark output, in output order.
    #[serde(rename = "data")]
    pub samples: Vec<MetricSample>,
    /// Whether the build step of this revision failed.
    #[serde(default, skip_serializing_if = "crate::util::is_false")]
    pub build_failed: bool,
}

impl RevisionRecord {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(index: usize, revision_id: String, samples: Vec<MetricSample>) -> Self {
        Self {
            index,
            revision_id,
            samples,
            build_failed: false,
        }
    }

    ///
    /// Marks the record as produced after a failed build.
    ///
    pub fn with_build_failed(mut self, build_failed: bool) -> Self {
        self.build_failed = build_failed;
        self
    }
}
