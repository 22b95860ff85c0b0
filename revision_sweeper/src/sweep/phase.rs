//!
//! The sweep engine phase.
//!

///
/// The sweep engine phase.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between revisions.
    #[default]
    Idle,
    /// Taking the next revision from the plan.
    PreparingRevision,
    /// Checking out and building the library.
    Building,
    /// Running the benchmark.
    Running,
    /// Parsing the benchmark output.
    Parsing,
    /// Persisting the result set.
    Checkpointing,
    /// All revisions of the plan have been processed.
    Done,
    /// Stopped by cancellation between revisions.
    Cancelled,
    /// Stopped by an unrecoverable error.
    Aborted,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::PreparingRevision => write!(f, "preparing revision"),
            Self::Building => write!(f, "building"),
            Self::Running => write!(f, "running"),
            Self::Parsing => write!(f, "parsing"),
            Self::Checkpointing => write!(f, "checkpointing"),
            Self::Done => write!(f, "done"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}
