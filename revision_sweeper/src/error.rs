//!
//! The sweep error.
//!

use std::path::PathBuf;

///
/// The sweep error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository checkout is not accessible.
    #[error("Repository {path:?} is not a valid checkout")]
    RepositoryAccess {
        /// The repository path.
        path: PathBuf,
    },
    /// The version control client failed.
    #[error("Version control: {message}: {output}")]
    VersionControl {
        /// The failed command description.
        message: String,
        /// The captured output.
        output: String,
    },
    /// The checkpoint does not belong to the current sweep plan.
    #[error("Checkpoint record {index} is revision `{found}`, but the sweep plan has `{expected}`")]
    CheckpointMismatch {
        /// The record position.
        index: usize,
        /// The revision in the sweep plan.
        expected: String,
        /// The revision in the checkpoint.
        found: String,
    },
    /// The checkpoint could not be read or written.
    #[error("Checkpoint {path:?}: {message}")]
    Checkpoint {
        /// The checkpoint path.
        path: PathBuf,
        /// The failure description.
        message: String,
    },
}
