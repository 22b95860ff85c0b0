//!
//! The artifact build error.
//!

use std::path::PathBuf;

use crate::process::Execution;

///
/// The artifact build error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The repository checkout is not accessible.
    #[error("Repository {path:?} not found")]
    RepositoryAccess {
        /// The repository path.
        path: PathBuf,
    },
    /// The revision could not be checked out.
    #[error("Checking out `{revision}`: {execution}")]
    Checkout {
        /// The revision.
        revision: String,
        /// The failed checkout.
        execution: Execution,
    },
    /// A required build entry point is missing.
    #[error("Build entry point {path:?} not found")]
    Configuration {
        /// The missing entry point.
        path: PathBuf,
    },
    /// The build command exited unsuccessfully.
    #[error("Build failed: {execution}")]
    Failure {
        /// The failed build.
        execution: Execution,
    },
}

impl Error {
    ///
    /// The captured output of the failed command, if any.
    ///
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Checkout { execution, .. } | Self::Failure { execution } => {
                Some(execution.output.as_str())
            }
            Self::RepositoryAccess { .. } | Self::Configuration { .. } => None,
        }
    }

    ///
    /// Renders the error and the captured output as a build log.
    ///
    pub fn to_log(&self) -> String {
        match self.output() {
            Some(output) => format!("{self}\n\n{output}"),
            None => format!("{self}\n"),
        }
    }
}
