//!
//! The library artifact builders.
//!

pub mod error;
pub mod install_script;
pub mod suite;

use std::path::PathBuf;

pub use self::error::Error as BuildError;

///
/// Produces the library artifact of a revision.
///
/// Implementations check out the revision in a shared working tree, so a builder must never be
/// invoked concurrently against the same repository.
///
pub trait Builder {
    ///
    /// Checks out and builds the revision, returning the artifact path.
    ///
    fn build(&mut self, revision: &str) -> Result<PathBuf, BuildError>;

    ///
    /// The artifact path benchmarked when the build of a revision fails.
    ///
    fn fallback_artifact(&self) -> PathBuf;
}

///
/// A builder that skips building and always reports the configured artifact.
///
#[derive(Debug, Clone)]
pub struct NoopBuilder {
    /// The prebuilt artifact.
    pub artifact: PathBuf,
}

impl NoopBuilder {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(artifact: PathBuf) -> Self {
        Self { artifact }
    }
}

impl Builder for NoopBuilder {
    fn build(&mut self, _revision: &str) -> Result<PathBuf, BuildError> {
        Ok(self.artifact.clone())
    }

    fn fallback_artifact(&self) -> PathBuf {
        self.artifact.clone()
    }
}
