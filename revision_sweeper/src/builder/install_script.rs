//!
//! The builder driving the library install script.
//!

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use crate::builder::error::Error as BuildError;
use crate::builder::suite::SuiteBuilder;
use crate::builder::Builder;
use crate::process::Execution;

///
/// The builder driving the library install script.
///
#[derive(Debug, Clone)]
pub struct InstallScriptBuilder {
    /// The library repository checkout.
    pub repository: PathBuf,
    /// The number of parallel build jobs.
    pub jobs: usize,
    /// The install script arguments, without the jobs flag.
    pub arguments: Vec<String>,
    /// The environment restricting which functional areas are compiled.
    pub environment: BTreeMap<String, String>,
    /// The artifact path relative to the repository.
    pub artifact: PathBuf,
    /// The benchmark suite rebuilt against each artifact, if requested.
    pub suite: Option<SuiteBuilder>,
}

impl InstallScriptBuilder {
    /// The install script name.
    pub const SCRIPT_NAME: &'static str = "install.sh";

    /// The default number of parallel build jobs.
    pub const DEFAULT_JOBS: usize = 32;

    /// The default artifact path relative to the repository.
    pub const DEFAULT_ARTIFACT: &'static str = "build/debug/librccl.so.1.0";

    /// The environment variable restricting the compiled collectives.
    pub const ENVIRONMENT_ONLY_FUNCS: &'static str = "ONLY_FUNCS";

    ///
    /// A shortcut constructor with the default debug build settings.
    ///
    pub fn new(repository: PathBuf, jobs: usize) -> Self {
        Self {
            repository,
            jobs,
            arguments: vec!["-l".to_owned(), "--debug".to_owned()],
            environment: BTreeMap::new(),
            artifact: PathBuf::from(Self::DEFAULT_ARTIFACT),
            suite: None,
        }
    }

    ///
    /// Rebuilds the benchmark suite against every built artifact.
    ///
    pub fn with_suite(mut self, suite: SuiteBuilder) -> Self {
        self.suite = Some(suite);
        self
    }

    ///
    /// Restricts the build to the collectives matching the pattern, e.g. `AllReduce|Reduce`.
    ///
    pub fn with_only_funcs(mut self, pattern: &str) -> Self {
        self.environment
            .insert(Self::ENVIRONMENT_ONLY_FUNCS.to_owned(), pattern.to_owned());
        self
    }

    ///
    /// The absolute artifact path.
    ///
    pub fn artifact_path(&self) -> PathBuf {
        self.repository.join(self.artifact.as_path())
    }

    ///
    /// Checks out the revision in the working tree.
    ///
    fn checkout(repository: &Path, revision: &str) -> Result<(), BuildError> {
        let mut command = std::process::Command::new("git");
        command.arg("-C");
        command.arg(repository);
        command.arg("checkout");
        command.arg(revision);
        let execution = Execution::capture(&mut command);
        if !execution.is_success() {
            return Err(BuildError::Checkout {
                revision: revision.to_owned(),
                execution,
            });
        }
        Ok(())
    }
}

impl Builder for InstallScriptBuilder {
    fn build(&mut self, revision: &str) -> Result<PathBuf, BuildError> {
        if !self.repository.is_dir() {
            return Err(BuildError::RepositoryAccess {
                path: self.repository.clone(),
            });
        }
        Self::checkout(self.repository.as_path(), revision)?;

        let script = self.repository.join(Self::SCRIPT_NAME);
        if !script.is_file() {
            return Err(BuildError::Configuration { path: script });
        }

        let mut command = std::process::Command::new("bash");
        command.current_dir(self.repository.as_path());
        command.arg(Self::SCRIPT_NAME);
        command.args(self.arguments.iter());
        command.arg(format!("-j{}", self.jobs));
        command.envs(self.environment.iter());

        tracing::debug!(revision, jobs = self.jobs, "building library");
        let execution = Execution::capture(&mut command);
        if !execution.is_success() {
            return Err(BuildError::Failure { execution });
        }
        tracing::debug!(
            revision,
            seconds = execution.duration.as_secs(),
            "library built"
        );

        let artifact = self.artifact_path();
        if let Some(suite) = self.suite.as_ref() {
            let binary_directory = suite.build(artifact.as_path())?;
            tracing::debug!(revision, binaries = %binary_directory.display(), "suite built");
        }
        Ok(artifact)
    }

    fn fallback_artifact(&self) -> PathBuf {
        self.artifact_path()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::error::Error as BuildError;
    use crate::builder::Builder;

    use super::InstallScriptBuilder;

    #[test]
    fn missing_repository() {
        let directory = tempfile::tempdir().expect("Always valid");
        let mut builder = InstallScriptBuilder::new(directory.path().join("rccl"), 4);

        let result = builder.build("abc1234");

        assert!(matches!(result, Err(BuildError::RepositoryAccess { .. })));
    }

    #[test]
    fn artifact_is_relative_to_repository() {
        let builder = InstallScriptBuilder::new("/scratch/rccl".into(), 4)
            .with_only_funcs("AllReduce|Reduce");

        assert_eq!(
            builder.fallback_artifact(),
            std::path::PathBuf::from("/scratch/rccl/build/debug/librccl.so.1.0")
        );
        assert_eq!(
            builder
                .environment
                .get(InstallScriptBuilder::ENVIRONMENT_ONLY_FUNCS)
                .map(String::as_str),
            Some("AllReduce|Reduce")
        );
    }
}
