//!
//! The sweep configuration.
//!

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use crate::builder::install_script::InstallScriptBuilder;
use crate::builder::suite::SuiteBuilder;
use crate::runner::parameters::RunParameters;
use crate::runner::perf::PerfRunner;
use crate::sweep::policy::BuildFailurePolicy;
use crate::sweep::Settings;

///
/// The sweep configuration.
///
/// Every path left unset is derived from the scratch working directory.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// The scratch working directory.
    pub workdir: PathBuf,

    /// The library checkout. Defaults to `<workdir>/rccl`.
    pub repository: Option<PathBuf>,
    /// The library clone URL.
    pub repository_url: String,
    /// The swept development line.
    pub branch: String,
    /// The number of most recent revisions to sweep.
    pub count: usize,

    /// Whether to build the library at every revision.
    pub build: bool,
    /// The number of parallel build jobs.
    pub jobs: usize,
    /// The collectives compiled into the library, e.g. `AllReduce|Reduce`.
    pub only_funcs: Option<String>,
    /// The artifact path relative to the library checkout.
    pub artifact: PathBuf,

    /// Whether to rebuild the benchmark suite against every built library.
    pub build_suite: bool,
    /// The benchmark suite checkout. Defaults to `<workdir>/rccl-tests`.
    pub suite_repository: Option<PathBuf>,
    /// The benchmark suite clone URL.
    pub suite_repository_url: String,

    /// The benchmarked collective.
    pub collective: String,
    /// The benchmark binaries. Defaults to `<suite_repository>/build`.
    pub binary_directory: Option<PathBuf>,
    /// Whether to launch the benchmark through `mpirun`.
    pub mpi: bool,
    /// The total number of ranks under MPI.
    pub total_ranks: usize,
    /// The MPI installation.
    pub mpi_install_dir: PathBuf,
    /// The platform runtime installation.
    pub rocm_path: PathBuf,
    /// The run parameter overrides, by flag.
    pub parameters: BTreeMap<String, String>,
    /// The benchmark environment overrides.
    pub environment: BTreeMap<String, String>,

    /// The number of revisions between checkpoints.
    pub checkpoint_interval: usize,
    /// The result set file. Defaults to `<workdir>/results.json`.
    pub output: Option<PathBuf>,
    /// The raw log backup directory. Defaults to `<workdir>/backup`.
    pub backup_directory: Option<PathBuf>,
    /// The handling of failed builds.
    pub build_failure_policy: BuildFailurePolicy,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),

            repository: None,
            repository_url: "https://github.com/ROCm/rccl.git".to_owned(),
            branch: crate::repository::DEFAULT_BRANCH.to_owned(),
            count: 200,

            build: true,
            jobs: InstallScriptBuilder::DEFAULT_JOBS,
            only_funcs: Some("AllReduce|Reduce".to_owned()),
            artifact: PathBuf::from(InstallScriptBuilder::DEFAULT_ARTIFACT),

            build_suite: false,
            suite_repository: None,
            suite_repository_url: "https://github.com/ROCm/rccl-tests.git".to_owned(),

            collective: Settings::DEFAULT_COLLECTIVE.to_owned(),
            binary_directory: None,
            mpi: false,
            total_ranks: 8,
            mpi_install_dir: PathBuf::from("/opt/ompi5"),
            rocm_path: PathBuf::from("/opt/rocm"),
            parameters: BTreeMap::from([(RunParameters::ITERATIONS.to_owned(), "2".to_owned())]),
            environment: BTreeMap::new(),

            checkpoint_interval: Settings::DEFAULT_CHECKPOINT_INTERVAL,
            output: None,
            backup_directory: None,
            build_failure_policy: BuildFailurePolicy::default(),
        }
    }
}

impl SweepConfig {
    /// The library checkout directory name.
    pub const REPOSITORY_NAME: &'static str = "rccl";

    /// The benchmark suite checkout directory name.
    pub const SUITE_REPOSITORY_NAME: &'static str = "rccl-tests";

    /// The result set file name.
    pub const OUTPUT_NAME: &'static str = "results.json";

    /// The backup directory name.
    pub const BACKUP_DIRECTORY_NAME: &'static str = "backup";

    /// The stop file name.
    pub const STOP_FILE_NAME: &'static str = "STOP";

    ///
    /// Reads the configuration from a YAML file.
    ///
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} reading: {error}"))?;
        let config: Self = serde_yaml::from_str(text.as_str())
            .map_err(|error| anyhow::anyhow!("Configuration file {path:?} parsing: {error}"))?;
        Ok(config)
    }

    ///
    /// Checks the invariants that are not expressed in the type system.
    ///
    pub fn validate(self) -> anyhow::Result<Self> {
        if self.count == 0 {
            anyhow::bail!("The revision count must be positive");
        }
        if self.checkpoint_interval == 0 {
            anyhow::bail!("The checkpoint interval must be positive");
        }
        if self.jobs == 0 {
            anyhow::bail!("The number of build jobs must be positive");
        }
        if self.collective.is_empty() {
            anyhow::bail!("The collective name must not be empty");
        }
        if self.mpi && self.total_ranks == 0 {
            anyhow::bail!("The number of ranks must be positive under MPI");
        }
        if self.build_suite && !self.build {
            anyhow::bail!("Rebuilding the benchmark suite requires building the library");
        }
        Ok(self)
    }

    ///
    /// The library checkout.
    ///
    pub fn repository_path(&self) -> PathBuf {
        self.repository
            .clone()
            .unwrap_or_else(|| self.workdir.join(Self::REPOSITORY_NAME))
    }

    ///
    /// The benchmark suite checkout.
    ///
    pub fn suite_repository_path(&self) -> PathBuf {
        self.suite_repository
            .clone()
            .unwrap_or_else(|| self.workdir.join(Self::SUITE_REPOSITORY_NAME))
    }

    ///
    /// The benchmark binaries.
    ///
    pub fn binary_directory_path(&self) -> PathBuf {
        self.binary_directory.clone().unwrap_or_else(|| {
            self.suite_repository_path()
                .join(SuiteBuilder::BINARY_DIRECTORY)
        })
    }

    ///
    /// The result set file.
    ///
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.workdir.join(Self::OUTPUT_NAME))
    }

    ///
    /// The raw log backup directory.
    ///
    pub fn backup_directory_path(&self) -> PathBuf {
        self.backup_directory
            .clone()
            .unwrap_or_else(|| self.workdir.join(Self::BACKUP_DIRECTORY_NAME))
    }

    ///
    /// The file whose creation cancels the sweep before the next revision.
    ///
    pub fn stop_file_path(&self) -> PathBuf {
        self.workdir.join(Self::STOP_FILE_NAME)
    }

    ///
    /// The library builder.
    ///
    pub fn install_script_builder(&self) -> InstallScriptBuilder {
        let repository = self.repository_path();
        let mut builder = InstallScriptBuilder::new(repository.clone(), self.jobs);
        builder.artifact = self.artifact.clone();
        if let Some(only_funcs) = self.only_funcs.as_deref() {
            builder = builder.with_only_funcs(only_funcs);
        }
        if self.build_suite {
            let library_install_dir = repository
                .join(self.artifact.as_path())
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| repository.clone());
            builder = builder.with_suite(SuiteBuilder {
                repository: self.suite_repository_path(),
                mpi_install_dir: self.mpi_install_dir.clone(),
                rocm_path: self.rocm_path.clone(),
                library_install_dir,
                mpi: self.mpi,
            });
        }
        builder
    }

    ///
    /// The benchmark runner.
    ///
    pub fn perf_runner(&self) -> PerfRunner {
        PerfRunner {
            binary_directory: self.binary_directory_path(),
            working_directory: self.workdir.clone(),
            mpi_install_dir: self.mpi_install_dir.clone(),
            rocm_path: self.rocm_path.clone(),
            total_ranks: self.total_ranks,
            mpi: self.mpi,
            environment: self.environment.clone(),
        }
    }

    ///
    /// The sweep engine settings.
    ///
    pub fn settings(&self) -> Settings {
        Settings {
            collective: self.collective.clone(),
            parameters: RunParameters::merged(self.mpi, self.parameters.clone()),
            checkpoint_interval: self.checkpoint_interval,
            build_failure_policy: self.build_failure_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::runner::parameters::RunParameters;
    use crate::sweep::policy::BuildFailurePolicy;

    use super::SweepConfig;

    #[test]
    fn derived_paths() {
        let config = SweepConfig {
            workdir: PathBuf::from("/scratch"),
            ..Default::default()
        };

        assert_eq!(config.repository_path(), PathBuf::from("/scratch/rccl"));
        assert_eq!(
            config.binary_directory_path(),
            PathBuf::from("/scratch/rccl-tests/build")
        );
        assert_eq!(config.output_path(), PathBuf::from("/scratch/results.json"));
        assert_eq!(
            config.backup_directory_path(),
            PathBuf::from("/scratch/backup")
        );
    }

    #[test]
    fn partial_yaml() {
        let yaml = r#"
workdir: /scratch
count: 5
checkpoint_interval: 1
build_failure_policy: skip
parameters:
  "-d": half
"#;
        let config: SweepConfig = serde_yaml::from_str(yaml).expect("Always valid");
        let settings = config.settings();

        assert_eq!(config.count, 5);
        assert_eq!(config.branch, "develop");
        assert_eq!(settings.build_failure_policy, BuildFailurePolicy::Skip);
        assert_eq!(settings.parameters.get(RunParameters::DATA_TYPE), Some("half"));
        assert_eq!(settings.parameters.get(RunParameters::ITERATIONS), Some("1"));
    }

    #[test]
    fn unknown_key_rejected() {
        let yaml = "workdir: /scratch\ncheckpoint_intervall: 2\n";

        assert!(serde_yaml::from_str::<SweepConfig>(yaml).is_err());
    }

    #[test]
    fn zero_interval_rejected() {
        let config = SweepConfig {
            checkpoint_interval: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn suite_builder_links_artifact_directory() {
        let config = SweepConfig {
            workdir: PathBuf::from("/scratch"),
            build_suite: true,
            ..Default::default()
        };

        let builder = config.install_script_builder();
        let suite = builder.suite.expect("Always exists");
        assert_eq!(
            suite.library_install_dir,
            PathBuf::from("/scratch/rccl/build/debug")
        );
    }
}
