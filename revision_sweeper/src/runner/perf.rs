//!
//! The runner of the collective performance binaries.
//!

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::process::Execution;
use crate::runner::parameters::RunParameters;
use crate::runner::Runner;

///
/// The runner of the collective performance binaries, e.g. `all_reduce_perf`.
///
#[derive(Debug, Clone)]
pub struct PerfRunner {
    /// The directory with the benchmark binaries.
    pub binary_directory: PathBuf,
    /// The working directory of the benchmark process.
    pub working_directory: PathBuf,
    /// The MPI installation.
    pub mpi_install_dir: PathBuf,
    /// The platform runtime installation.
    pub rocm_path: PathBuf,
    /// The total number of ranks under MPI.
    pub total_ranks: usize,
    /// Whether to launch through `mpirun`.
    pub mpi: bool,
    /// The environment overrides applied last.
    pub environment: BTreeMap<String, String>,
}

impl PerfRunner {
    /// The suffix of the benchmark binary names.
    pub const BINARY_SUFFIX: &'static str = "_perf";

    ///
    /// The binary path of the collective.
    ///
    pub fn binary(&self, collective: &str) -> PathBuf {
        self.binary_directory
            .join(format!("{collective}{}", Self::BINARY_SUFFIX))
    }

    ///
    /// The `PATH` with the MPI and runtime binaries prepended.
    ///
    fn path_variable(&self) -> String {
        let inherited = std::env::var("PATH").unwrap_or_default();
        format!(
            "{}:{}:{inherited}",
            self.mpi_install_dir.join("bin").display(),
            self.rocm_path.join("bin").display(),
        )
    }

    ///
    /// The `LD_LIBRARY_PATH` with the MPI libraries prepended.
    ///
    fn library_path_variable(&self) -> String {
        let inherited = std::env::var("LD_LIBRARY_PATH").unwrap_or_default();
        format!("{}:{inherited}", self.mpi_install_dir.join("lib").display())
    }

    ///
    /// Builds the benchmark command.
    ///
    pub fn command(&self, collective: &str, parameters: &RunParameters) -> std::process::Command {
        let path = self.path_variable();
        let library_path = self.library_path_variable();

        let mut command = if self.mpi {
            let mut command =
                std::process::Command::new(self.mpi_install_dir.join("bin").join("mpirun"));
            command.arg("-np");
            command.arg(self.total_ranks.to_string());
            command.args(["--bind-to", "numa"]);
            command.args(["-x", "NCCL_DEBUG=version"]);
            command.arg("-x");
            command.arg(format!("PATH={path}"));
            command.arg("-x");
            command.arg(format!("LD_LIBRARY_PATH={library_path}"));
            command.arg(self.binary(collective));
            command
        } else {
            std::process::Command::new(self.binary(collective))
        };
        command.args(parameters.to_arguments());
        command.current_dir(self.working_directory.as_path());
        command.env("PATH", path);
        command.env("LD_LIBRARY_PATH", library_path);
        command.envs(self.environment.iter());
        command
    }
}

impl Runner for PerfRunner {
    fn run(&mut self, collective: &str, parameters: &RunParameters) -> Execution {
        let mut command = self.command(collective, parameters);
        let execution = Execution::capture(&mut command);
        if !execution.is_success() {
            tracing::warn!(collective, %execution, "benchmark exited unsuccessfully");
        }
        execution
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::runner::parameters::RunParameters;
    use crate::runner::Runner;

    use super::PerfRunner;

    fn runner(mpi: bool) -> PerfRunner {
        PerfRunner {
            binary_directory: PathBuf::from("/scratch/rccl-tests/build"),
            working_directory: std::env::temp_dir(),
            mpi_install_dir: PathBuf::from("/opt/ompi5"),
            rocm_path: PathBuf::from("/opt/rocm"),
            total_ranks: 8,
            mpi,
            environment: BTreeMap::new(),
        }
    }

    #[test]
    fn direct_command() {
        let command = runner(false).command("all_reduce", &RunParameters::default());

        assert_eq!(
            command.get_program(),
            "/scratch/rccl-tests/build/all_reduce_perf"
        );
        let arguments: Vec<_> = command.get_args().collect();
        assert!(arguments.windows(2).any(|pair| pair == ["-g", "8"]));
    }

    #[test]
    fn mpi_command() {
        let command = runner(true).command("all_gather", &RunParameters::defaults(true));

        assert_eq!(command.get_program(), "/opt/ompi5/bin/mpirun");
        let arguments: Vec<_> = command
            .get_args()
            .map(|argument| argument.to_string_lossy().into_owned())
            .collect();
        assert_eq!(arguments[0..2], ["-np".to_owned(), "8".to_owned()]);
        assert!(arguments.contains(&"/scratch/rccl-tests/build/all_gather_perf".to_owned()));
        assert!(arguments.windows(2).any(|pair| pair == ["-g", "1"]));
    }

    #[test]
    fn missing_binary_returns_text() {
        let execution = runner(false).run("all_reduce", &RunParameters::default());

        assert_eq!(execution.exit_code, None);
        assert!(!execution.output.is_empty());
    }
}
