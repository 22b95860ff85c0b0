//!
//! The builder of the benchmark suite against a custom library.
//!

use std::path::Path;
use std::path::PathBuf;

use crate::builder::error::Error as BuildError;
use crate::process::Execution;

///
/// The builder of the benchmark suite against a custom library.
///
#[derive(Debug, Clone)]
pub struct SuiteBuilder {
    /// The benchmark suite checkout.
    pub repository: PathBuf,
    /// The MPI installation.
    pub mpi_install_dir: PathBuf,
    /// The platform runtime installation.
    pub rocm_path: PathBuf,
    /// The library build directory with headers.
    pub library_install_dir: PathBuf,
    /// Whether to build with MPI support.
    pub mpi: bool,
}

impl SuiteBuilder {
    /// The directory with the built binaries, relative to the suite repository.
    pub const BINARY_DIRECTORY: &'static str = "build";

    ///
    /// Rebuilds the suite from scratch, linking against the artifact.
    ///
    /// Returns the directory with the benchmark binaries.
    ///
    pub fn build(&self, artifact: &Path) -> Result<PathBuf, BuildError> {
        if !self.repository.is_dir() {
            return Err(BuildError::RepositoryAccess {
                path: self.repository.clone(),
            });
        }
        let makefile = self.repository.join("Makefile");
        if !makefile.is_file() {
            return Err(BuildError::Configuration { path: makefile });
        }

        self.make(["clean".to_owned()])?;
        let binary_directory = self.repository.join(Self::BINARY_DIRECTORY);
        if binary_directory.exists() {
            std::fs::remove_dir_all(binary_directory.as_path()).map_err(|_| {
                BuildError::Configuration {
                    path: binary_directory.clone(),
                }
            })?;
        }
        self.make(self.make_arguments(artifact))?;

        Ok(binary_directory)
    }

    ///
    /// The `make` arguments of the suite build.
    ///
    pub fn make_arguments(&self, artifact: &Path) -> Vec<String> {
        vec![
            "CXXFLAGS=-g -O0".to_owned(),
            "CFLAGS=-g -O0".to_owned(),
            format!("MPI={}", u8::from(self.mpi)),
            format!("HIP_HOME={}", self.rocm_path.join("include").join("hip").display()),
            format!("MPI_HOME={}", self.mpi_install_dir.display()),
            format!("CUSTOM_RCCL_LIB={}", artifact.display()),
            format!("NCCL_HOME={}", self.library_install_dir.display()),
            "-j".to_owned(),
        ]
    }

    ///
    /// Runs `make` in the suite repository.
    ///
    fn make<I>(&self, arguments: I) -> Result<Execution, BuildError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut command = std::process::Command::new("make");
        command.current_dir(self.repository.as_path());
        command.args(arguments);
        let execution = Execution::capture(&mut command);
        if !execution.is_success() {
            return Err(BuildError::Failure { execution });
        }
        Ok(execution)
    }
}
