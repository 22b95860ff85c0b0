//!
//! The version control operations on the library checkout.
//!

use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::process::Execution;

/// The development line swept by default.
pub const DEFAULT_BRANCH: &str = "develop";

///
/// Lists the last `count` revisions of `branch`, oldest first.
///
pub fn list_revisions(repository: &Path, branch: &str, count: usize) -> Result<Vec<String>, Error> {
    if !repository.is_dir() {
        return Err(Error::RepositoryAccess {
            path: repository.to_path_buf(),
        });
    }

    let mut command = std::process::Command::new("git");
    command.arg("-C");
    command.arg(repository);
    command.arg("log");
    command.arg(branch);
    command.arg(format!("-n{count}"));
    command.arg("--pretty=format:%h");
    command.arg("--reverse");
    let execution = Execution::capture(&mut command);
    if !execution.is_success() {
        return Err(Error::VersionControl {
            message: execution.to_string(),
            output: execution.output.trim().to_owned(),
        });
    }

    let revisions: Vec<String> = execution
        .output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    tracing::debug!(
        repository = %repository.display(),
        branch,
        count = revisions.len(),
        "revisions listed"
    );
    Ok(revisions)
}

///
/// Clones the repository into `workdir/name`, unless the directory already exists.
///
pub fn clone_if_missing(workdir: &Path, name: &str, url: &str) -> Result<PathBuf, Error> {
    let path = workdir.join(name);
    if path.exists() {
        tracing::info!(path = %path.display(), "repository exists, skipping clone");
        return Ok(path);
    }

    std::fs::create_dir_all(workdir).map_err(|_| Error::RepositoryAccess {
        path: workdir.to_path_buf(),
    })?;
    let mut command = std::process::Command::new("git");
    command.arg("clone");
    command.arg(url);
    command.arg(path.as_path());
    let execution = Execution::capture(&mut command);
    if !execution.is_success() {
        return Err(Error::VersionControl {
            message: execution.to_string(),
            output: execution.output.trim().to_owned(),
        });
    }
    tracing::info!(path = %path.display(), url, "repository cloned");
    Ok(path)
}
