//!
//! The checkpointed result store.
//!
//! The result set is always replaced in full through a temporary file renamed over the
//! destination, so a crash leaves either the previous or the new snapshot on disk.
//! A replaced result set keeps the permissions of the one it replaces.
//! The raw log backups are written separately and are not atomic with the result set.
//!


use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::model::state::SweepState;

///
/// The durable storage of a sweep.
///
pub trait Store {
    ///
    /// Replaces the stored result set with the whole state.
    ///
    fn persist(&mut self, state: &SweepState) -> Result<(), Error>;

    ///
    /// Saves the raw benchmark output of a revision, replacing any earlier one.
    ///
    fn backup_log(&mut self, revision: &str, output: &str) -> anyhow::Result<()>;

    ///
    /// Saves the captured output of a failed build of a revision.
    ///
    fn backup_build_log(&mut self, revision: &str, output: &str) -> anyhow::Result<()>;
}

///
/// The file system store.
///
#[derive(Debug, Clone)]
pub struct FileStore {
    /// The result set file.
    pub path: PathBuf,
    /// The directory of the raw log backups.
    pub backup_directory: PathBuf,
}

impl FileStore {
    /// The raw log backup extension.
    pub const EXTENSION_LOG: &'static str = "log";

    /// The build log backup extension.
    pub const EXTENSION_BUILD_LOG: &'static str = "build.log";

    /// The mode of a newly created result set before the umask is applied.
    pub const DEFAULT_MODE: u32 = 0o644;

    ///
    /// Creates the store, preparing the destination directories.
    ///
    pub fn new(path: PathBuf, backup_directory: PathBuf) -> Result<Self, Error> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|error| Error::Checkpoint {
                path: path.clone(),
                message: format!("creating directory {parent:?}: {error}"),
            })?;
        }
        Ok(Self {
            path,
            backup_directory,
        })
    }

    ///
    /// Loads the latest persisted state, or an empty one if nothing has been persisted yet.
    ///
    pub fn load_latest(path: &Path) -> Result<SweepState, Error> {
        if !path.exists() {
            return Ok(SweepState::default());
        }
        let text = std::fs::read_to_string(path).map_err(|error| Error::Checkpoint {
            path: path.to_path_buf(),
            message: format!("reading: {error}"),
        })?;
        serde_json::from_str(text.as_str()).map_err(|error| Error::Checkpoint {
            path: path.to_path_buf(),
            message: format!("parsing: {error}"),
        })
    }

    ///
    /// Serializes the state into the checkpoint text.
    ///
    pub fn serialize(state: &SweepState) -> String {
        let mut text = serde_json::to_string_pretty(state).expect("Always valid");
        text.push('\n');
        text
    }

    ///
    /// The backup path of a revision with the extension.
    ///
    pub fn backup_path(&self, revision: &str, extension: &str) -> PathBuf {
        self.backup_directory.join(format!("{revision}.{extension}"))
    }

    ///
    /// The permissions of a newly created result set, narrowed by the process umask.
    ///
    #[cfg(unix)]
    fn default_permissions() -> Option<std::fs::Permissions> {
        use std::os::unix::fs::PermissionsExt;

        Some(std::fs::Permissions::from_mode(Self::DEFAULT_MODE))
    }

    ///
    /// The permissions of a newly created result set, left to the platform.
    ///
    #[cfg(not(unix))]
    fn default_permissions() -> Option<std::fs::Permissions> {
        None
    }

    ///
    /// Writes a backup file, creating the directory on demand.
    ///
    fn write_backup(&self, path: PathBuf, contents: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.backup_directory.as_path()).map_err(|error| {
            anyhow::anyhow!("Backup directory {:?} creating: {error}", self.backup_directory)
        })?;
        std::fs::write(path.as_path(), contents)
            .map_err(|error| anyhow::anyhow!("Backup file {path:?} writing: {error}"))?;
        Ok(())
    }
}

impl Store for FileStore {
    fn persist(&mut self, state: &SweepState) -> Result<(), Error> {
        let checkpoint_error = |message: String| Error::Checkpoint {
            path: self.path.clone(),
            message,
        };

        let directory = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let existing = std::fs::metadata(self.path.as_path())
            .ok()
            .filter(|metadata| metadata.is_file())
            .map(|metadata| metadata.permissions());
        let mut builder = tempfile::Builder::new();
        if let Some(permissions) = existing.clone().or_else(Self::default_permissions) {
            builder.permissions(permissions);
        }
        let mut file = builder
            .tempfile_in(directory)
            .map_err(|error| checkpoint_error(format!("creating temporary file: {error}")))?;
        if let Some(permissions) = existing {
            file.as_file()
                .set_permissions(permissions)
                .map_err(|error| checkpoint_error(format!("setting permissions: {error}")))?;
        }
        file.write_all(Self::serialize(state).as_bytes())
            .map_err(|error| checkpoint_error(format!("writing: {error}")))?;
        file.as_file()
            .sync_all()
            .map_err(|error| checkpoint_error(format!("syncing: {error}")))?;
        file.persist(self.path.as_path())
            .map_err(|error| checkpoint_error(format!("replacing: {}", error.error)))?;

        tracing::debug!(
            path = %self.path.display(),
            records = state.records().len(),
            "checkpoint persisted"
        );
        Ok(())
    }

    fn backup_log(&mut self, revision: &str, output: &str) -> anyhow::Result<()> {
        self.write_backup(self.backup_path(revision, Self::EXTENSION_LOG), output)
    }

    fn backup_build_log(&mut self, revision: &str, output: &str) -> anyhow::Result<()> {
        self.write_backup(self.backup_path(revision, Self::EXTENSION_BUILD_LOG), output)
    }
}
