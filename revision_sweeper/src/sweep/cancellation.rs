//!
//! The cancellation of a sweep between revisions.
//!

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

///
/// The cancellation of a sweep between revisions.
///
/// A sweep stops before its next revision when the flag is raised or the stop file exists.
///
#[derive(Debug, Default, Clone)]
pub struct Cancellation {
    /// The flag shared with the requester.
    flag: Arc<AtomicBool>,
    /// The file whose presence requests cancellation.
    stop_file: Option<PathBuf>,
}

impl Cancellation {
    ///
    /// Creates a cancellation also requested by creating the stop file.
    ///
    pub fn with_stop_file(stop_file: PathBuf) -> Self {
        Self {
            flag: Arc::default(),
            stop_file: Some(stop_file),
        }
    }

    ///
    /// Requests the cancellation.
    ///
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    ///
    /// Whether the cancellation has been requested.
    ///
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
            || self
                .stop_file
                .as_ref()
                .map(|path| path.exists())
                .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::Cancellation;

    #[test]
    fn shared_flag() {
        let cancellation = Cancellation::default();
        let requester = cancellation.clone();

        assert!(!cancellation.is_requested());
        requester.request();
        assert!(cancellation.is_requested());
    }

    #[test]
    fn stop_file() {
        let directory = tempfile::tempdir().expect("Always valid");
        let path = directory.path().join("STOP");
        let cancellation = Cancellation::with_stop_file(path.clone());

        assert!(!cancellation.is_requested());
        std::fs::write(path, "").expect("Always valid");
        assert!(cancellation.is_requested());
    }
}
