//!
//! The converter input.
//!

pub mod error;
pub mod source;

use std::path::Path;
use std::path::PathBuf;

use revision_sweeper::MetricSample;
use revision_sweeper::RevisionRecord;
use revision_sweeper::SweepState;

use self::error::Error as InputError;

///
/// A result set written by the revision sweeper.
///
#[derive(Debug)]
pub struct CheckpointInput {
    /// The revision records in sweep order.
    pub records: Vec<RevisionRecord>,
}

impl TryFrom<&Path> for CheckpointInput {
    type Error = InputError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let bytes = read(path)?;
        let state: SweepState =
            serde_json::from_slice(bytes.as_slice()).map_err(|error| InputError::Parsing {
                error,
                path: path.to_path_buf(),
            })?;
        Ok(Self {
            records: state.into_records(),
        })
    }
}

///
/// A raw benchmark output of one collective.
///
#[derive(Debug)]
pub struct LogInput {
    /// The collective, taken from the file name.
    pub collective: String,
    /// The samples parsed from the output.
    pub samples: Vec<MetricSample>,
}

impl LogInput {
    /// The raw output file extensions.
    pub const EXTENSIONS: [&'static str; 2] = ["log", "txt"];

    ///
    /// Returns the raw outputs in the directory, sorted by path.
    ///
    pub fn resolve(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for extension in Self::EXTENSIONS.into_iter() {
            let pattern = format!("{}/*.{extension}", directory.to_string_lossy());
            paths.extend(glob::glob(pattern.as_str())?.filter_map(Result::ok));
        }
        paths.sort();
        Ok(paths)
    }
}

impl TryFrom<&Path> for LogInput {
    type Error = InputError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let bytes = read(path)?;
        let samples =
            revision_sweeper::parse_bytes(bytes.as_slice()).map_err(|error| InputError::Decoding {
                error,
                path: path.to_path_buf(),
            })?;
        let collective = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            collective,
            samples,
        })
    }
}

///
/// Reads a non-empty input file.
///
fn read(path: &Path) -> Result<Vec<u8>, InputError> {
    let bytes = std::fs::read(path).map_err(|error| InputError::Reading {
        error,
        path: path.to_path_buf(),
    })?;
    if bytes.is_empty() {
        return Err(InputError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::CheckpointInput;
    use super::InputError;
    use super::LogInput;

    const OUTPUT: &str = "\
# nThread 1 nGpus 8 minBytes 1 maxBytes 17179869184 step: 2(factor) warmup iters: 5 iters: 2
#       size         count      type   redop    root     time   algbw   busbw #wrong     time   algbw   busbw #wrong
        1024           256     float     sum      -1    27.70    0.04    0.06      0    27.40    0.04    0.07      0
        2048           512     float     sum      -1    28.10    0.07    0.13      0    27.90    0.07    0.13      0
";

    #[test]
    fn log_named_after_file_stem() {
        let directory = tempfile::tempdir().expect("Always valid");
        let path = directory.path().join("all_reduce.log");
        std::fs::write(path.as_path(), OUTPUT).expect("Always valid");

        let input = LogInput::try_from(path.as_path()).expect("Always valid");
        assert_eq!(input.collective, "all_reduce");
        assert_eq!(input.samples.len(), 2);
    }

    #[test]
    fn logs_resolved_by_extension() {
        let directory = tempfile::tempdir().expect("Always valid");
        for name in ["reduce.txt", "all_reduce.log", "notes.md"] {
            std::fs::write(directory.path().join(name), OUTPUT).expect("Always valid");
        }

        let paths = LogInput::resolve(directory.path()).expect("Always valid");
        let names = paths
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect::<Vec<String>>();
        assert_eq!(names, vec!["all_reduce.log", "reduce.txt"]);
    }

    #[test]
    fn empty_file_is_reported() {
        let file = tempfile::NamedTempFile::new().expect("Always valid");

        let result = LogInput::try_from(file.path());
        assert!(matches!(result, Err(InputError::EmptyFile { .. })));
    }

    #[test]
    fn checkpoint_is_read() {
        let mut file = tempfile::NamedTempFile::new().expect("Always valid");
        write!(
            file,
            r#"[{{"index": 0, "commit": "abc1234", "data": []}}, {{"index": 1, "commit": "def5678", "data": [], "build_failed": true}}]"#
        )
        .expect("Always valid");

        let input = CheckpointInput::try_from(file.path()).expect("Always valid");
        assert_eq!(input.records.len(), 2);
        assert!(input.records[1].build_failed);
    }

    #[test]
    fn checkpoint_with_gap_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("Always valid");
        write!(file, r#"[{{"index": 1, "commit": "abc1234", "data": []}}]"#)
            .expect("Always valid");

        let result = CheckpointInput::try_from(file.path());
        assert!(matches!(result, Err(InputError::Parsing { .. })));
    }
}
