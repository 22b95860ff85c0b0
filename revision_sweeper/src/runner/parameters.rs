//!
//! The benchmark run parameters.
//!

use std::collections::BTreeMap;

///
/// The benchmark run parameters, mapping command line flags to values.
///
/// Caller-supplied values override the defaults.
///
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RunParameters {
    /// The flag values.
    values: BTreeMap<String, String>,
}

impl RunParameters {
    /// Whether to run the in-place variant only (`1`) or both (`0`).
    pub const IN_PLACE: &'static str = "-z";
    /// The smallest message size.
    pub const MINIMUM_BYTES: &'static str = "-b";
    /// The largest message size.
    pub const MAXIMUM_BYTES: &'static str = "-e";
    /// The message size multiplication factor.
    pub const STEP_FACTOR: &'static str = "-f";
    /// The number of devices per worker.
    pub const DEVICES: &'static str = "-g";
    /// The number of threads per worker.
    pub const THREADS: &'static str = "-t";
    /// The number of local workers.
    pub const LOCAL_WORKERS: &'static str = "-R";
    /// The measured iteration count.
    pub const ITERATIONS: &'static str = "-n";
    /// The warm-up iteration count.
    pub const WARMUP_ITERATIONS: &'static str = "-w";
    /// The element data type.
    pub const DATA_TYPE: &'static str = "-d";

    ///
    /// The defaults, with one device per worker under MPI and eight otherwise.
    ///
    pub fn defaults(mpi: bool) -> Self {
        let devices = if mpi { "1" } else { "8" };
        let values = [
            (Self::IN_PLACE, "1"),
            (Self::MINIMUM_BYTES, "1"),
            (Self::MAXIMUM_BYTES, "16G"),
            (Self::STEP_FACTOR, "2"),
            (Self::DEVICES, devices),
            (Self::THREADS, "1"),
            (Self::LOCAL_WORKERS, "1"),
            (Self::ITERATIONS, "1"),
            (Self::WARMUP_ITERATIONS, "5"),
            (Self::DATA_TYPE, "float"),
        ]
        .into_iter()
        .map(|(flag, value)| (flag.to_owned(), value.to_owned()))
        .collect();
        Self { values }
    }

    ///
    /// Merges the overrides over the defaults.
    ///
    pub fn merged<I, K, V>(mpi: bool, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut parameters = Self::defaults(mpi);
        for (flag, value) in overrides.into_iter() {
            parameters.values.insert(flag.into(), value.into());
        }
        parameters
    }

    ///
    /// Returns the value of a flag.
    ///
    pub fn get(&self, flag: &str) -> Option<&str> {
        self.values.get(flag).map(String::as_str)
    }

    ///
    /// Flattens the parameters into command line arguments.
    ///
    pub fn to_arguments(&self) -> Vec<String> {
        self.values
            .iter()
            .flat_map(|(flag, value)| [flag.to_owned(), value.to_owned()])
            .collect()
    }
}

impl Default for RunParameters {
    fn default() -> Self {
        Self::defaults(false)
    }
}
