//!
//! The benchmark runners.
//!

pub mod parameters;
pub mod perf;

use crate::process::Execution;

use self::parameters::RunParameters;

///
/// Runs a benchmark and captures its output.
///
pub trait Runner {
    ///
    /// Runs the collective benchmark with the parameters.
    ///
    /// Always returns the captured output, even for failed runs, since partial output still
    /// carries rows worth parsing.
    ///
    fn run(&mut self, collective: &str, parameters: &RunParameters) -> Execution;
}
