//!
//! The sweep converter arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The sweep converter arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None, arg_required_else_help = true)]
pub struct Arguments {
    /// Suppresses the terminal output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Input files.
    /// If only one path is provided for the `logs` source, it is treated as a directory of raw outputs.
    pub input_paths: Vec<PathBuf>,

    /// Input source: `checkpoint` (default) or `logs`.
    #[arg(long, default_value_t = sweep_converter::InputSource::Checkpoint)]
    pub input_source: sweep_converter::InputSource,

    /// Report output format: `xlsx` (default), `csv`, or `json`.
    #[arg(long, default_value_t = sweep_converter::OutputFormat::Xlsx)]
    pub output_format: sweep_converter::OutputFormat,

    /// Output file.
    #[arg(long)]
    pub output_path: PathBuf,
}
