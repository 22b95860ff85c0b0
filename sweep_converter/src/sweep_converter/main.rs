//!
//! The sweep converter binary.
//!

pub(crate) mod arguments;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() -> anyhow::Result<()> {
    let arguments = Arguments::try_parse()?;

    let tables = match arguments.input_source {
        sweep_converter::InputSource::Checkpoint => {
            let path = match arguments.input_paths.as_slice() {
                [path] if path.is_file() => path,
                [path] => anyhow::bail!("Expected a result set file, but got {path:?}"),
                [] => anyhow::bail!("No input file provided."),
                _ => anyhow::bail!("Exactly one result set file is expected."),
            };
            let input = sweep_converter::CheckpointInput::try_from(path.as_path())?;
            sweep_converter::Table::from_records(input.records)
        }
        sweep_converter::InputSource::Logs => {
            let input_paths = resolve_logs(arguments.input_paths)?;
            let mut inputs = Vec::with_capacity(input_paths.len());
            for path in input_paths.into_iter() {
                match sweep_converter::LogInput::try_from(path.as_path()) {
                    Ok(input) => inputs.push(input),
                    Err(sweep_converter::InputError::EmptyFile { path }) => {
                        if !arguments.quiet {
                            eprintln!("Warning: Input file {path:?} is empty and will be skipped.");
                        }
                        continue;
                    }
                    Err(error) => Err(error)?,
                }
            }
            sweep_converter::Table::from_logs(inputs)
        }
    };

    let table_count = tables.len();
    let report = sweep_converter::Report::new(arguments.input_source, tables);
    let output: sweep_converter::Output = (report, arguments.output_format).try_into()?;
    output.write_to_file(arguments.output_path.clone())?;

    if !arguments.quiet {
        println!(
            "{:>12} {table_count} tables to {:?}",
            "Converted".bright_green().bold(),
            arguments.output_path,
        );
    }
    Ok(())
}

///
/// Expands a single directory into the raw outputs it contains.
///
fn resolve_logs(input_paths: Vec<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
    match input_paths.as_slice() {
        [] => anyhow::bail!("No input files provided."),
        [directory] if directory.is_dir() => {
            sweep_converter::LogInput::resolve(directory.as_path())
        }
        _ => Ok(input_paths),
    }
}
