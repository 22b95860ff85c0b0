//!
//! The converter output.
//!

#[cfg(test)]
mod tests;

pub mod csv;
pub mod format;
pub mod json;
pub mod xlsx;

use std::path::PathBuf;

use crate::model::Report;

use self::csv::Csv;
use self::format::Format;
use self::json::Json;
use self::xlsx::Xlsx;

///
/// The converted report ready to be written.
///
pub enum Output {
    /// A single text file.
    SingleFile(String),
    /// A single workbook.
    SingleFileXlsx(rust_xlsxwriter::Workbook),
}

impl Output {
    ///
    /// Writes the report to the file.
    ///
    pub fn write_to_file(self, path: PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|error| anyhow::anyhow!("Report directory {parent:?} creating: {error}"))?;
        }
        match self {
            Output::SingleFile(content) => {
                std::fs::write(path.as_path(), content)
                    .map_err(|error| anyhow::anyhow!("Report file {path:?} writing: {error}"))?;
            }
            Output::SingleFileXlsx(mut workbook) => {
                workbook
                    .save(path.as_path())
                    .map_err(|error| anyhow::anyhow!("Report file {path:?} writing: {error}"))?;
            }
        }
        Ok(())
    }
}

impl TryFrom<(Report, Format)> for Output {
    type Error = anyhow::Error;

    fn try_from((report, output_format): (Report, Format)) -> Result<Self, Self::Error> {
        Ok(match output_format {
            Format::Xlsx => Xlsx::try_from(report)?.into(),
            Format::Csv => Csv::from(report).into(),
            Format::Json => Json::from(report).into(),
        })
    }
}

impl From<Xlsx> for Output {
    fn from(value: Xlsx) -> Self {
        Output::SingleFileXlsx(value.finalize())
    }
}

impl From<Csv> for Output {
    fn from(value: Csv) -> Self {
        Output::SingleFile(value.content)
    }
}

impl From<Json> for Output {
    fn from(value: Json) -> Self {
        Output::SingleFile(value.content)
    }
}
