//!
//! The converter data model.
//!

#[cfg(test)]
mod tests;

pub mod label;
pub mod row;
pub mod table;

use crate::input::source::Source;

use self::table::Table;

///
/// The converted report.
///
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    /// The input source.
    pub source: Source,
    /// The conversion time.
    pub generated: chrono::DateTime<chrono::Utc>,
    /// The tables in output order.
    pub tables: Vec<Table>,
}

impl Report {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(source: Source, tables: Vec<Table>) -> Self {
        Self {
            source,
            generated: chrono::Utc::now(),
            tables,
        }
    }
}
