//!
//! The revision sweep converter library.
//!

pub mod input;
pub mod model;
pub mod output;
pub mod util;

pub use crate::input::error::Error as InputError;
pub use crate::input::source::Source as InputSource;
pub use crate::input::CheckpointInput;
pub use crate::input::LogInput;
pub use crate::model::label::Label;
pub use crate::model::row::Measurement;
pub use crate::model::row::Row;
pub use crate::model::table::Table;
pub use crate::model::Report;
pub use crate::output::csv::Csv as CsvOutput;
pub use crate::output::format::Format as OutputFormat;
pub use crate::output::json::Json as JsonOutput;
pub use crate::output::xlsx::Xlsx as XlsxOutput;
pub use crate::output::Output;
