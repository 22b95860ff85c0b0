//!
//! Serializing the report to CSV.
//!

use std::fmt::Write;

use crate::input::source::Source;
use crate::model::row::Row;
use crate::model::Report;

///
/// The report serialized to CSV, one line per row.
///
#[derive(Default)]
pub struct Csv {
    /// The CSV string.
    pub content: String,
}

impl Csv {
    /// The columns shared by every source.
    const HEADER: &'static str = r#""size", "elements", "type", "redop", "root", "op_time(us)", "op_algbw(GB/s)", "op_busbw(GB/s)", "op_wrong", "ip_time(us)", "ip_algbw(GB/s)", "ip_busbw(GB/s)", "ip_wrong""#;

    /// The estimated length of a line.
    const LINE_LENGTH_ESTIMATE: usize = 160;

    ///
    /// The leading columns identifying the table of a row.
    ///
    fn key_header(source: Source) -> &'static str {
        match source {
            Source::Checkpoint => r#""index", "commit""#,
            Source::Logs => r#""collective""#,
        }
    }

    ///
    /// Formats the columns shared by every source.
    ///
    fn row_fields(row: &Row) -> String {
        let mut fields = format!(
            r#"{}, {}, "{}", "{}", {}"#,
            row.size, row.elements, row.data_type, row.reduce_op, row.root
        );
        for value in row
            .out_of_place
            .values()
            .into_iter()
            .chain(row.in_place.values())
        {
            write!(fields, ", {value}").expect("Always valid");
        }
        fields
    }
}

impl From<Report> for Csv {
    fn from(report: Report) -> Csv {
        let row_count = report
            .tables
            .iter()
            .map(|table| table.rows.len())
            .sum::<usize>();
        let mut content = String::with_capacity((row_count + 1) * Self::LINE_LENGTH_ESTIMATE);
        writeln!(
            content,
            "{}, {}",
            Self::key_header(report.source),
            Self::HEADER
        )
        .expect("Always valid");

        for table in report.tables.iter() {
            let key_fields = table.label.csv_fields();
            for row in table.rows.iter() {
                writeln!(content, "{key_fields}, {}", Self::row_fields(row)).expect("Always valid");
            }
        }
        Self { content }
    }
}
