//!
//! XLSX output format for report tables.
//!

pub mod worksheet;

use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::input::source::Source;
use crate::model::label::Label;
use crate::model::row::Row;
use crate::model::table::Table;
use crate::model::Report;

use self::worksheet::Worksheet;

///
/// XLSX output format for report tables.
///
#[derive(Default)]
pub struct Xlsx {
    /// The worksheets in workbook order.
    pub worksheets: Vec<Worksheet>,
}

impl Xlsx {
    /// The bus bandwidth summary worksheet name.
    pub const SUMMARY_SHEET_NAME: &'static str = "busbw";

    /// The sample table headers and their column widths.
    const SAMPLE_HEADERS: [(&'static str, usize); 14] = [
        ("size\n[H]", 10),
        ("size\n[B]", 14),
        ("count\n(elements)", 14),
        ("type", 10),
        ("redop", 8),
        ("root", 6),
        ("time\n(us)", 12),
        ("algbw\n(GB/s)", 12),
        ("bus\n(GB/s)", 12),
        ("#wrong", 8),
        ("time\n(us)", 12),
        ("algbw\n(GB/s)", 12),
        ("bus\n(GB/s)", 12),
        ("#wrong", 8),
    ];

    /// The summary table headers and their column widths.
    const SUMMARY_HEADERS: [(&'static str, usize); 2] = [("size\n[H]", 10), ("size\n[B]", 14)];

    ///
    /// Returns the final workbook with all worksheets.
    ///
    pub fn finalize(self) -> rust_xlsxwriter::Workbook {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        for worksheet in self.worksheets.into_iter() {
            workbook.push_worksheet(worksheet.into_inner());
        }
        workbook
    }

    ///
    /// Writes the samples of one table.
    ///
    fn sample_worksheet(table: &Table, name: &str) -> anyhow::Result<Worksheet> {
        let mut worksheet = Worksheet::new(name, Self::SAMPLE_HEADERS.to_vec())?;
        worksheet.write_caption(0, 5, table.label.caption().as_str())?;
        worksheet.write_caption(6, 9, "out-of-place")?;
        worksheet.write_caption(10, 13, "in-place")?;

        for (row_index, row) in table.rows.iter().enumerate() {
            Self::write_row(&mut worksheet, Worksheet::FIRST_DATA_ROW + row_index as u32, row)?;
        }
        Ok(worksheet)
    }

    ///
    /// Returns `name`, or `name` with a numeric suffix if a worksheet with that name is taken.
    ///
    /// Worksheet names are compared case-insensitively and the suffixed name is kept within
    /// the length limit.
    ///
    fn unique_sheet_name(taken: &mut HashSet<String>, name: String) -> String {
        if taken.insert(name.to_lowercase()) {
            return name;
        }
        for number in 2.. {
            let suffix = format!(" ({number})");
            let candidate = name
                .chars()
                .take(Label::SHEET_NAME_LIMIT - suffix.len())
                .chain(suffix.chars())
                .collect::<String>();
            if taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
        }
        unreachable!("The suffix numbers are unbounded")
    }

    ///
    /// Writes one sample row.
    ///
    fn write_row(worksheet: &mut Worksheet, row_index: u32, row: &Row) -> anyhow::Result<()> {
        worksheet.write_label(
            row_index,
            0,
            crate::util::human_readable_size(row.size).as_str(),
        )?;
        worksheet.write_integer(row_index, 1, row.size)?;
        worksheet.write_integer(row_index, 2, row.elements)?;
        worksheet.write_label(row_index, 3, row.data_type.as_str())?;
        worksheet.write_label(row_index, 4, row.reduce_op.as_str())?;
        worksheet.write_integer(row_index, 5, row.root)?;
        for (offset, value) in row
            .out_of_place
            .values()
            .into_iter()
            .chain(row.in_place.values())
            .enumerate()
        {
            worksheet.write_value(row_index, 6 + offset as u16, value)?;
        }
        Ok(())
    }

    ///
    /// Writes the out-of-place bus bandwidth of every revision side by side.
    ///
    /// There is one row per size. If a table has several rows of a size, the last one is shown.
    ///
    fn summary_worksheet(tables: &[Table]) -> anyhow::Result<Worksheet> {
        let mut worksheet =
            Worksheet::new(Self::SUMMARY_SHEET_NAME, Self::SUMMARY_HEADERS.to_vec())?;
        let fixed_columns = Self::SUMMARY_HEADERS.len() as u16;

        let mut size_rows = BTreeMap::new();
        for row in tables.iter().flat_map(|table| table.rows.iter()) {
            size_rows.entry(row.size).or_insert(0u32);
        }
        for (row_offset, (size, row_index)) in size_rows.iter_mut().enumerate() {
            *row_index = Worksheet::FIRST_DATA_ROW + row_offset as u32;
            worksheet.write_label(
                *row_index,
                0,
                crate::util::human_readable_size(*size).as_str(),
            )?;
            worksheet.write_integer(*row_index, 1, *size)?;
        }

        for (table_offset, table) in tables.iter().enumerate() {
            let column = fixed_columns + table_offset as u16;
            let header = match &table.label {
                Label::Revision { index, commit, .. } => format!("{index}\n{commit}"),
                label => label.sheet_name(),
            };
            worksheet.add_value_column(column, header.as_str())?;
            for row in table.rows.iter() {
                worksheet.write_value(
                    size_rows[&row.size],
                    column,
                    row.out_of_place.bus_bandwidth,
                )?;
            }
        }

        worksheet.write_caption(
            0,
            fixed_columns + tables.len() as u16 - 1,
            "out-of-place bus bandwidth (GB/s)",
        )?;
        Ok(worksheet)
    }
}

impl TryFrom<Report> for Xlsx {
    type Error = anyhow::Error;

    fn try_from(report: Report) -> Result<Self, Self::Error> {
        let mut xlsx = Self::default();
        let mut taken = HashSet::new();
        if report.source == Source::Checkpoint && !report.tables.is_empty() {
            taken.insert(Self::SUMMARY_SHEET_NAME.to_owned());
            xlsx.worksheets
                .push(Self::summary_worksheet(report.tables.as_slice())?);
        }
        for table in report.tables.iter() {
            let name = Self::unique_sheet_name(&mut taken, table.label.sheet_name());
            xlsx.worksheets
                .push(Self::sample_worksheet(table, name.as_str())?);
        }
        Ok(xlsx)
    }
}
