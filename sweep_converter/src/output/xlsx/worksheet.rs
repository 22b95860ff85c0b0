//!
//! XLSX worksheet for report tables.
//!

///
/// XLSX worksheet for report tables.
///
/// The first row holds the captions, the second row the column headers, and the data
/// starts at the third row.
///
pub struct Worksheet {
    /// The inner worksheet.
    pub worksheet: rust_xlsxwriter::Worksheet,
    /// Header names and their column widths.
    pub headers: Vec<(&'static str, usize)>,
}

impl Worksheet {
    /// The caption row index.
    pub const CAPTION_ROW: u32 = 0;

    /// The header row index.
    pub const HEADER_ROW: u32 = 1;

    /// The first data row index.
    pub const FIRST_DATA_ROW: u32 = 2;

    /// Width of columns that contain values.
    const VALUE_COLUMN_WIDTH: f64 = 12.0;

    /// Height of the header row, which holds two-line captions.
    const HEADER_ROW_HEIGHT: f64 = 32.0;

    ///
    /// Creates a new worksheet with the given name.
    ///
    pub fn new(name: &str, headers: Vec<(&'static str, usize)>) -> anyhow::Result<Self> {
        let mut worksheet = rust_xlsxwriter::Worksheet::new();
        worksheet.set_name(name)?;
        worksheet.set_row_height(Self::HEADER_ROW, Self::HEADER_ROW_HEIGHT)?;
        worksheet.set_freeze_panes(Self::FIRST_DATA_ROW, 0)?;

        for (header_index, (header_name, column_width)) in headers.iter().enumerate() {
            worksheet.write_with_format(
                Self::HEADER_ROW,
                header_index as u16,
                header_name.to_owned(),
                &Self::column_header_format(),
            )?;
            worksheet.set_column_width(header_index as u16, *column_width as f64)?;
        }

        Ok(Self { worksheet, headers })
    }

    ///
    /// Writes a caption spanning the columns.
    ///
    pub fn write_caption(
        &mut self,
        first_column: u16,
        last_column: u16,
        caption: &str,
    ) -> anyhow::Result<()> {
        if first_column == last_column {
            self.worksheet.write_with_format(
                Self::CAPTION_ROW,
                first_column,
                caption,
                &Self::worksheet_caption_format(),
            )?;
        } else {
            self.worksheet.merge_range(
                Self::CAPTION_ROW,
                first_column,
                Self::CAPTION_ROW,
                last_column,
                caption,
                &Self::worksheet_caption_format(),
            )?;
        }
        Ok(())
    }

    ///
    /// Adds a value column after the fixed headers.
    ///
    pub fn add_value_column(&mut self, column: u16, header: &str) -> anyhow::Result<()> {
        self.worksheet
            .set_column_width(column, Self::VALUE_COLUMN_WIDTH)?;
        self.worksheet.write_with_format(
            Self::HEADER_ROW,
            column,
            header,
            &Self::column_header_format(),
        )?;
        Ok(())
    }

    ///
    /// Writes a row identifying text.
    ///
    pub fn write_label(&mut self, row: u32, column: u16, text: &str) -> anyhow::Result<()> {
        self.worksheet
            .write_with_format(row, column, text, &Self::row_header_format())?;
        Ok(())
    }

    ///
    /// Writes a row identifying number.
    ///
    pub fn write_integer(&mut self, row: u32, column: u16, value: i64) -> anyhow::Result<()> {
        self.worksheet
            .write_with_format(row, column, value as f64, &Self::row_header_format())?;
        Ok(())
    }

    ///
    /// Writes a measured value. Values that are not finite are written as text.
    ///
    pub fn write_value(&mut self, row: u32, column: u16, value: f64) -> anyhow::Result<()> {
        if value.is_finite() {
            self.worksheet
                .write_with_format(row, column, value, &Self::value_format())?;
        } else {
            self.worksheet
                .write_with_format(row, column, value.to_string(), &Self::value_format())?;
        }
        Ok(())
    }

    ///
    /// Finalizes the worksheet and returns its inner object.
    ///
    pub fn into_inner(self) -> rust_xlsxwriter::Worksheet {
        self.worksheet
    }

    ///
    /// Returns the eponymous cell format.
    ///
    fn worksheet_caption_format() -> rust_xlsxwriter::Format {
        let format = rust_xlsxwriter::Format::new();
        let format = format.set_bold();
        let format = format.set_font_size(14);
        let format = format.set_font_color("#FFFFFF");
        let format = format.set_background_color("#4C6EF5");
        let format = format.set_align(rust_xlsxwriter::FormatAlign::Center);
        let format = format.set_align(rust_xlsxwriter::FormatAlign::VerticalCenter);
        let format = format.set_border(rust_xlsxwriter::FormatBorder::Thin);
        format
    }

    ///
    /// Returns the eponymous cell format.
    ///
    fn column_header_format() -> rust_xlsxwriter::Format {
        let format = rust_xlsxwriter::Format::new();
        let format = format.set_bold();
        let format = format.set_font_size(11);
        let format = format.set_font_color("#1E1E1E");
        let format = format.set_background_color("#EEF3FF");
        let format = format.set_align(rust_xlsxwriter::FormatAlign::Center);
        let format = format.set_align(rust_xlsxwriter::FormatAlign::VerticalCenter);
        let format = format.set_text_wrap();
        let format = format.set_border(rust_xlsxwriter::FormatBorder::Thin);
        format
    }

    ///
    /// Returns the eponymous cell format.
    ///
    fn row_header_format() -> rust_xlsxwriter::Format {
        let format = rust_xlsxwriter::Format::new();
        let format = format.set_font_size(11);
        let format = format.set_font_color("#1E1E1E");
        let format = format.set_background_color("#DDE6FF");
        let format = format.set_align(rust_xlsxwriter::FormatAlign::Center);
        let format = format.set_border(rust_xlsxwriter::FormatBorder::None);
        format
    }

    ///
    /// Returns the eponymous cell format.
    ///
    fn value_format() -> rust_xlsxwriter::Format {
        let format = rust_xlsxwriter::Format::new();
        let format = format.set_font_size(11);
        let format = format.set_font_color("#000000");
        let format = format.set_background_color("#FFFFFF");
        let format = format.set_align(rust_xlsxwriter::FormatAlign::Right);
        let format = format.set_border(rust_xlsxwriter::FormatBorder::None);
        format
    }
}
