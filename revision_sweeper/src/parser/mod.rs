//!
//! The benchmark output parser.
//!

#[cfg(test)]
mod tests;

pub mod error;
pub mod layout;

use crate::model::sample::MetricSample;

use self::error::Error as ParseError;
use self::layout::LineMatch;

/// The marker of comment lines, which are never data lines.
pub const COMMENT_MARKER: &str = "##";

///
/// Parses the raw output of one benchmark run into samples.
///
/// Lines matching neither column layout are dropped, so banners, headers, and metadata
/// interleaved with the table never cause an error. Samples keep the order of their lines.
///
pub fn parse(text: &str) -> Vec<MetricSample> {
    text.lines()
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .filter_map(|line| LineMatch::classify(line).into_sample())
        .collect()
}

///
/// Parses raw output bytes, failing only if they are not valid UTF-8 text.
///
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<MetricSample>, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(ParseError::NotText)?;
    Ok(parse(text))
}
