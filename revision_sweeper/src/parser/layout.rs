//!
//! The column layouts of a benchmark observation line.
//!

use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;

use crate::model::sample::MetricSample;

/// An integer column.
const INTEGER: &str = r"-?\d+";
/// A time or bandwidth column.
const DECIMAL: &str = r"-?\d+(?:\.\d+)?";
/// A token column, such as the data type.
const TOKEN: &str = r"\S+";

///
/// Builds a line pattern, with or without the reduction operator column.
///
fn pattern(with_reduce_op: bool) -> Regex {
    let reduce_op = if with_reduce_op {
        format!(r"\s+(?P<reduce_op>{TOKEN})")
    } else {
        String::new()
    };
    let measurement = |prefix: &str| {
        format!(
            r"\s+(?P<{prefix}_time>{DECIMAL})\s+(?P<{prefix}_alg_bandwidth>{DECIMAL})\s+(?P<{prefix}_bus_bandwidth>{DECIMAL})\s+(?P<{prefix}_error_count>{TOKEN})"
        )
    };
    let pattern = format!(
        r"^\s*(?P<size>{INTEGER})\s+(?P<elements>{INTEGER})\s+(?P<data_type>{TOKEN}){reduce_op}\s+(?P<root>{INTEGER}){}{}(?:\s|$)",
        measurement("out_of_place"),
        measurement("in_place"),
    );
    Regex::new(pattern.as_str()).expect("Always valid")
}

/// The layout with the reduction operator column, 13 columns.
static WITH_REDUCE_OP: Lazy<Regex> = Lazy::new(|| pattern(true));

/// The layout without the reduction operator column, 12 columns.
static WITHOUT_REDUCE_OP: Lazy<Regex> = Lazy::new(|| pattern(false));

///
/// The time, bandwidth, and correctness columns of one placement mode.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<'a> {
    /// The operation time.
    pub time: &'a str,
    /// The algorithm bandwidth.
    pub alg_bandwidth: &'a str,
    /// The bus bandwidth.
    pub bus_bandwidth: &'a str,
    /// The wrong results count, or `N/A`.
    pub error_count: &'a str,
}

///
/// The columns shared by both layouts.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Columns<'a> {
    /// The payload size.
    pub size: &'a str,
    /// The element count.
    pub elements: &'a str,
    /// The data type.
    pub data_type: &'a str,
    /// The root rank.
    pub root: &'a str,
    /// The out-of-place measurement.
    pub out_of_place: Measurement<'a>,
    /// The in-place measurement.
    pub in_place: Measurement<'a>,
}

///
/// The result of matching a line against the known layouts.
///
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch<'a> {
    /// Layout A: the reduction operator is the fourth column.
    WithReduceOp {
        /// The reduction operator.
        reduce_op: &'a str,
        /// The remaining columns.
        columns: Columns<'a>,
    },
    /// Layout B: no reduction operator column.
    WithoutReduceOp {
        /// The columns.
        columns: Columns<'a>,
    },
    /// The line is not an observation.
    Unparsed,
}

impl<'a> LineMatch<'a> {
    ///
    /// Matches the line against the layout with the reduction operator first.
    ///
    pub fn classify(line: &'a str) -> Self {
        if let Some(captures) = WITH_REDUCE_OP.captures(line) {
            return Self::WithReduceOp {
                reduce_op: Self::column(&captures, "reduce_op"),
                columns: Columns::from(&captures),
            };
        }
        if let Some(captures) = WITHOUT_REDUCE_OP.captures(line) {
            return Self::WithoutReduceOp {
                columns: Columns::from(&captures),
            };
        }
        Self::Unparsed
    }

    ///
    /// Converts the matched columns into a sample.
    ///
    /// Returns `None` for unparsed lines and for numeric columns out of range.
    ///
    pub fn into_sample(self) -> Option<MetricSample> {
        let (reduce_op, columns) = match self {
            Self::WithReduceOp { reduce_op, columns } => (reduce_op, columns),
            Self::WithoutReduceOp { columns } => (MetricSample::REDUCE_OP_NONE, columns),
            Self::Unparsed => return None,
        };

        Some(MetricSample {
            size: columns.size.parse().ok()?,
            elements: columns.elements.parse().ok()?,
            data_type: columns.data_type.to_owned(),
            reduce_op: reduce_op.to_owned(),
            root: columns.root.parse().ok()?,

            out_of_place_time: columns.out_of_place.time.parse().ok()?,
            out_of_place_alg_bandwidth: columns.out_of_place.alg_bandwidth.parse().ok()?,
            out_of_place_bus_bandwidth: columns.out_of_place.bus_bandwidth.parse().ok()?,
            out_of_place_error_count: error_count(columns.out_of_place.error_count),

            in_place_time: columns.in_place.time.parse().ok()?,
            in_place_alg_bandwidth: columns.in_place.alg_bandwidth.parse().ok()?,
            in_place_bus_bandwidth: columns.in_place.bus_bandwidth.parse().ok()?,
            in_place_error_count: error_count(columns.in_place.error_count),
        })
    }

    ///
    /// Returns a named column of a successful match.
    ///
    fn column(captures: &Captures<'a>, name: &str) -> &'a str {
        captures
            .name(name)
            .map(|column| column.as_str())
            .expect("Always exists")
    }
}

impl<'a> From<&Captures<'a>> for Columns<'a> {
    fn from(captures: &Captures<'a>) -> Self {
        let measurement = |prefix: &str| Measurement {
            time: LineMatch::column(captures, format!("{prefix}_time").as_str()),
            alg_bandwidth: LineMatch::column(captures, format!("{prefix}_alg_bandwidth").as_str()),
            bus_bandwidth: LineMatch::column(captures, format!("{prefix}_bus_bandwidth").as_str()),
            error_count: LineMatch::column(captures, format!("{prefix}_error_count").as_str()),
        };
        Self {
            size: LineMatch::column(captures, "size"),
            elements: LineMatch::column(captures, "elements"),
            data_type: LineMatch::column(captures, "data_type"),
            root: LineMatch::column(captures, "root"),
            out_of_place: measurement("out_of_place"),
            in_place: measurement("in_place"),
        }
    }
}

///
/// Decodes a wrong results count.
///
/// Optionally signed digit strings are parsed, anything else, including `N/A`, counts as zero.
///
pub fn error_count(token: &str) -> i64 {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return 0;
    }
    token.parse().unwrap_or_default()
}
