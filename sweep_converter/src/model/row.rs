//!
//! One report row.
//!

use revision_sweeper::MetricSample;

///
/// The measurements of one placement variant.
///
/// Error counts are floats, since aggregated rows hold means.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Measurement {
    /// The operation time in microseconds.
    #[serde(rename = "time(us)", with = "revision_sweeper::util::float")]
    pub time: f64,
    /// The algorithm bandwidth in GB/s.
    #[serde(rename = "algbw(GB/s)", with = "revision_sweeper::util::float")]
    pub alg_bandwidth: f64,
    /// The bus bandwidth in GB/s.
    #[serde(rename = "busbw(GB/s)", with = "revision_sweeper::util::float")]
    pub bus_bandwidth: f64,
    /// The wrong results count.
    #[serde(rename = "wrong", with = "revision_sweeper::util::float")]
    pub errors: f64,
}

impl Measurement {
    ///
    /// Adds the other measurement element-wise.
    ///
    pub fn add(&mut self, other: &Self) {
        self.time += other.time;
        self.alg_bandwidth += other.alg_bandwidth;
        self.bus_bandwidth += other.bus_bandwidth;
        self.errors += other.errors;
    }

    ///
    /// Divides every value by `divisor`.
    ///
    pub fn divide(&mut self, divisor: f64) {
        self.time /= divisor;
        self.alg_bandwidth /= divisor;
        self.bus_bandwidth /= divisor;
        self.errors /= divisor;
    }

    ///
    /// The values in column order.
    ///
    pub fn values(&self) -> [f64; 4] {
        [self.time, self.alg_bandwidth, self.bus_bandwidth, self.errors]
    }
}

///
/// One report row.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Row {
    /// The payload size in bytes.
    pub size: i64,
    /// The element count.
    pub elements: i64,
    /// The element data type.
    #[serde(rename = "type")]
    pub data_type: String,
    /// The reduction operator.
    #[serde(rename = "redop")]
    pub reduce_op: String,
    /// The root rank.
    pub root: i64,
    /// The out-of-place measurements.
    pub out_of_place: Measurement,
    /// The in-place measurements.
    pub in_place: Measurement,
}

impl From<MetricSample> for Row {
    fn from(sample: MetricSample) -> Self {
        Self {
            size: sample.size,
            elements: sample.elements,
            data_type: sample.data_type,
            reduce_op: sample.reduce_op,
            root: sample.root,
            out_of_place: Measurement {
                time: sample.out_of_place_time,
                alg_bandwidth: sample.out_of_place_alg_bandwidth,
                bus_bandwidth: sample.out_of_place_bus_bandwidth,
                errors: sample.out_of_place_error_count as f64,
            },
            in_place: Measurement {
                time: sample.in_place_time,
                alg_bandwidth: sample.in_place_alg_bandwidth,
                bus_bandwidth: sample.in_place_bus_bandwidth,
                errors: sample.in_place_error_count as f64,
            },
        }
    }
}
