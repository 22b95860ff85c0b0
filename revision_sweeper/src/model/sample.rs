//!
//! One measured data point of a benchmark invocation.
//!

///
/// One measured data point of a benchmark invocation.
///
/// The serialized key names are shared with the downstream reporting tools and must not change.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricSample {
    /// The payload size in bytes.
    pub size: i64,
    /// The element count.
    pub elements: i64,
    /// The element data type, e.g. `float`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// The reduction operator, or [`MetricSample::REDUCE_OP_NONE`].
    #[serde(rename = "redop")]
    pub reduce_op: String,
    /// The root rank, or a negative value if not applicable.
    pub root: i64,

    /// The out-of-place operation time in microseconds.
    #[serde(rename = "op_time(us)", with = "crate::util::float")]
    pub out_of_place_time: f64,
    /// The out-of-place algorithm bandwidth in GB/s.
    #[serde(rename = "op_algbw(GB/s)", with = "crate::util::float")]
    pub out_of_place_alg_bandwidth: f64,
    /// The out-of-place bus bandwidth in GB/s.
    #[serde(rename = "op_busbw(GB/s)", with = "crate::util::float")]
    pub out_of_place_bus_bandwidth: f64,
    /// The out-of-place wrong results count.
    #[serde(rename = "op_wrong")]
    pub out_of_place_error_count: i64,

    /// The in-place operation time in microseconds.
    #[serde(rename = "ip_time(us)", with = "crate::util::float")]
    pub in_place_time: f64,
    /// The in-place algorithm bandwidth in GB/s.
    #[serde(rename = "ip_algbw(GB/s)", with = "crate::util::float")]
    pub in_place_alg_bandwidth: f64,
    /// The in-place bus bandwidth in GB/s.
    #[serde(rename = "ip_busbw(GB/s)", with = "crate::util::float")]
    pub in_place_bus_bandwidth: f64,
    /// The in-place wrong results count.
    #[serde(rename = "ip_wrong")]
    pub in_place_error_count: i64,
}

impl MetricSample {
    /// The reduction operator of benchmark variants without a reduction.
    pub const REDUCE_OP_NONE: &'static str = "none";
}
