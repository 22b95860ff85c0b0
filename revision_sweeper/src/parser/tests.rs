//!
//! The benchmark output parser tests.
//!

use crate::model::sample::MetricSample;

use super::layout::error_count;
use super::layout::LineMatch;

const OUTPUT_ALL_REDUCE: &str = r#"# nThread 1 nGpus 8 minBytes 1 maxBytes 17179869184 step: 2(factor) warmup iters: 5 iters: 1 agg iters: 1 validation: 1 graph: 0
#
rccl-tests: Version develop:ae3e635
# Using devices
#  Rank  0 Group  0 Pid  12345 on     node-1 device  0 [0000:0c:00] AMD Instinct MI300X
#
#                                                              out-of-place                       in-place
#       size         count      type   redop    root     time   algbw   busbw #wrong     time   algbw   busbw #wrong
#        (B)    (elements)                               (us)  (GB/s)  (GB/s)            (us)  (GB/s)  (GB/s)
           4             1     float     sum      -1    45.21    0.00    0.00      0    44.80    0.00    0.00    N/A
        1024           256     float     sum      -1    50.02    0.02    0.04      0    49.77    0.02    0.04    N/A
     1048576        262144     float     sum      -1    12.5     83.9   157.3       0    11.2     93.6   175.4    N/A
## notes 1 2 3 4 5 6 7 8 9 10 11 12 13
# Out of bounds values : 0 OK
# Avg bus bandwidth    : 58.1
"#;

const OUTPUT_ALL_GATHER: &str = r#"#       size         count      type    root     time   algbw   busbw #wrong     time   algbw   busbw #wrong
           8             1     float      -1    20.11    0.00    0.00      0    19.90    0.00    0.00      0
          64             8     float      -1    20.45    0.00    0.00      3    20.01    0.00    0.00     -2
"#;

#[test]
fn reference_line() {
    let samples = super::parse(
        "1048576   262144  float   sum  -1   12.5  83.9  157.3  0   11.2  93.6  175.4  N/A",
    );

    assert_eq!(
        samples,
        vec![MetricSample {
            size: 1048576,
            elements: 262144,
            data_type: "float".to_owned(),
            reduce_op: "sum".to_owned(),
            root: -1,
            out_of_place_time: 12.5,
            out_of_place_alg_bandwidth: 83.9,
            out_of_place_bus_bandwidth: 157.3,
            out_of_place_error_count: 0,
            in_place_time: 11.2,
            in_place_alg_bandwidth: 93.6,
            in_place_bus_bandwidth: 175.4,
            in_place_error_count: 0,
        }]
    );
}

#[test]
fn with_reduce_op_table() {
    let samples = super::parse(OUTPUT_ALL_REDUCE);

    assert_eq!(samples.len(), 3);
    assert_eq!(
        samples.iter().map(|sample| sample.size).collect::<Vec<_>>(),
        vec![4, 1024, 1048576]
    );
    assert!(samples.iter().all(|sample| sample.reduce_op == "sum"));
    assert_eq!(samples[1].out_of_place_time, 50.02);
    assert_eq!(samples[1].in_place_bus_bandwidth, 0.04);
}

#[test]
fn without_reduce_op_table() {
    let samples = super::parse(OUTPUT_ALL_GATHER);

    assert_eq!(samples.len(), 2);
    assert!(samples
        .iter()
        .all(|sample| sample.reduce_op == MetricSample::REDUCE_OP_NONE));
    assert_eq!(samples[1].root, -1);
    assert_eq!(samples[1].out_of_place_time, 20.45);
    assert_eq!(samples[1].out_of_place_error_count, 3);
    assert_eq!(samples[1].in_place_error_count, -2);
}

#[test]
fn layouts_shift_by_one_column() {
    let with = "64 16 float max 0 1.5 2.5 3.5 7 4.5 5.5 6.5 8";
    let without = "64 16 float 0 1.5 2.5 3.5 7 4.5 5.5 6.5 8";

    let (reduce_op, with_columns) = match LineMatch::classify(with) {
        LineMatch::WithReduceOp { reduce_op, columns } => (reduce_op, columns),
        other => panic!("Unexpected match: {other:?}"),
    };
    let without_columns = match LineMatch::classify(without) {
        LineMatch::WithoutReduceOp { columns } => columns,
        other => panic!("Unexpected match: {other:?}"),
    };

    assert_eq!(reduce_op, "max");
    assert_eq!(with_columns, without_columns);
}

#[test]
fn comment_line_dropped() {
    let line = "## notes 1024 256 float sum -1 12.5 83.9 157.3 0 11.2 93.6 175.4 N/A";
    assert!(super::parse(line).is_empty());

    let line = "##1024 256 float sum -1 12.5 83.9 157.3 0 11.2 93.6 175.4 N/A";
    assert!(super::parse(line).is_empty());
}

#[test]
fn short_lines_dropped() {
    for line in [
        "",
        "   ",
        "1024 256 float sum -1 12.5 83.9 157.3 0 11.2 93.6",
        "1024 256 float -1 12.5 83.9 157.3 0 11.2 93.6 175.4",
        "# Avg bus bandwidth : 58.1",
    ] {
        assert_eq!(LineMatch::classify(line), LineMatch::Unparsed, "{line}");
        assert!(super::parse(line).is_empty(), "{line}");
    }
}

#[test]
fn non_numeric_columns_dropped() {
    let line = "1024 256 float sum -1 fast 83.9 157.3 0 11.2 93.6 175.4 0";
    assert!(super::parse(line).is_empty());

    let line = "size count type redop root time algbw busbw wrong time algbw busbw wrong";
    assert!(super::parse(line).is_empty());
}

#[test]
fn negative_size_accepted() {
    let samples = super::parse("-1 0 int8 -1 0.0 0.0 0.0 0 0.0 0.0 0.0 0");

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].size, -1);
}

#[test]
fn error_count_tokens() {
    assert_eq!(error_count("0"), 0);
    assert_eq!(error_count("42"), 42);
    assert_eq!(error_count("-7"), -7);
    assert_eq!(error_count("N/A"), 0);
    assert_eq!(error_count("-"), 0);
    assert_eq!(error_count("1e3"), 0);
    assert_eq!(error_count("+5"), 0);
    assert_eq!(error_count("12.5"), 0);
}

#[test]
fn non_digit_error_count_is_zero() {
    let samples = super::parse("1024 256 float sum -1 12.5 83.9 157.3 bad 11.2 93.6 175.4 N/A");

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].out_of_place_error_count, 0);
    assert_eq!(samples[0].in_place_error_count, 0);
}

#[test]
fn trailing_columns_tolerated() {
    let samples =
        super::parse("  1024 256 float sum -1 12.5 83.9 157.3 0 11.2 93.6 175.4 0 extra tokens");

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].reduce_op, "sum");
}

#[test]
fn bytes_must_be_text() {
    assert!(super::parse_bytes(&[0xff, 0xfe, 0x00]).is_err());

    let samples = super::parse_bytes(OUTPUT_ALL_GATHER.as_bytes()).expect("Always valid");
    assert_eq!(samples.len(), 2);
}
