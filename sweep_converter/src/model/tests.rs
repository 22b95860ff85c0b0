//!
//! The converter data model tests.
//!

use revision_sweeper::MetricSample;
use revision_sweeper::RevisionRecord;

use crate::input::LogInput;
use crate::model::label::Label;
use crate::model::table::Table;

fn sample(data_type: &str, elements: i64, bus_bandwidth: f64, errors: i64) -> MetricSample {
    MetricSample {
        size: elements * 4,
        elements,
        data_type: data_type.to_owned(),
        reduce_op: "sum".to_owned(),
        root: -1,
        out_of_place_time: 10.0,
        out_of_place_alg_bandwidth: bus_bandwidth / 2.0,
        out_of_place_bus_bandwidth: bus_bandwidth,
        out_of_place_error_count: errors,
        in_place_time: 20.0,
        in_place_alg_bandwidth: 1.0,
        in_place_bus_bandwidth: 2.0,
        in_place_error_count: 0,
    }
}

fn log(collective: &str, samples: Vec<MetricSample>) -> LogInput {
    LogInput {
        collective: collective.to_owned(),
        samples,
    }
}

#[test]
fn equal_samples_are_averaged() {
    let tables = Table::from_logs(vec![
        log("all_reduce", vec![sample("float", 256, 10.0, 0)]),
        log("all_reduce", vec![sample("float", 256, 20.0, 1)]),
    ]);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].rows.len(), 1);
    let row = &tables[0].rows[0];
    assert_eq!(row.out_of_place.bus_bandwidth, 15.0);
    assert_eq!(row.out_of_place.alg_bandwidth, 7.5);
    assert_eq!(row.out_of_place.errors, 0.5);
    assert_eq!(row.in_place.time, 20.0);
}

#[test]
fn tables_split_by_collective_and_type() {
    let tables = Table::from_logs(vec![
        log(
            "reduce",
            vec![sample("half", 1024, 1.0, 0), sample("float", 8, 1.0, 0)],
        ),
        log("all_reduce", vec![sample("float", 1024, 1.0, 0)]),
    ]);

    let labels = tables
        .iter()
        .map(|table| table.label.sheet_name())
        .collect::<Vec<String>>();
    assert_eq!(labels, vec!["all_reduce float", "reduce float", "reduce half"]);
}

#[test]
fn rows_sorted_by_elements() {
    let tables = Table::from_logs(vec![log(
        "all_reduce",
        vec![
            sample("float", 4096, 1.0, 0),
            sample("float", 2, 1.0, 0),
            sample("float", 64, 1.0, 0),
        ],
    )]);

    let elements = tables[0]
        .rows
        .iter()
        .map(|row| row.elements)
        .collect::<Vec<i64>>();
    assert_eq!(elements, vec![2, 64, 4096]);
}

#[test]
fn records_keep_sweep_order() {
    let records = vec![
        RevisionRecord::new(0, "abc1234".to_owned(), vec![sample("float", 1, 1.0, 0)]),
        RevisionRecord::new(1, "def5678".to_owned(), vec![]).with_build_failed(true),
    ];

    let tables = Table::from_records(records);

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].label.caption(), "#0 abc1234");
    assert_eq!(tables[1].label.caption(), "#1 def5678 (build failed)");
    assert!(tables[1].rows.is_empty());
}

#[test]
fn sheet_name_is_truncated_and_sanitized() {
    let label = Label::Collective {
        collective: "reduce_scatter/experimental".to_owned(),
        data_type: "bfloat16".to_owned(),
    };

    let name = label.sheet_name();
    assert_eq!(name.chars().count(), Label::SHEET_NAME_LIMIT);
    assert!(name.starts_with("reduce_scatter_experimental bfl"));
}
