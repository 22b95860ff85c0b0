//!
//! The converter output tests.
//!

use revision_sweeper::MetricSample;
use revision_sweeper::RevisionRecord;

use crate::input::source::Source;
use crate::model::table::Table;
use crate::model::Report;
use crate::output::csv::Csv;
use crate::output::format::Format;
use crate::output::json::Json;
use crate::output::xlsx::Xlsx;
use crate::output::Output;

fn sample(size: i64, bus_bandwidth: f64) -> MetricSample {
    MetricSample {
        size,
        elements: size / 4,
        data_type: "float".to_owned(),
        reduce_op: "sum".to_owned(),
        root: -1,
        out_of_place_time: 5.5,
        out_of_place_alg_bandwidth: 1.0,
        out_of_place_bus_bandwidth: bus_bandwidth,
        out_of_place_error_count: 0,
        in_place_time: 6.0,
        in_place_alg_bandwidth: 1.0,
        in_place_bus_bandwidth: 2.0,
        in_place_error_count: 0,
    }
}

fn checkpoint_report() -> Report {
    let records = vec![
        RevisionRecord::new(0, "abc1234".to_owned(), vec![sample(1024, 3.0)]),
        RevisionRecord::new(
            1,
            "def5678".to_owned(),
            vec![sample(1024, 4.0), sample(2048, f64::NAN)],
        ),
    ];
    Report::new(Source::Checkpoint, Table::from_records(records))
}

#[test]
fn csv_has_one_line_per_row() {
    let csv = Csv::from(checkpoint_report());
    let lines = csv.content.lines().collect::<Vec<&str>>();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with(r#""index", "commit", "size""#));
    assert_eq!(
        lines[1],
        r#"0, "abc1234", 1024, 256, "float", "sum", -1, 5.5, 1, 3, 0, 6, 1, 2, 0"#
    );
    assert!(lines[3].contains("NaN"));
}

#[test]
fn csv_logs_lead_with_collective() {
    let tables = Table::from_logs(vec![crate::input::LogInput {
        collective: "all_reduce".to_owned(),
        samples: vec![sample(64, 1.0)],
    }]);
    let csv = Csv::from(Report::new(Source::Logs, tables));

    let lines = csv.content.lines().collect::<Vec<&str>>();
    assert!(lines[0].starts_with(r#""collective", "size""#));
    assert!(lines[1].starts_with(r#""all_reduce", 64, 16"#));
}

#[test]
fn json_keeps_non_finite_values() {
    let json = Json::from(checkpoint_report());
    let value: serde_json::Value = serde_json::from_str(json.content.as_str()).expect("Always valid");

    assert_eq!(value["source"], "checkpoint");
    assert!(value["generated"].is_string());
    assert_eq!(value["tables"][1]["label"]["commit"], "def5678");
    assert_eq!(
        value["tables"][1]["rows"][1]["out_of_place"]["busbw(GB/s)"],
        "NaN"
    );
}

#[test]
fn format_names() {
    assert_eq!("XLSX".parse::<Format>().expect("Always valid"), Format::Xlsx);
    assert_eq!("csv".parse::<Format>().expect("Always valid"), Format::Csv);
    assert!("yaml".parse::<Format>().is_err());
    assert_eq!(Format::default().to_string(), "xlsx");
}

#[test]
fn xlsx_is_written() {
    let directory = tempfile::tempdir().expect("Always valid");
    let path = directory.path().join("reports").join("sweep.xlsx");

    let output = Output::try_from((checkpoint_report(), Format::Xlsx)).expect("Always valid");
    output.write_to_file(path.clone()).expect("Always valid");

    let metadata = std::fs::metadata(path).expect("Always valid");
    assert!(metadata.len() > 0);
}

#[test]
fn text_is_written() {
    let directory = tempfile::tempdir().expect("Always valid");
    let path = directory.path().join("sweep.csv");

    let output = Output::try_from((checkpoint_report(), Format::Csv)).expect("Always valid");
    output.write_to_file(path.clone()).expect("Always valid");

    let content = std::fs::read_to_string(path).expect("Always valid");
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn xlsx_sheet_names_are_unique() {
    let inputs = ["variant_a", "variant_b", "variant_c"]
        .into_iter()
        .map(|variant| crate::input::LogInput {
            collective: format!("reduce_scatter_experimental_{variant}"),
            samples: vec![sample(64, 1.0)],
        })
        .collect::<Vec<crate::input::LogInput>>();
    let report = Report::new(Source::Logs, Table::from_logs(inputs));

    let xlsx = Xlsx::try_from(report).expect("Always valid");
    let names = xlsx
        .worksheets
        .iter()
        .map(|worksheet| worksheet.worksheet.name())
        .collect::<Vec<String>>();

    assert_eq!(
        names,
        vec![
            "reduce_scatter_experimental_var",
            "reduce_scatter_experimental (2)",
            "reduce_scatter_experimental (3)",
        ]
    );

    let directory = tempfile::tempdir().expect("Always valid");
    let path = directory.path().join("logs.xlsx");
    Output::from(xlsx)
        .write_to_file(path.clone())
        .expect("Always valid");
    assert!(path.is_file());
}
