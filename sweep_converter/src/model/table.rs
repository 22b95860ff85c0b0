//!
//! One report table.
//!

use std::collections::BTreeMap;

use revision_sweeper::RevisionRecord;

use crate::input::LogInput;
use crate::model::label::Label;
use crate::model::row::Row;

///
/// One report table.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Table {
    /// The table identity.
    pub label: Label,
    /// The rows in output order.
    pub rows: Vec<Row>,
}

///
/// The aggregation key, ordered by collective, data type, and element count.
///
type Key = (String, String, i64, i64, String, i64);

impl Table {
    ///
    /// One table per revision, in sweep order.
    ///
    pub fn from_records(records: Vec<RevisionRecord>) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self {
                label: Label::Revision {
                    index: record.index,
                    commit: record.revision_id,
                    build_failed: record.build_failed,
                },
                rows: record.samples.into_iter().map(Row::from).collect(),
            })
            .collect()
    }

    ///
    /// One table per collective and data type.
    ///
    /// Samples with equal size, element count, data type, reduction operator, root, and
    /// collective are averaged over all inputs.
    ///
    pub fn from_logs(inputs: Vec<LogInput>) -> Vec<Self> {
        let mut groups: BTreeMap<Key, (Row, usize)> = BTreeMap::new();
        for input in inputs.into_iter() {
            for sample in input.samples.into_iter() {
                let row = Row::from(sample);
                let key = (
                    input.collective.clone(),
                    row.data_type.clone(),
                    row.elements,
                    row.size,
                    row.reduce_op.clone(),
                    row.root,
                );
                match groups.get_mut(&key) {
                    Some((sum, count)) => {
                        sum.out_of_place.add(&row.out_of_place);
                        sum.in_place.add(&row.in_place);
                        *count += 1;
                    }
                    None => {
                        groups.insert(key, (row, 1));
                    }
                }
            }
        }

        let mut tables: Vec<Self> = Vec::new();
        for ((collective, data_type, ..), (mut row, count)) in groups.into_iter() {
            row.out_of_place.divide(count as f64);
            row.in_place.divide(count as f64);

            let label = Label::Collective {
                collective,
                data_type,
            };
            match tables.last_mut() {
                Some(table) if table.label == label => table.rows.push(row),
                _ => tables.push(Self {
                    label,
                    rows: vec![row],
                }),
            }
        }
        tables
    }
}
