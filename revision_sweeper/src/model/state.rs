//!
//! The accumulated state of a sweep.
//!

use crate::model::record::RevisionRecord;

///
/// The accumulated state of a sweep.
///
/// Serialized as the bare array of records. The position is restored from the record count.
///
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepState {
    /// The records produced so far, ordered by index.
    records: Vec<RevisionRecord>,
    /// The position of the next revision in the sweep plan.
    position: usize,
}

impl SweepState {
    ///
    /// Appends a record and advances the position past it.
    ///
    /// # Panics
    /// If the record index does not continue the sequence. The engine is the only producer.
    ///
    pub fn push(&mut self, record: RevisionRecord) {
        assert_eq!(
            record.index, self.position,
            "Revision records must be appended in sweep order"
        );
        self.records.push(record);
        self.position += 1;
    }

    ///
    /// The records produced so far.
    ///
    pub fn records(&self) -> &[RevisionRecord] {
        self.records.as_slice()
    }

    ///
    /// The position of the next revision in the sweep plan.
    ///
    pub fn position(&self) -> usize {
        self.position
    }

    ///
    /// Whether no revision has been recorded yet.
    ///
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    ///
    /// Consumes the state and returns the records.
    ///
    pub fn into_records(self) -> Vec<RevisionRecord> {
        self.records
    }
}

impl TryFrom<Vec<RevisionRecord>> for SweepState {
    type Error = String;

    fn try_from(records: Vec<RevisionRecord>) -> Result<Self, Self::Error> {
        for (position, record) in records.iter().enumerate() {
            if record.index != position {
                return Err(format!(
                    "record `{}` has index {}, expected {position}",
                    record.revision_id, record.index
                ));
            }
        }
        let position = records.len();
        Ok(Self { records, position })
    }
}

impl serde::Serialize for SweepState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.records, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for SweepState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = <Vec<RevisionRecord> as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(records).map_err(serde::de::Error::custom)
    }
}
