//! Flat output records and rejections.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One exam flattened into a single-level column mapping.
///
/// Columns keep insertion order; that order becomes the header order when the
/// record is the first one written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<(String, String)>,
}

impl FlatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column. An existing column keeps its position and takes the new value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Merges `other` into `self`; on a shared column the value from `other` wins.
    pub fn merge(&mut self, other: FlatRecord) {
        for (column, value) in other.fields {
            self.insert(column, value);
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn key_set(&self) -> BTreeSet<&str> {
        self.columns().collect()
    }

    /// True when the record has exactly the columns in `header`, in any order.
    pub fn matches_header(&self, header: &[String]) -> bool {
        let expected: BTreeSet<&str> = header.iter().map(String::as_str).collect();
        self.fields.len() == header.len() && self.key_set() == expected
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON object, one line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Why a threshold test could not produce an analyzable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InvalidReason {
    /// No threshold-test node anywhere under the patient.
    MissingTestNode,
    /// The threshold test has no summary block.
    MissingSummary,
    /// A mandatory summary statistic is absent.
    MissingStatistic(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTestNode => write!(f, "no threshold test found"),
            Self::MissingSummary => write!(f, "threshold test has no summary block"),
            Self::MissingStatistic(name) => write!(f, "summary statistic {name} is missing"),
        }
    }
}

/// An exam or row that was left out of the tabular output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedRecord {
    /// The exam could not be assembled; only the patient identity is kept.
    Structural {
        identity: FlatRecord,
        reason: InvalidReason,
    },
    /// The record was assembled but its columns disagree with the header.
    Write(FlatRecord),
}

impl RejectedRecord {
    pub fn record(&self) -> &FlatRecord {
        match self {
            Self::Structural { identity, .. } => identity,
            Self::Write(record) => record,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }

    /// Single-line text written to the error sidecar.
    pub fn to_line(&self) -> String {
        self.record().to_json()
    }
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
