//! Threshold test extraction.
//!
//! A threshold test yields three indexed location lists (`TH_i`, `TD_i`,
//! `PD_i`, 1-based, in document order) and four summary statistics. The
//! statistics are mandatory: if the summary block or any one of them is
//! missing the whole exam is unusable, unlike study metadata which falls back
//! to empty strings.

use tracing::debug;

use hvf_model::{ExportLayout, FlatRecord, InvalidReason, LocationList, Node};

use crate::locate::locate_first;

/// Result of extracting a threshold test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThresholdOutcome {
    Valid(FlatRecord),
    Invalid(InvalidReason),
}

/// The threshold test for a patient: the first one found anywhere in the subtree.
///
/// When several tests share a parent they form a sequence; the first mapping
/// in it is used.
pub fn find_threshold_test<'a>(patient: &'a Node, layout: &ExportLayout) -> Option<&'a Node> {
    match locate_first(patient, &layout.threshold_test)? {
        Node::Sequence(items) => items.iter().find(|item| item.as_mapping().is_some()),
        other => Some(other),
    }
}

pub fn extract_threshold(test: &Node, layout: &ExportLayout) -> ThresholdOutcome {
    let mut record = FlatRecord::new();
    push_locations(&mut record, test, &layout.threshold_sites);

    let Some(summary) = test.get(&layout.summary) else {
        debug!(summary = %layout.summary, "threshold test without summary block");
        return ThresholdOutcome::Invalid(InvalidReason::MissingSummary);
    };
    for statistic in &layout.statistics {
        let Some(value) = locate_first(summary, statistic) else {
            debug!(statistic = %statistic, "summary statistic missing");
            return ThresholdOutcome::Invalid(InvalidReason::MissingStatistic(statistic.clone()));
        };
        record.insert(statistic.as_str(), value.to_text());
    }

    push_locations(&mut record, summary, &layout.total_deviation);
    push_locations(&mut record, summary, &layout.pattern_deviation);
    ThresholdOutcome::Valid(record)
}

/// Appends `<prefix>_<i>` columns for each location under `container`.
///
/// A missing list adds nothing; a location without a value element adds an
/// empty cell.
fn push_locations(record: &mut FlatRecord, container: &Node, list: &LocationList) {
    let locations = container
        .get(&list.list)
        .and_then(|node| node.get(&list.location))
        .map(Node::items)
        .unwrap_or_default();
    for (offset, location) in locations.iter().enumerate() {
        let value = location
            .get(&list.value)
            .map(Node::to_text)
            .unwrap_or_default();
        record.insert(list.column(offset + 1), value);
    }
}
