//! Batch extraction over every patient in an export.

use tracing::{debug, info, info_span, warn};

use hvf_model::{ExportLayout, FlatRecord, InvalidReason, Mapping, Node, RejectedRecord};

use crate::assemble::{Assembly, assemble};
use crate::error::{CoreError, Result};
use crate::patient::extract_patient;
use crate::study::extract_study;
use crate::threshold::{ThresholdOutcome, extract_threshold, find_threshold_test};

/// Accepted records and structural rejections from one export.
///
/// `accepted.len() + rejected.len() == patient_count`.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub patient_count: usize,
    pub accepted: Vec<FlatRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// The patient nodes of a parsed export, in document order.
///
/// A single patient is stored as a mapping rather than a sequence; both
/// are accepted.
pub fn patient_nodes<'a>(document: &'a Node, layout: &ExportLayout) -> Result<&'a [Node]> {
    let patients = document
        .get(&layout.root)
        .and_then(|root| root.get(&layout.patient))
        .filter(|patients| patients.as_scalar().is_none())
        .ok_or_else(|| CoreError::MissingRoot {
            root: layout.root.clone(),
            patient: layout.patient.clone(),
        })?;
    Ok(patients.items())
}

/// Extract one record per patient, routing unusable exams to the rejections.
pub fn process_export(document: &Node, layout: &ExportLayout) -> Result<BatchOutcome> {
    let span = info_span!("extract", root = %layout.root);
    let _guard = span.enter();

    let patients = patient_nodes(document, layout)?;
    info!(patient_count = patients.len(), "found patient records");

    let empty_study = Node::Mapping(Mapping::new());
    let mut outcome = BatchOutcome {
        patient_count: patients.len(),
        ..BatchOutcome::default()
    };
    for (index, patient) in patients.iter().enumerate() {
        let identity = extract_patient(patient, layout);
        let study_node = patient.get(&layout.study).unwrap_or(&empty_study);
        let study = extract_study(study_node, layout);
        let threshold = match find_threshold_test(patient, layout) {
            Some(test) => extract_threshold(test, layout),
            None => ThresholdOutcome::Invalid(InvalidReason::MissingTestNode),
        };

        match assemble(identity, study, threshold) {
            Assembly::Accepted(record) => {
                debug!(patient_index = index, columns = record.len(), "exam accepted");
                outcome.accepted.push(record);
            }
            Assembly::Rejected(rejected) => {
                if let RejectedRecord::Structural { reason, .. } = &rejected {
                    warn!(patient_index = index, reason = %reason, "exam rejected");
                }
                outcome.rejected.push(rejected);
            }
        }
    }

    info!(
        valid = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        "extraction complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_fatal() {
        let document = Node::from(Mapping::new().with("OTHER_EXPORT", Mapping::new()));
        let result = process_export(&document, &ExportLayout::default());
        assert!(matches!(result, Err(CoreError::MissingRoot { .. })));
    }

    #[test]
    fn empty_patient_element_is_fatal() {
        let document =
            Node::from(Mapping::new().with("HFA_EXPORT", Mapping::new().with("PATIENT", "")));
        assert!(patient_nodes(&document, &ExportLayout::default()).is_err());
    }

    #[test]
    fn single_patient_mapping_is_one_patient() {
        let document = Node::from(Mapping::new().with(
            "HFA_EXPORT",
            Mapping::new().with("PATIENT", Mapping::new().with("PATIENT_ID", "1")),
        ));
        let outcome = process_export(&document, &ExportLayout::default()).unwrap();
        assert_eq!(outcome.patient_count, 1);
        assert!(outcome.accepted.is_empty());
        assert_eq!(
            outcome.rejected,
            vec![RejectedRecord::Structural {
                identity: [("PATIENT_ID", "1")].into_iter().collect(),
                reason: InvalidReason::MissingTestNode,
            }]
        );
    }
}
