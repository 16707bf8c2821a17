//! Merging extractor output into one record per exam.

use hvf_model::{FlatRecord, RejectedRecord};

use crate::threshold::ThresholdOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    Accepted(FlatRecord),
    Rejected(RejectedRecord),
}

/// Merge patient, study and threshold columns, or reject the exam.
///
/// An invalid threshold test rejects the exam, keeping only the patient
/// identity for diagnostics. Column sets are disjoint with the default
/// layout; on a shared column threshold values override study values, which
/// override patient values.
pub fn assemble(patient: FlatRecord, study: FlatRecord, threshold: ThresholdOutcome) -> Assembly {
    match threshold {
        ThresholdOutcome::Invalid(reason) => Assembly::Rejected(RejectedRecord::Structural {
            identity: patient,
            reason,
        }),
        ThresholdOutcome::Valid(values) => {
            let mut record = patient;
            record.merge(study);
            record.merge(values);
            Assembly::Accepted(record)
        }
    }
}
