//! Patient identity extraction.

use hvf_model::{ExportLayout, FlatRecord, Node};

/// Identity fields stored directly on the patient node, in document order.
///
/// Fields that are absent, or only present deeper in the tree, are left out.
pub fn extract_patient(patient: &Node, layout: &ExportLayout) -> FlatRecord {
    let Some(mapping) = patient.as_mapping() else {
        return FlatRecord::new();
    };
    mapping
        .iter()
        .filter(|(name, _)| layout.patient_fields.iter().any(|field| field.as_str() == *name))
        .map(|(name, value)| (name, value.to_text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvf_model::Mapping;

    #[test]
    fn keeps_only_direct_identity_fields() {
        let patient = Node::from(
            Mapping::new()
                .with("PATIENT_ID", "P-1")
                .with("SEX", "F")
                .with("FULL_NAME", "Doe, Jane")
                .with("STUDY", Mapping::new().with("BIRTH_DATE", "1950-01-01")),
        );
        let record = extract_patient(&patient, &ExportLayout::default());
        let pairs: Vec<(&str, &str)> = record.iter().collect();
        assert_eq!(pairs, vec![("PATIENT_ID", "P-1"), ("FULL_NAME", "Doe, Jane")]);
    }

    #[test]
    fn non_mapping_patient_is_empty() {
        let record = extract_patient(&Node::scalar(""), &ExportLayout::default());
        assert!(record.is_empty());
    }
}
