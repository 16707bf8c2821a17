//! Study (exam session) metadata extraction.

use hvf_model::{ExportLayout, FlatRecord, Node};

use crate::locate::{locate, locate_first};

/// Study metadata over the configured field list.
///
/// Each field takes the first value found anywhere under the study node, or
/// an empty string. The sphere field appears twice per study, trial lens
/// first and distance correction second; occurrences are assigned to the two
/// sphere columns by that order alone.
pub fn extract_study(study: &Node, layout: &ExportLayout) -> FlatRecord {
    let mut record = FlatRecord::new();
    for field in &layout.study_fields {
        if *field == layout.sphere_field {
            let mut spheres = locate(study, field).map(Node::to_text);
            record.insert(
                layout.trial_sphere_column.as_str(),
                spheres.next().unwrap_or_default(),
            );
            record.insert(
                layout.distance_sphere_column.as_str(),
                spheres.next().unwrap_or_default(),
            );
            continue;
        }
        let value = locate_first(study, field)
            .map(Node::to_text)
            .unwrap_or_default();
        record.insert(field.as_str(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvf_model::Mapping;

    #[test]
    fn absent_fields_default_to_empty() {
        let record = extract_study(&Node::from(Mapping::new()), &ExportLayout::default());
        // 14 fields, sphere expanded into two
        assert_eq!(record.len(), 15);
        assert!(record.iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn nested_fields_are_found() {
        let study = Node::from(
            Mapping::new().with("VISIT_DATE", "2019-03-04").with(
                "SERIES",
                Mapping::new().with("FIELD_EXAM", Mapping::new().with("SITE", "OD")),
            ),
        );
        let record = extract_study(&study, &ExportLayout::default());
        assert_eq!(record.get("VISIT_DATE"), Some("2019-03-04"));
        assert_eq!(record.get("SITE"), Some("OD"));
        assert_eq!(record.get("AXIS"), Some(""));
    }

    #[test]
    fn spheres_assigned_by_position() {
        let study = Node::from(
            Mapping::new()
                .with("TRIAL_RX", Mapping::new().with("SPHERE", "+1.25"))
                .with("DISTANCE_RX", Mapping::new().with("SPHERE", "-0.50")),
        );
        let record = extract_study(&study, &ExportLayout::default());
        assert_eq!(record.get("TRIAL_RX_SPHERE"), Some("+1.25"));
        assert_eq!(record.get("DISTANCE_RX_SPHERE"), Some("-0.50"));
        assert!(!record.contains("SPHERE"));
    }

    #[test]
    fn sibling_spheres_land_in_trial_column_as_list() {
        // Repeated sibling elements are parsed into one sequence value.
        let study = Node::from(
            Mapping::new()
                .with(
                    "TRIAL_RX",
                    Mapping::new().with(
                        "SPHERE",
                        Node::Sequence(vec![Node::scalar("1"), Node::scalar("3")]),
                    ),
                )
                .with("DISTANCE_RX", Mapping::new().with("SPHERE", "2")),
        );
        let record = extract_study(&study, &ExportLayout::default());
        assert_eq!(record.get("TRIAL_RX_SPHERE"), Some(r#"["1","3"]"#));
        assert_eq!(record.get("DISTANCE_RX_SPHERE"), Some("2"));
    }

    #[test]
    fn sphere_columns_sit_at_sphere_position() {
        let record = extract_study(&Node::from(Mapping::new()), &ExportLayout::default());
        let columns: Vec<&str> = record.columns().collect();
        assert_eq!(
            &columns[..6],
            &[
                "VISIT_DATE",
                "SITE",
                "DISPLAY_NAME",
                "EXAM_TIME",
                "TRIAL_RX_SPHERE",
                "DISTANCE_RX_SPHERE"
            ]
        );
    }
}
