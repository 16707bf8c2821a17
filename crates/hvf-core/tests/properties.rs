//! Property tests for field search and batch accounting.

use proptest::prelude::*;

use hvf_core::{locate, process_export};
use hvf_model::{ExportLayout, Mapping, Node};

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = "[a-z]{0,3}".prop_map(Node::Scalar);
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            prop::collection::vec((prop::sample::select(vec!["A", "B", "C"]), inner), 0..4)
                .prop_map(|entries| Node::Mapping(entries.into_iter().collect())),
        ]
    })
}

/// Straightforward recursive pre-order search to compare against.
fn recursive_search<'a>(node: &'a Node, name: &str, found: &mut Vec<&'a Node>) {
    match node {
        Node::Scalar(_) => {}
        Node::Sequence(items) => {
            for item in items {
                recursive_search(item, name, found);
            }
        }
        Node::Mapping(mapping) => {
            if let Some(value) = mapping.get(name) {
                found.push(value);
            }
            for value in mapping.values() {
                recursive_search(value, name, found);
            }
        }
    }
}

#[derive(Debug, Clone)]
struct PatientShape {
    has_test: bool,
    has_summary: bool,
    statistics: Vec<bool>,
}

impl PatientShape {
    fn is_valid(&self) -> bool {
        self.has_test && self.has_summary && self.statistics.iter().all(|present| *present)
    }

    fn to_node(&self, index: usize) -> Node {
        let layout = ExportLayout::default();
        let mut patient = Mapping::new().with("PATIENT_ID", index.to_string().as_str());
        patient.insert("STUDY", Node::from(Mapping::new().with("SITE", "OS")));
        if self.has_test {
            let mut test = Mapping::new();
            if self.has_summary {
                let summary: Mapping = layout
                    .statistics
                    .iter()
                    .zip(&self.statistics)
                    .filter(|(_, present)| **present)
                    .map(|(name, _)| (name.as_str(), Node::scalar("1")))
                    .collect();
                test.insert("STATPAC", Node::from(summary));
            }
            patient.insert(
                "STUDY",
                Node::from(
                    Mapping::new()
                        .with("SITE", "OS")
                        .with("THRESHOLD_TEST", test),
                ),
            );
        }
        Node::from(patient)
    }
}

fn arb_patient() -> impl Strategy<Value = PatientShape> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(any::<bool>(), 4),
    )
        .prop_map(|(has_test, has_summary, statistics)| PatientShape {
            has_test,
            has_summary,
            statistics,
        })
}

proptest! {
    #[test]
    fn locate_matches_recursive_preorder(node in arb_node()) {
        for name in ["A", "B", "C"] {
            let mut expected = Vec::new();
            recursive_search(&node, name, &mut expected);
            let actual: Vec<&Node> = locate(&node, name).collect();
            prop_assert_eq!(actual.len(), expected.len());
            for (left, right) in actual.iter().zip(&expected) {
                prop_assert!(std::ptr::eq(*left, *right));
            }
        }
    }

    #[test]
    fn every_patient_is_accepted_or_rejected(shapes in prop::collection::vec(arb_patient(), 1..8)) {
        let patients: Vec<Node> = shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| shape.to_node(index))
            .collect();
        let patient_list = if patients.len() == 1 {
            patients[0].clone()
        } else {
            Node::Sequence(patients)
        };
        let document = Node::from(
            Mapping::new().with("HFA_EXPORT", Mapping::new().with("PATIENT", patient_list)),
        );
        let outcome = process_export(&document, &ExportLayout::default()).unwrap();

        prop_assert_eq!(outcome.patient_count, shapes.len());
        prop_assert_eq!(outcome.accepted.len() + outcome.rejected.len(), shapes.len());
        let expected_valid = shapes.iter().filter(|shape| shape.is_valid()).count();
        prop_assert_eq!(outcome.accepted.len(), expected_valid);
    }
}
