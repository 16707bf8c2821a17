//! Element names used when extracting records from an export.
//!
//! The defaults match the HFA XML export. A JSON file with any subset of the
//! fields can override them.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// An indexed list of measurement locations, e.g. the threshold site list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationList {
    /// Prefix for generated columns (`TH` gives `TH_1`, `TH_2`, ...).
    pub column_prefix: String,
    /// Element holding the list.
    pub list: String,
    /// Element repeated once per location.
    pub location: String,
    /// Element inside each location holding the value.
    pub value: String,
}

impl LocationList {
    fn new(column_prefix: &str, list: &str, location: &str, value: &str) -> Self {
        Self {
            column_prefix: column_prefix.to_string(),
            list: list.to_string(),
            location: location.to_string(),
            value: value.to_string(),
        }
    }

    /// Column name for a 1-based location index.
    pub fn column(&self, index: usize) -> String {
        format!("{}_{index}", self.column_prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportLayout {
    pub root: String,
    pub patient: String,
    pub study: String,
    pub threshold_test: String,
    pub patient_fields: Vec<String>,
    /// Identity column naming the patient in log events.
    pub patient_id: String,
    /// Study fields in output order. `sphere_field` expands into two columns in place.
    pub study_fields: Vec<String>,
    pub sphere_field: String,
    pub trial_sphere_column: String,
    pub distance_sphere_column: String,
    pub summary: String,
    /// Mandatory summary statistics; a missing one invalidates the exam.
    pub statistics: Vec<String>,
    pub threshold_sites: LocationList,
    pub total_deviation: LocationList,
    pub pattern_deviation: LocationList,
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            root: "HFA_EXPORT".to_string(),
            patient: "PATIENT".to_string(),
            study: "STUDY".to_string(),
            threshold_test: "THRESHOLD_TEST".to_string(),
            patient_fields: names(&["FULL_NAME", "PATIENT_ID", "BIRTH_DATE"]),
            patient_id: "PATIENT_ID".to_string(),
            study_fields: names(&[
                "VISIT_DATE",
                "SITE",
                "DISPLAY_NAME",
                "EXAM_TIME",
                "SPHERE",
                "CYLINDER",
                "AXIS",
                "PUPIL_DIAMETER",
                "EXAM_DURATION",
                "FALSE_NEGATIVE_PERCENT",
                "FALSE_POSITIVE_PERCENT",
                "TRIALS",
                "ERRORS",
                "FOVEAL_THRESHOLD",
            ]),
            sphere_field: "SPHERE".to_string(),
            trial_sphere_column: "TRIAL_RX_SPHERE".to_string(),
            distance_sphere_column: "DISTANCE_RX_SPHERE".to_string(),
            summary: "STATPAC".to_string(),
            statistics: names(&["LOW_PATIENT_RELIABILITY_STATUS", "MD", "PSD", "VFI"]),
            threshold_sites: LocationList::new(
                "TH",
                "THRESHOLD_SITE_LIST",
                "THRESHOLD_XY_LOCATION",
                "THRESHOLD_1",
            ),
            total_deviation: LocationList::new(
                "TD",
                "TOTAL_DEVIATION_VALUE_LIST",
                "TOTAL_DEV_XY_LOCATION",
                "TOTAL_DEVIATION_VALUE",
            ),
            pattern_deviation: LocationList::new(
                "PD",
                "PATTERN_DEVIATION_VALUE_LIST",
                "PATTERN_DEV_XY_LOCATION",
                "PATTERN_DEVIATION_VALUE",
            ),
        }
    }
}

impl ExportLayout {
    /// Parse a layout override; missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("root", &self.root),
            ("patient", &self.patient),
            ("study", &self.study),
            ("threshold_test", &self.threshold_test),
            ("patient_id", &self.patient_id),
            ("summary", &self.summary),
            ("trial_sphere_column", &self.trial_sphere_column),
            ("distance_sphere_column", &self.distance_sphere_column),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ModelError::EmptyLayoutField { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let layout = ExportLayout::from_json(r#"{"patient_fields": ["PATIENT_ID"]}"#)
            .expect("parse layout");
        assert_eq!(layout.patient_fields, vec!["PATIENT_ID"]);
        assert_eq!(layout.root, "HFA_EXPORT");
        assert_eq!(layout.statistics.len(), 4);
    }

    #[test]
    fn identifier_column_can_be_renamed() {
        let layout = ExportLayout::from_json(
            r#"{"patient_fields": ["MRN", "FULL_NAME"], "patient_id": "MRN"}"#,
        )
        .expect("parse layout");
        assert_eq!(layout.patient_id, "MRN");
        assert_eq!(ExportLayout::default().patient_id, "PATIENT_ID");
    }

    #[test]
    fn empty_root_is_rejected() {
        let result = ExportLayout::from_json(r#"{"root": " "}"#);
        assert!(matches!(
            result,
            Err(ModelError::EmptyLayoutField { field: "root" })
        ));
    }

    #[test]
    fn location_column_names() {
        let layout = ExportLayout::default();
        assert_eq!(layout.threshold_sites.column(1), "TH_1");
        assert_eq!(layout.pattern_deviation.column(54), "PD_54");
    }
}
