//! Extraction and flattening of visual-field exams.
//!
//! Each patient in an export goes through three extractors built on
//! [`locate`], and [`assemble`] merges their output into one
//! [`FlatRecord`](hvf_model::FlatRecord) or rejects the exam.
//!
//! - [`patient`]: identity fields, taken only from direct keys
//! - [`study`]: exam metadata with empty-string defaults
//! - [`threshold`]: per-location measurements and mandatory summary statistics
//! - [`pipeline`]: runs a whole export

pub mod assemble;
pub mod error;
pub mod locate;
pub mod patient;
pub mod pipeline;
pub mod study;
pub mod threshold;

pub use assemble::{Assembly, assemble};
pub use error::{CoreError, Result};
pub use locate::{Locate, locate, locate_first};
pub use patient::extract_patient;
pub use pipeline::{BatchOutcome, patient_nodes, process_export};
pub use study::extract_study;
pub use threshold::{ThresholdOutcome, extract_threshold, find_threshold_test};
