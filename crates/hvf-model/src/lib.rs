//! Data model for visual-field export conversion.
//!
//! - [`Node`]: the parsed export document (scalar / sequence / mapping)
//! - [`FlatRecord`]: one exam flattened into an ordered column mapping
//! - [`RejectedRecord`]: an exam or row that did not make it into the output
//! - [`ExportLayout`]: the element names the extractors look for

pub mod error;
pub mod layout;
pub mod node;
pub mod record;

pub use error::{ModelError, Result};
pub use layout::{ExportLayout, LocationList};
pub use node::{Mapping, Node};
pub use record::{FlatRecord, InvalidReason, RejectedRecord};
