//! Visual-field export ingestion.
//!
//! Reads an HFA XML export into a [`Node`](hvf_model::Node) tree using the
//! usual XML-to-dictionary convention:
//!
//! - text-only elements become scalars
//! - attributes become `@name` entries, mixed text becomes `#text`
//! - repeated sibling elements become one sequence entry
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use hvf_ingest::read_export;
//!
//! let document = read_export(Path::new("exports/clinic.xml"))?;
//! let export = document.get("HFA_EXPORT");
//! ```

mod error;
mod reader;
mod xml;

pub use error::{IngestError, Result};
pub use reader::read_export;
pub use xml::parse_export_str;
