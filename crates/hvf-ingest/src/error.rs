//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading an export document.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Export file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML reader rejected the document.
    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// An end tag that does not close the open element.
    #[error("mismatched end tag </{found}> at byte {position}, expected </{expected}>")]
    MismatchedEnd {
        expected: String,
        found: String,
        position: u64,
    },

    /// An end tag with no element open.
    #[error("unmatched end tag </{found}> at byte {position}")]
    UnmatchedEnd { found: String, position: u64 },

    /// The document ended with elements still open.
    #[error("document ended inside <{element}>")]
    UnexpectedEnd { element: String },

    /// No element at all, or text outside the root element.
    #[error("document has no root element")]
    NoRootElement,
}

impl IngestError {
    pub(crate) fn xml(position: u64, error: impl std::fmt::Display) -> Self {
        Self::Xml {
            position,
            message: error.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
