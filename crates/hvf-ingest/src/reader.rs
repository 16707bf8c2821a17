//! Loading export files from disk.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use hvf_model::Node;

use crate::error::{IngestError, Result};
use crate::xml::parse_export_str;

/// Read and parse a whole export file.
///
/// The document is loaded into memory before parsing.
pub fn read_export(path: &Path) -> Result<Node> {
    let metadata = fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    info!(
        path = %path.display(),
        size_bytes = metadata.len(),
        "parsing export file"
    );

    let text = fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let document = parse_export_str(&text)?;
    if let Some(mapping) = document.as_mapping()
        && let Some((root, _)) = mapping.iter().next()
    {
        debug!(root_element = root, "parsed export document");
    }
    Ok(document)
}
