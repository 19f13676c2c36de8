//! Text document loading
//!
//! Reads a UTF-8 text file into memory in one shot.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::DocumentError;

/// Read `path` as UTF-8 text
pub(crate) fn load_text_file(path: &Path) -> Result<String, DocumentError> {
    let bytes = fs::read(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = String::from_utf8(bytes).map_err(|e| DocumentError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Loaded {:?} ({} chars)", path, text.chars().count());
    Ok(text)
}
