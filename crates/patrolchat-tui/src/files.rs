//! JSON input files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::TuiError;

/// Read and deserialize a JSON file, keeping the path in any error.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, TuiError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| TuiError::File { path: path.to_path_buf(), source })?;
    let value = serde_json::from_str(&text)
        .map_err(|source| TuiError::Parse { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "loaded input file");
    Ok(value)
}
