use super::{SettingsDocument, MCP_SERVERS_KEY};
use crate::SetupError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Document used when an assistant has no settings file yet.
#[must_use]
pub fn empty_settings_document() -> SettingsDocument {
    let mut document = Map::new();
    document.insert(MCP_SERVERS_KEY.to_string(), Value::Object(Map::new()));
    document
}

/// Read an assistant settings file, or synthesize an empty one if it is absent.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The content is not valid JSON or its root is not an object
pub fn read_settings_document<P: AsRef<Path>>(path: P) -> Result<SettingsDocument, SetupError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        debug!("No settings file at {}, starting from an empty document", path_ref.display());
        return Ok(empty_settings_document());
    }

    let content = fs::read_to_string(path_ref)
        .map_err(|e| SetupError::filesystem("failed to read existing settings", path_ref, e))?;

    serde_json::from_str(&content)
        .map_err(|source| SetupError::Parse { path: path_ref.to_path_buf(), source })
}
