use crate::config::{reader, writer, ServerDescriptor, SettingsDocument, MCP_SERVERS_KEY};
use crate::{SetupError, SERVER_KEY};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How [`update_settings_file`] should persist the merged document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Compute the merge but leave the file untouched.
    pub dry_run: bool,
    /// Copy an existing file aside before overwriting it.
    pub backup: bool,
}

/// What [`update_settings_file`] did to a settings file.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub path: PathBuf,
    pub document: SettingsDocument,
    pub written: bool,
    pub backup_path: Option<PathBuf>,
}

/// Sets `mcpServers.github` to `descriptor`, leaving every other key untouched.
///
/// A missing or non-object `mcpServers` is replaced with an empty object first.
/// The previous `github` entry is replaced wholesale, never merged field by field.
pub fn merge_server_descriptor(document: &mut SettingsDocument, descriptor: Value) {
    let entry = document
        .entry(MCP_SERVERS_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    if !entry.is_object() {
        warn!("Replacing non-object '{}' value with an empty object", MCP_SERVERS_KEY);
        *entry = Value::Object(Map::new());
    }

    if let Value::Object(servers) = entry {
        servers.insert(SERVER_KEY.to_string(), descriptor);
    }
}

/// Read, merge and write back an assistant's settings file.
///
/// # Errors
///
/// Returns an error if:
/// - The existing file cannot be read or is not a JSON object
/// - The descriptor cannot be serialized
/// - The backup or the write fails
pub fn update_settings_file(
    path: &Path,
    descriptor: &ServerDescriptor,
    options: WriteOptions,
) -> Result<MergeReport, SetupError> {
    let mut document = reader::read_settings_document(path)?;
    merge_server_descriptor(&mut document, descriptor.to_value()?);

    if options.dry_run {
        info!("Dry run mode - not writing {}", path.display());
        return Ok(MergeReport { path: path.to_path_buf(), document, written: false, backup_path: None });
    }

    let backup_path = if options.backup { writer::backup_file(path)? } else { None };
    if let Some(ref backup) = backup_path {
        debug!("Backup created: {}", backup.display());
    }

    writer::write_settings_document(path, &document)?;
    debug!("Wrote {} server entry to {}", SERVER_KEY, path.display());

    Ok(MergeReport { path: path.to_path_buf(), document, written: true, backup_path })
}
