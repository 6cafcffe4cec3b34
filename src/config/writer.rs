use super::SettingsDocument;
use crate::SetupError;
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write a settings document to disk atomically.
///
/// The document is written to a temporary file next to `path` and renamed over
/// it. An existing file keeps its permissions; a new one is readable by its
/// owner only, since the document usually carries a token. A symlinked
/// settings file is written through, so the link stays in place.
///
/// # Errors
///
/// Returns an error if:
/// - Unable to create the parent directory
/// - Unable to serialize the document
/// - Unable to write or rename the temporary file
pub fn write_settings_document<P: AsRef<Path>>(
    path: P,
    document: &SettingsDocument,
) -> Result<(), SetupError> {
    let target = resolve_symlink(path.as_ref())?;
    let path_ref = target.as_path();
    let parent = path_ref
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    crate::assistant::create_dir_all(parent)
        .map_err(|e| SetupError::filesystem("failed to create settings directory", parent, e))?;

    let json = serde_json::to_string_pretty(document)?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| SetupError::filesystem("failed to create temporary settings file", parent, e))?;
    temp.write_all(json.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| SetupError::filesystem("failed to write settings", temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path_ref) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| SetupError::filesystem("failed to copy settings permissions", path_ref, e))?;
    }

    temp.persist(path_ref)
        .map_err(|e| SetupError::filesystem("failed to write settings", path_ref, e.error))?;

    Ok(())
}

fn resolve_symlink(path: &Path) -> Result<PathBuf, SetupError> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => fs::canonicalize(path)
            .map_err(|e| SetupError::filesystem("failed to resolve settings link", path, e)),
        _ => Ok(path.to_path_buf()),
    }
}

/// Create a backup of a file with timestamp
///
/// # Errors
///
/// Returns an error if unable to copy the file
pub fn backup_file<P: AsRef<Path>>(path: P) -> Result<Option<PathBuf>, SetupError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Ok(None);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path_ref.with_file_name(format!(
        "{}.backup.{}",
        path_ref.file_name().and_then(|n| n.to_str()).unwrap_or("settings.json"),
        timestamp
    ));

    fs::copy(path_ref, &backup_path)
        .map_err(|e| SetupError::filesystem("failed to back up settings", path_ref, e))?;

    Ok(Some(backup_path))
}
