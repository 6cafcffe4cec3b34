use github_mcp::config::reader::read_settings_document;
use github_mcp::config::writer::write_settings_document;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_document_is_pretty_and_ordered() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");
        let document = match json!({"zeta": 1, "alpha": {"b": 2, "a": 1}}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        write_settings_document(&path, &document).expect("write should succeed");

        let content = fs::read_to_string(&path).expect("read settings");
        assert!(content.contains('\n'), "output should be pretty-printed");
        assert!(content.find("zeta") < content.find("alpha"));
        assert_eq!(read_settings_document(&path).expect("read back"), document);
    }

    #[test]
    fn test_overwrite_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{}").expect("Failed to write settings");

        let document = read_settings_document(&path).expect("read settings");
        write_settings_document(&path, &document).expect("write should succeed");

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .expect("list dir")
            .map(|e| e.expect("dir entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("settings.json")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let fresh = temp_dir.path().join("fresh.json");
        let existing = temp_dir.path().join("existing.json");
        fs::write(&existing, "{}").expect("Failed to write settings");
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o644))
            .expect("Failed to set permissions");

        let document = read_settings_document(&existing).expect("read settings");
        write_settings_document(&fresh, &document).expect("write fresh");
        write_settings_document(&existing, &document).expect("write existing");

        let mode = |p: &std::path::Path| fs::metadata(p).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode(&fresh), 0o600);
        assert_eq!(mode(&existing), 0o644);
    }
}
