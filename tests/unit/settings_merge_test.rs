use github_mcp::config::{reader, SettingsDocument};
use github_mcp::merge::{merge_server_descriptor, update_settings_file, WriteOptions};
use github_mcp::ServerDescriptor;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn descriptor(command: &str) -> ServerDescriptor {
        ServerDescriptor::new(
            command,
            false,
            BTreeSet::from(["get_issue".to_string()]),
            Some("ghp_test"),
        )
    }

    #[test]
    fn test_update_creates_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nested").join("cline_mcp_settings.json");

        let report = update_settings_file(&path, &descriptor("/bin/github-mcp"), WriteOptions::default())
            .expect("update should succeed");

        assert!(report.written);
        assert_eq!(report.backup_path, None);
        let written: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read settings")).expect("json");
        assert_eq!(
            written,
            json!({
                "mcpServers": {
                    "github": {
                        "command": "/bin/github-mcp",
                        "args": ["serve", "--write-access=false"],
                        "disabled": false,
                        "autoApprove": ["get_issue"],
                        "env": {"GITHUB_PERSONAL_ACCESS_TOKEN": "ghp_test"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_preserves_unrelated_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("claude_desktop_config.json");
        fs::write(
            &path,
            r#"{
  "globalShortcut": "Ctrl+Space",
  "mcpServers": {
    "weather-server": {"command": "/path/to/weather", "args": ["--units", "metric"]},
    "github": {"command": "/stale", "customField": true}
  }
}"#,
        )
        .expect("Failed to write settings");

        update_settings_file(&path, &descriptor("/bin/github-mcp"), WriteOptions::default())
            .expect("update should succeed");

        let document = reader::read_settings_document(&path).expect("read back");
        assert_eq!(document["globalShortcut"], json!("Ctrl+Space"));
        assert_eq!(
            document["mcpServers"]["weather-server"],
            json!({"command": "/path/to/weather", "args": ["--units", "metric"]})
        );
        assert_eq!(document["mcpServers"]["github"]["command"], json!("/bin/github-mcp"));
        assert!(document["mcpServers"]["github"].get("customField").is_none());
    }

    #[test]
    fn test_update_rejects_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("cline_mcp_settings.json");
        fs::write(&path, "{ not json").expect("Failed to write settings");

        let err = update_settings_file(&path, &descriptor("/bin/github-mcp"), WriteOptions::default())
            .expect_err("invalid JSON must not be overwritten");

        assert!(err.to_string().contains("failed to parse existing settings"));
        assert_eq!(fs::read_to_string(&path).expect("read settings"), "{ not json");
    }

    #[test]
    fn test_update_rejects_non_object_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("cline_mcp_settings.json");
        fs::write(&path, "[1, 2, 3]").expect("Failed to write settings");

        assert!(
            update_settings_file(&path, &descriptor("/bin/github-mcp"), WriteOptions::default())
                .is_err()
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("cline_mcp_settings.json");
        fs::write(&path, r#"{"mcpServers": {}}"#).expect("Failed to write settings");

        let report = update_settings_file(
            &path,
            &descriptor("/bin/github-mcp"),
            WriteOptions { dry_run: true, backup: true },
        )
        .expect("dry run should succeed");

        assert!(!report.written);
        assert_eq!(report.document["mcpServers"]["github"]["command"], json!("/bin/github-mcp"));
        assert_eq!(fs::read_to_string(&path).expect("read settings"), r#"{"mcpServers": {}}"#);
        assert_eq!(fs::read_dir(temp_dir.path()).expect("list dir").count(), 1);
    }

    #[test]
    fn test_backup_keeps_previous_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("cline_mcp_settings.json");
        fs::write(&path, r#"{"theme": "light"}"#).expect("Failed to write settings");

        let report = update_settings_file(
            &path,
            &descriptor("/bin/github-mcp"),
            WriteOptions { dry_run: false, backup: true },
        )
        .expect("update should succeed");

        let backup = report.backup_path.expect("backup should be created");
        assert!(backup
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("cline_mcp_settings.json.backup.")));
        assert_eq!(fs::read_to_string(backup).expect("read backup"), r#"{"theme": "light"}"#);
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::String),
        ]
    }

    fn servers() -> impl Strategy<Value = Map<String, Value>> {
        prop::collection::btree_map("[a-z-]{1,10}", scalar(), 0..5)
            .prop_map(|m| m.into_iter().collect())
    }

    fn settings() -> impl Strategy<Value = SettingsDocument> {
        (prop::collection::btree_map("[a-zA-Z]{1,10}", scalar(), 0..5), servers()).prop_map(
            |(top, servers)| {
                let mut document: SettingsDocument = top.into_iter().collect();
                document.insert("mcpServers".to_string(), Value::Object(servers));
                document
            },
        )
    }

    proptest! {
        #[test]
        fn prop_merge_only_touches_github_entry(original in settings()) {
            let mut merged = original.clone();
            merge_server_descriptor(&mut merged, json!({"command": "/bin/github-mcp"}));

            for (key, value) in &original {
                if key != "mcpServers" {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }

            let before = original["mcpServers"].as_object().expect("generated object");
            let after = merged["mcpServers"].as_object().expect("merged object");
            for (name, server) in before {
                if name != "github" {
                    prop_assert_eq!(after.get(name), Some(server));
                }
            }
            prop_assert_eq!(&after["github"], &json!({"command": "/bin/github-mcp"}));
        }

        #[test]
        fn prop_merge_is_idempotent(original in settings()) {
            let descriptor = json!({"command": "/bin/github-mcp", "args": ["serve"]});

            let mut once = original;
            merge_server_descriptor(&mut once, descriptor.clone());
            let mut twice = once.clone();
            merge_server_descriptor(&mut twice, descriptor);

            prop_assert_eq!(once, twice);
        }
    }
}
