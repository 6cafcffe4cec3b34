use crate::fixtures::{read_json, TestFixture};
use crate::cli_test::setup_command;
use github_mcp::TargetAssistant;
use predicates::prelude::*;
use serde_json::json;
use serial_test::serial;

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    #[serial]
    fn test_config_file_supplies_defaults() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        fixture
            .with_app_config(
                r#"
[setup]
tool = "claude-desktop"
auto-approve = "get_issue"
write-access = true
"#,
            )
            .expect("Failed to write config");

        setup_command(&fixture).arg("setup").assert().success();

        assert!(!fixture.settings_path(TargetAssistant::Cline).exists());
        let github = &read_json(&fixture.settings_path(TargetAssistant::ClaudeDesktop))["mcpServers"]["github"];
        assert_eq!(github["autoApprove"], json!(["get_issue"]));
        assert_eq!(github["args"], json!(["serve", "--write-access=true"]));
    }

    #[test]
    #[serial]
    fn test_flags_override_config_file() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        fixture
            .with_app_config("[setup]\ntool = \"claude-desktop\"\nwrite-access = true\n")
            .expect("Failed to write config");

        setup_command(&fixture)
            .args(["setup", "--tool=roo-code", "--write-access=false"])
            .assert()
            .success();

        assert!(!fixture.settings_path(TargetAssistant::ClaudeDesktop).exists());
        let github = &read_json(&fixture.settings_path(TargetAssistant::RooCode))["mcpServers"]["github"];
        assert_eq!(github["args"], json!(["serve", "--write-access=false"]));
    }

    #[test]
    #[serial]
    fn test_invalid_config_file_is_ignored_with_warning() {
        let fixture = TestFixture::new().expect("Failed to create fixture");
        fixture.with_app_config("[setup\nbroken").expect("Failed to write config");

        setup_command(&fixture)
            .arg("setup")
            .assert()
            .success()
            .stderr(
                predicate::str::contains("Ignoring app configuration")
                    .and(predicate::str::contains("Failed to parse TOML config")),
            );

        assert!(fixture.settings_path(TargetAssistant::Cline).is_file());
    }
}
