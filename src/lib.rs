#![allow(missing_docs)]

pub mod app_config;
pub mod assistant;
pub mod auto_approve;
pub mod cli;
pub mod config;
pub mod installer;
pub mod merge;
pub mod setup;
pub mod tool_catalog;

pub use assistant::{ConfigDirs, TargetAssistant};
pub use config::ServerDescriptor;
pub use setup::{run_setup, SetupContext, SetupOutcome, SetupRequest};
pub use tool_catalog::ToolCatalog;

use std::path::PathBuf;

/// Name of the entry this tool owns under `mcpServers`.
pub const SERVER_KEY: &str = "github";

/// Environment variable carrying the GitHub token into the launched server.
pub const TOKEN_ENV_VAR: &str = "GITHUB_PERSONAL_ACCESS_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("unsupported tool: {0}")]
    UnsupportedTool(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("{action} '{}': {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse existing settings at '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to make '{}' executable: {source}", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("binary installation failed: {0}")]
    Install(String),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not determine home directory")]
    HomeDirectory,
}

impl SetupError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem { action, path: path.into(), source }
    }
}

/// Resolves the current user's home directory.
///
/// # Errors
///
/// Returns [`SetupError::HomeDirectory`] when no home directory can be found.
pub fn home_dir() -> Result<PathBuf, SetupError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(SetupError::HomeDirectory)
}
