#![allow(clippy::self_named_module_files)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub mod reader;
pub mod writer;

/// A settings file as an ordered JSON object.
pub type SettingsDocument = Map<String, Value>;

/// Key under which assistants list their MCP servers.
pub const MCP_SERVERS_KEY: &str = "mcpServers";

/// The `mcpServers.github` entry an assistant uses to launch the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerDescriptor {
    pub command: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub auto_approve: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
}

impl ServerDescriptor {
    /// Builds the descriptor that launches `command serve`.
    pub fn new(
        command: impl Into<PathBuf>,
        write_access: bool,
        auto_approve: BTreeSet<String>,
        token: Option<&str>,
    ) -> Self {
        let env = token
            .filter(|t| !t.is_empty())
            .map(|t| BTreeMap::from([(crate::TOKEN_ENV_VAR.to_string(), t.to_string())]));

        Self {
            command: command.into(),
            args: vec!["serve".to_string(), format!("--write-access={write_access}")],
            disabled: false,
            auto_approve,
            env,
        }
    }

    /// JSON form of the descriptor as written into settings files.
    ///
    /// # Errors
    ///
    /// Returns an error if the command path is not valid UTF-8.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
