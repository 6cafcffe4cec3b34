//! Target assistant catalog and per-platform settings locations.

use crate::SetupError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

const CLINE_EXTENSION_ID: &str = "saoudrizwan.claude-dev";
const ROO_CODE_EXTENSION_ID: &str = "rooveterinaryinc.roo-cline";

const CLINE_SETTINGS_FILE: &str = "cline_mcp_settings.json";
const CLAUDE_DESKTOP_SETTINGS_FILE: &str = "claude_desktop_config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetAssistant {
    Cline,
    RooCode,
    ClaudeDesktop,
}

/// Where an assistant keeps its settings relative to the platform's roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsHome {
    /// A VS Code extension's `globalStorage/<id>/settings` directory.
    VsCodeExtension(&'static str),
    /// The Claude desktop application's own config directory.
    ClaudeDesktop,
}

impl TargetAssistant {
    pub const ALL: [Self; 3] = [Self::Cline, Self::RooCode, Self::ClaudeDesktop];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cline => "cline",
            Self::RooCode => "roo-code",
            Self::ClaudeDesktop => "claude-desktop",
        }
    }

    /// Looks up an assistant by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::UnsupportedTool`] for names outside the catalog.
    pub fn from_name(name: &str) -> Result<Self, SetupError> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|assistant| assistant.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SetupError::UnsupportedTool(wanted.to_string()))
    }

    #[must_use]
    pub const fn settings_home(self) -> SettingsHome {
        match self {
            Self::Cline => SettingsHome::VsCodeExtension(CLINE_EXTENSION_ID),
            Self::RooCode => SettingsHome::VsCodeExtension(ROO_CODE_EXTENSION_ID),
            Self::ClaudeDesktop => SettingsHome::ClaudeDesktop,
        }
    }

    #[must_use]
    pub const fn settings_file_name(self) -> &'static str {
        match self {
            Self::Cline | Self::RooCode => CLINE_SETTINGS_FILE,
            Self::ClaudeDesktop => CLAUDE_DESKTOP_SETTINGS_FILE,
        }
    }
}

impl fmt::Display for TargetAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-platform layout of assistant settings directories.
pub trait ConfigDirs: Send + Sync {
    /// Platform identifier, as reported by `std::env::consts::OS`.
    fn platform(&self) -> &'static str;

    /// Root that VS Code keeps `User/globalStorage` under.
    fn vscode_user_dir(&self, home: &Path) -> PathBuf;

    /// Claude desktop's configuration directory.
    fn claude_desktop_dir(&self, home: &Path) -> PathBuf;

    fn config_dir(&self, home: &Path, assistant: TargetAssistant) -> PathBuf {
        match assistant.settings_home() {
            SettingsHome::VsCodeExtension(extension_id) => self
                .vscode_user_dir(home)
                .join("globalStorage")
                .join(extension_id)
                .join("settings"),
            SettingsHome::ClaudeDesktop => self.claude_desktop_dir(home),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MacOs;

#[derive(Debug, Clone, Copy, Default)]
pub struct Linux;

#[derive(Debug, Clone, Copy, Default)]
pub struct Windows;

impl ConfigDirs for MacOs {
    fn platform(&self) -> &'static str {
        "macos"
    }

    fn vscode_user_dir(&self, home: &Path) -> PathBuf {
        home.join("Library").join("Application Support").join("Code").join("User")
    }

    fn claude_desktop_dir(&self, home: &Path) -> PathBuf {
        home.join("Library").join("Application Support").join("Claude")
    }
}

impl ConfigDirs for Linux {
    fn platform(&self) -> &'static str {
        "linux"
    }

    // Remote/server installs of VS Code are what Cline runs under on Linux.
    fn vscode_user_dir(&self, home: &Path) -> PathBuf {
        home.join(".vscode-server").join("data").join("User")
    }

    fn claude_desktop_dir(&self, home: &Path) -> PathBuf {
        home.join(".config").join("Claude")
    }
}

impl ConfigDirs for Windows {
    fn platform(&self) -> &'static str {
        "windows"
    }

    fn vscode_user_dir(&self, home: &Path) -> PathBuf {
        home.join("AppData").join("Roaming").join("Code").join("User")
    }

    fn claude_desktop_dir(&self, home: &Path) -> PathBuf {
        home.join("AppData").join("Roaming").join("Claude")
    }
}

/// Maps a platform identifier to its settings layout.
///
/// Accepts the values of `std::env::consts::OS` as well as `darwin`.
///
/// # Errors
///
/// Returns [`SetupError::UnsupportedPlatform`] for platforms with no layout.
pub fn platform_for(os: &str) -> Result<&'static dyn ConfigDirs, SetupError> {
    match os.to_ascii_lowercase().as_str() {
        "macos" | "darwin" => Ok(&MacOs),
        "linux" => Ok(&Linux),
        "windows" => Ok(&Windows),
        other => Err(SetupError::UnsupportedPlatform(other.to_string())),
    }
}

/// Settings layout for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`SetupError::UnsupportedPlatform`] when running elsewhere.
pub fn current_platform() -> Result<&'static dyn ConfigDirs, SetupError> {
    platform_for(std::env::consts::OS)
}

/// Resolves an assistant's settings directory, creating it if needed.
///
/// # Errors
///
/// Returns [`SetupError::Filesystem`] if the directory cannot be created.
pub fn locate_config_dir(
    home: &Path,
    platform: &dyn ConfigDirs,
    assistant: TargetAssistant,
) -> Result<PathBuf, SetupError> {
    let dir = platform.config_dir(home, assistant);
    if !dir.is_dir() {
        debug!("Creating {} config directory at {}", assistant, dir.display());
        create_dir_all(&dir)
            .map_err(|e| SetupError::filesystem("failed to create config directory", &dir, e))?;
    }
    Ok(dir)
}

/// Full path of an assistant's settings file, creating its directory if needed.
///
/// # Errors
///
/// Returns [`SetupError::Filesystem`] if the directory cannot be created.
pub fn settings_path(
    home: &Path,
    platform: &dyn ConfigDirs,
    assistant: TargetAssistant,
) -> Result<PathBuf, SetupError> {
    Ok(locate_config_dir(home, platform, assistant)?.join(assistant.settings_file_name()))
}

#[cfg(unix)]
pub(crate) fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    std::fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
pub(crate) fn create_dir_all(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}
