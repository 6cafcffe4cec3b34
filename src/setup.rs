//! Fans a setup request out across target assistants.
//!
//! Each assistant runs through the same pipeline: locate its settings file,
//! build the server descriptor, merge it in. Failures are recorded against the
//! assistant that produced them and never stop the remaining assistants.

use crate::assistant::{self, ConfigDirs, TargetAssistant};
use crate::auto_approve::resolve_auto_approve;
use crate::config::ServerDescriptor;
use crate::installer::BinaryInstaller;
use crate::merge::{self, MergeReport, WriteOptions};
use crate::tool_catalog::ToolCatalog;
use crate::SetupError;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for a setup run
#[derive(Debug, Clone, Default)]
pub struct SetupRequest {
    /// Server binary to point assistants at; installed on demand when `None`.
    pub binary_path: Option<PathBuf>,
    pub token: Option<String>,
    /// Comma-separated tool names, `allow-read-only` expands to the catalog's read-only set.
    pub auto_approve: String,
    /// Comma-separated assistant names.
    pub assistants: String,
    pub write_access: bool,
    pub dry_run: bool,
    pub backup: bool,
}

/// Environment the orchestrator runs against.
pub struct SetupContext<'a> {
    pub home: PathBuf,
    /// Settings layout, or the name of the unrecognized OS it could not be found for.
    pub platform: Result<&'a dyn ConfigDirs, String>,
    pub catalog: &'a ToolCatalog,
    pub installer: BinaryInstaller,
}

impl fmt::Debug for SetupContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupContext")
            .field("home", &self.home)
            .field("platform", &self.platform.as_ref().map(|dirs| dirs.platform()))
            .field("installer", &self.installer)
            .finish_non_exhaustive()
    }
}

/// Result of setting up a single assistant.
#[derive(Debug)]
pub struct AssistantOutcome {
    pub assistant: String,
    pub result: Result<MergeReport, SetupError>,
}

impl AssistantOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    #[must_use]
    pub fn settings_path(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(|report| report.path.as_path())
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SetupError> {
        match &self.result {
            Ok(_) => None,
            Err(e) => Some(e),
        }
    }
}

impl fmt::Display for AssistantOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(report) if report.written => {
                write!(f, "{} MCP settings updated at {}", self.assistant, report.path.display())
            },
            Ok(report) => {
                write!(f, "{} MCP settings would be updated at {}", self.assistant, report.path.display())
            },
            Err(e) => write!(f, "error setting up {}: {e}", self.assistant),
        }
    }
}

/// Ordered per-assistant results of a setup run.
#[derive(Debug, Default)]
pub struct SetupOutcome {
    pub results: Vec<AssistantOutcome>,
}

impl SetupOutcome {
    pub fn failures(&self) -> impl Iterator<Item = &AssistantOutcome> {
        self.results.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn successes(&self) -> impl Iterator<Item = &AssistantOutcome> {
        self.results.iter().filter(|outcome| outcome.is_success())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// `0` when every assistant succeeded, `1` otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_success())
    }
}

/// Splits a comma-separated assistant list, trimming and dropping empty entries.
#[must_use]
pub fn parse_assistant_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty()).collect()
}

/// Runs setup for every requested assistant.
pub fn run_setup(context: &SetupContext<'_>, request: &SetupRequest) -> SetupOutcome {
    run_setup_with(context, request, |_| {})
}

/// Runs setup for every requested assistant, reporting each outcome as it completes.
pub fn run_setup_with<F>(
    context: &SetupContext<'_>,
    request: &SetupRequest,
    mut on_outcome: F,
) -> SetupOutcome
where
    F: FnMut(&AssistantOutcome),
{
    let auto_approve = resolve_auto_approve(&request.auto_approve, context.catalog);
    debug!("Auto-approving {} tool(s)", auto_approve.len());
    info!("Write access for remote operations: {}", request.write_access);

    let mut binary = SharedBinary::new(request.binary_path.clone());
    let mut outcome = SetupOutcome::default();

    for name in parse_assistant_list(&request.assistants) {
        let result = setup_assistant(context, request, name, &auto_approve, &mut binary);
        if let Err(ref e) = result {
            warn!("Setup failed for {}: {}", name, e);
        }

        let assistant_outcome = AssistantOutcome { assistant: name.to_string(), result };
        on_outcome(&assistant_outcome);
        outcome.results.push(assistant_outcome);
    }

    outcome
}

fn setup_assistant(
    context: &SetupContext<'_>,
    request: &SetupRequest,
    name: &str,
    auto_approve: &BTreeSet<String>,
    binary: &mut SharedBinary,
) -> Result<MergeReport, SetupError> {
    let assistant = TargetAssistant::from_name(name)?;
    let platform = context.platform.clone().map_err(SetupError::UnsupportedPlatform)?;

    let settings_path = if request.dry_run {
        platform.config_dir(&context.home, assistant).join(assistant.settings_file_name())
    } else {
        assistant::settings_path(&context.home, platform, assistant)?
    };
    debug!("Settings for {} live at {}", assistant, settings_path.display());

    let command = binary.resolve(&context.installer, request.dry_run)?;
    let descriptor = ServerDescriptor::new(
        command,
        request.write_access,
        auto_approve.clone(),
        request.token.as_deref(),
    );

    merge::update_settings_file(
        &settings_path,
        &descriptor,
        WriteOptions { dry_run: request.dry_run, backup: request.backup },
    )
}

/// Installs the server binary at most once per run and shares the result.
#[derive(Debug)]
struct SharedBinary {
    given: Option<PathBuf>,
    installed: Option<Result<PathBuf, String>>,
}

impl SharedBinary {
    const fn new(given: Option<PathBuf>) -> Self {
        Self { given, installed: None }
    }

    fn resolve(
        &mut self,
        installer: &BinaryInstaller,
        dry_run: bool,
    ) -> Result<PathBuf, SetupError> {
        if let Some(ref path) = self.given {
            return Ok(path.clone());
        }
        if dry_run {
            return Ok(installer.locate().path().to_path_buf());
        }

        match &self.installed {
            Some(Ok(path)) => return Ok(path.clone()),
            Some(Err(message)) => return Err(SetupError::Install(message.clone())),
            None => {},
        }

        match installer.ensure_installed() {
            Ok(path) => {
                self.installed = Some(Ok(path.clone()));
                Ok(path)
            },
            Err(e) => {
                self.installed = Some(Err(e.to_string()));
                Err(e)
            },
        }
    }
}
