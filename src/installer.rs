//! Makes sure a runnable server binary exists where assistants can launch it.

use crate::SetupError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name the server binary is installed and searched for under.
pub const BINARY_NAME: &str = "github-mcp";

const INSTALL_DIR_NAME: &str = "mcp-servers";

#[must_use]
pub fn binary_file_name() -> String {
    format!("{BINARY_NAME}{}", std::env::consts::EXE_SUFFIX)
}

/// Where the server binary was (or would be) found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryLocation {
    /// Found on the process `PATH`.
    OnPath(PathBuf),
    /// Already present in the install directory.
    Installed(PathBuf),
    /// Not found; this is where it would be installed.
    Missing(PathBuf),
}

impl BinaryLocation {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::OnPath(path) | Self::Installed(path) | Self::Missing(path) => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryInstaller {
    install_dir: PathBuf,
    search_path: Option<OsString>,
    source: Option<PathBuf>,
}

impl BinaryInstaller {
    /// Installer targeting `install_dir`, searching the process `PATH`.
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self { install_dir: install_dir.into(), search_path: std::env::var_os("PATH"), source: None }
    }

    #[must_use]
    pub fn default_install_dir(home: &Path) -> PathBuf {
        home.join(INSTALL_DIR_NAME)
    }

    /// Replace the `PATH`-style list searched before the install directory.
    #[must_use]
    pub fn with_search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = search_path;
        self
    }

    /// Copy from `source` instead of the running executable.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    #[must_use]
    pub fn install_path(&self) -> PathBuf {
        self.install_dir.join(binary_file_name())
    }

    /// Looks for an existing binary without touching the filesystem.
    pub fn locate(&self) -> BinaryLocation {
        let cwd = std::env::current_dir().unwrap_or_default();
        if let Ok(path) = which::which_in(BINARY_NAME, self.search_path.as_ref(), cwd) {
            debug!("Found {} on PATH at {}", BINARY_NAME, path.display());
            return BinaryLocation::OnPath(path);
        }

        let installed = self.install_path();
        if installed.is_file() {
            debug!("Found {} at {}", BINARY_NAME, installed.display());
            BinaryLocation::Installed(installed)
        } else {
            BinaryLocation::Missing(installed)
        }
    }

    /// Returns the path of a runnable binary, installing one if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The running executable cannot be determined
    /// - The install directory cannot be created or the copy fails
    /// - The executable bit cannot be set
    pub fn ensure_installed(&self) -> Result<PathBuf, SetupError> {
        match self.locate() {
            BinaryLocation::OnPath(path) | BinaryLocation::Installed(path) => Ok(path),
            BinaryLocation::Missing(destination) => {
                info!(
                    "{} binary not found on path, copying current binary to {}",
                    BINARY_NAME,
                    destination.display()
                );
                self.copy_self_to(&destination)?;
                Ok(destination)
            },
        }
    }

    fn copy_self_to(&self, destination: &Path) -> Result<(), SetupError> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => std::env::current_exe().map_err(|e| {
                SetupError::Install(format!("failed to locate running executable: {e}"))
            })?,
        };

        if same_file(&source, destination) {
            debug!("{} is already installed at {}", BINARY_NAME, destination.display());
            return Ok(());
        }

        crate::assistant::create_dir_all(&self.install_dir).map_err(|e| {
            SetupError::filesystem("failed to create install directory", &self.install_dir, e)
        })?;

        fs::copy(&source, destination)
            .map_err(|e| SetupError::filesystem("failed to copy binary to", destination, e))?;

        make_executable(destination)?;

        info!("{} binary installed at {}", BINARY_NAME, destination.display());
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), SetupError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|source| SetupError::Permission { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn make_executable(_path: &Path) -> Result<(), SetupError> {
    Ok(())
}
