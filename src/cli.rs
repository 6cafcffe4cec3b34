use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "github-mcp",
    about = "GitHub MCP server installer - Register the server with your AI assistants",
    long_about = "github-mcp installs the GitHub MCP server and registers it with AI assistants.

Supported assistants:
  • cline (VS Code extension saoudrizwan.claude-dev)
  • roo-code (VS Code extension rooveterinaryinc.roo-cline)
  • claude-desktop

Only the mcpServers.github entry of each assistant's settings file is managed;
every other server and setting is left as it was.

Defaults can be stored in:
  • $XDG_CONFIG_HOME/github-mcp/config.toml (or the platform config directory)",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,

    /// Read defaults from this file instead of the standard config location
    #[arg(long, global = true, env = "GITHUB_MCP_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up the GitHub MCP server for use with one or more AI assistants
    #[command(long_about = "Set up the GitHub MCP server for use with one or more AI assistants.

This command:
  1. Finds the github-mcp binary on PATH or in ~/mcp-servers, copying itself there if missing
  2. Resolves the tools to auto-approve
  3. Writes the mcpServers.github entry into each assistant's settings file

A failure for one assistant does not stop the others; the exit code is 1 if any failed.

Examples:
  # Set up Cline, auto-approving every read-only tool
  github-mcp setup --tool=cline --auto-approve=allow-read-only

  # Set up several assistants with write access enabled
  github-mcp setup --tool=cline,roo-code,claude-desktop --write-access=true

  # Preview the resulting settings without writing them
  github-mcp setup --tool=claude-desktop --dry-run")]
    Setup(SetupArgs),
}

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Assistants to set up (comma-separated, e.g. cline,roo-code,claude-desktop)
    #[arg(long, value_name = "TOOLS")]
    pub tool: Option<String>,

    /// Tools to auto-approve (comma-separated); 'allow-read-only' approves every read-only tool
    #[arg(long, value_name = "TOOLS")]
    pub auto_approve: Option<String>,

    /// Enable write access for remote operations
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub write_access: Option<bool>,

    /// GitHub personal access token passed to the server
    #[arg(long, env = "GITHUB_PERSONAL_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory the server binary is installed into when it is not on PATH
    #[arg(long, value_name = "DIR", env = "GITHUB_MCP_INSTALL_DIR", value_hint = clap::ValueHint::DirPath)]
    pub install_dir: Option<PathBuf>,

    /// Preview changes without writing them
    #[arg(short, long)]
    pub dry_run: bool,

    /// Create timestamped backup of each settings file before changing it
    #[arg(short, long)]
    pub backup: bool,
}
