#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use github_mcp::{
    app_config::{AppConfig, SetupDefaults},
    assistant,
    cli::{Cli, Commands, SetupArgs},
    installer::BinaryInstaller,
    setup::{run_setup_with, AssistantOutcome, SetupContext, SetupRequest},
    tool_catalog::ToolCatalog,
    TOKEN_ENV_VAR,
};
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_TOOL: &str = "cline";

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.debug, cli.trace);

    let defaults = match load_and_log_config(cli.config.as_deref()) {
        Ok(app_config) => app_config.map(|config| config.setup_defaults()).unwrap_or_default(),
        Err(e) => {
            warn!("Ignoring app configuration: {e:#}");
            SetupDefaults::default()
        },
    };

    match cli.command {
        Commands::Setup(args) => {
            let exit_code = handle_setup_command(args, &defaults)?;
            std::process::exit(exit_code);
        },
    }
}

/// Initialize tracing subscriber with appropriate log level
fn initialize_tracing(debug: bool, trace: bool) {
    let log_level = if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::builder().with_default_directive(log_level.into()).from_env_lossy())
        .init();
}

/// Load application configuration and log its status
fn load_and_log_config(path: Option<&std::path::Path>) -> Result<Option<AppConfig>> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };
    let app_config = AppConfig::load_from(&config_path).context("Failed to load app configuration")?;

    if app_config.is_some() {
        debug!("Loaded app configuration from: {}", config_path.display());
    } else {
        debug!("No app configuration file found at: {}", config_path.display());
    }

    Ok(app_config)
}

/// Command-line flags win over config file defaults, which win over built-in defaults.
fn build_request(args: SetupArgs, defaults: &SetupDefaults) -> SetupRequest {
    SetupRequest {
        binary_path: None,
        token: args.token,
        auto_approve: args.auto_approve.or_else(|| defaults.auto_approve.clone()).unwrap_or_default(),
        assistants: args
            .tool
            .or_else(|| defaults.tool.clone())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string()),
        write_access: args.write_access.or(defaults.write_access).unwrap_or(false),
        dry_run: args.dry_run,
        backup: args.backup,
    }
}

fn handle_setup_command(args: SetupArgs, defaults: &SetupDefaults) -> Result<i32> {
    let install_dir = args.install_dir.clone().or_else(|| defaults.install_dir.clone());
    let request = build_request(args, defaults);

    if request.token.as_deref().map_or(true, str::is_empty) {
        eprintln!("Error: {TOKEN_ENV_VAR} environment variable is required");
        return Ok(1);
    }

    let home = github_mcp::home_dir()?;
    let platform = assistant::current_platform().map_err(|e| {
        debug!("No settings layout for this platform: {e}");
        std::env::consts::OS.to_string()
    });
    let catalog = ToolCatalog::builtin();
    let installer = BinaryInstaller::new(
        install_dir.unwrap_or_else(|| BinaryInstaller::default_install_dir(&home)),
    );
    debug!("Binary install directory: {}", installer.install_dir().display());

    let context = SetupContext { home, platform, catalog: &catalog, installer };
    let outcome = run_setup_with(&context, &request, print_outcome);

    if outcome.is_success() {
        if request.dry_run {
            println!("\nDry run completed, no files were changed.");
        } else {
            println!("\nSetup completed successfully!");
        }
    } else {
        println!("\nSetup completed with errors:");
        for failure in outcome.failures() {
            println!("  - {failure}");
        }
    }

    Ok(outcome.exit_code())
}

fn print_outcome(outcome: &AssistantOutcome) {
    match &outcome.result {
        Ok(report) if report.written => {
            println!("github-mcp successfully set up for {}", outcome.assistant);
            println!("  {} MCP settings updated at {}", outcome.assistant, report.path.display());
            if let Some(ref backup) = report.backup_path {
                println!("  Backup created: {}", backup.display());
            }
        },
        Ok(report) => {
            println!("[DRY RUN] {outcome}");
            match serde_json::to_string_pretty(&report.document) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Failed to render settings for {}: {e}", outcome.assistant),
            }
        },
        Err(_) => eprintln!("{outcome}"),
    }
}
