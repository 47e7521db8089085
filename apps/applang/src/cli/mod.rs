//! CLI command handling for applang

mod report;

use anyhow::{bail, Context, Result};
use applang_config::config::{self, AppConfig};
use applang_config::{logging, LoggingConfig};
use applang_foundation::{resolve, CurrentProcess, ProcessIdentity};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The main CLI struct.
#[derive(Parser)]
#[command(name = "applang")]
#[command(about = "Inspect per-app UI language override rules")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: $APPLANG_CONFIG, then the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate the configured rules against an executable path
    ///
    /// Uses the same matching as the hooked process: first match wins, an
    /// empty pattern ends the list, malformed patterns never match.
    ///
    /// Example:
    ///   applang check "C:\Windows\System32\notepad.exe"
    Check {
        /// Full executable path to test
        path: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured rules and whether each one takes part in matching
    Rules {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print this executable's own image path
    Whoami,
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Diagnostics go to stderr at `warn` unless `RUST_LOG` says otherwise, so
/// stdout only carries command output.
pub fn init_logging() {
    logging::initialize(&LoggingConfig {
        level: "warn".to_string(),
        ..Default::default()
    });
}

pub fn run(cli: Cli) -> Result<()> {
    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Check { path, json } => check(explicit, &path, json),
        Commands::Rules { json } => rules(explicit, json),
        Commands::Whoami => whoami(),
        Commands::Init { force } => init(explicit, force),
    }
}

fn load(explicit: Option<&Path>) -> Result<(Option<PathBuf>, AppConfig)> {
    let path = config::locate(explicit);
    debug!(path = ?path, "Using configuration");
    let config = AppConfig::load_from(path.as_deref()).context("Invalid configuration")?;
    Ok((path, config))
}

fn check(explicit: Option<&Path>, image_path: &str, json: bool) -> Result<()> {
    let (_, config) = load(explicit)?;
    let resolution = resolve(&config.rules(), image_path);
    let report = report::CheckReport::new(&resolution);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn rules(explicit: Option<&Path>, json: bool) -> Result<()> {
    let (path, config) = load(explicit)?;
    let listing = report::RuleListing::new(path, &config.rules());

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", listing);
    }
    Ok(())
}

fn whoami() -> Result<()> {
    let path = CurrentProcess
        .image_path()
        .context("Cannot determine the image path of this process")?;
    println!("{}", path.display());
    Ok(())
}

fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let Some(path) = config::locate(explicit).or_else(config::default_config_path) else {
        bail!("No configuration directory available, pass --config");
    };

    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    AppConfig::sample()
        .save(&path)
        .context("Cannot write starter configuration")?;
    println!("Wrote starter configuration to {}", path.display());
    Ok(())
}
