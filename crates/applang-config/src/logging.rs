//! Centralized logging initialization with environment variable support

use crate::config::{LogFormat, LoggingConfig};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Environment variables (in priority order):
/// - `RUST_LOG`: Standard Rust log filter (takes precedence over all)
/// - `LOG_FORMAT`: Override format (json, pretty)
///
/// Logs go to `config.file` when set and writable, stderr otherwise. Calling
/// this again after a subscriber is installed is a no-op, which matters when
/// the hook module is activated more than once in one process.
///
/// # Examples
///
/// ```bash
/// # Trace every rule evaluation in the hooked process
/// APPLANG__LOGGING__LEVEL=debug notepad.exe
///
/// # Module-specific filtering
/// RUST_LOG=applang_foundation=debug applang check "C:\Windows\notepad.exe"
/// ```
pub fn initialize(config: &LoggingConfig) {
    let log_level = config
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);

    // RUST_LOG takes precedence over config
    let env_filter = EnvFilter::from_default_env().add_directive(log_level.into());

    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| match f.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "human" => Some(LogFormat::Pretty),
            _ => None,
        })
        .unwrap_or_else(|| config.format.clone());

    let mut file_error = None;
    let (writer, ansi) = match &config.file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Err(e) => {
                file_error = Some((path.clone(), e));
                (BoxMakeWriter::new(std::io::stderr), true)
            }
        },
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let installed = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_ansi(ansi).with_writer(writer))
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    if let Some((path, e)) = file_error {
        tracing::warn!(path = %path.display(), error = %e, "Cannot open log file, logging to stderr");
    }
}
