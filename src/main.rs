//! Brainscan: MRI intake and tumor classification
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use brainscan::adapters::sanitize::SanitizingMakeWriter;
use brainscan::tui::App;
use brainscan::Config;

const LOG_MODE_ENV: &str = "BRAINSCAN_LOG_MODE";
const LOG_FILE_ENV: &str = "BRAINSCAN_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "brainscan.log";

/// Where log lines go. The alternate screen must never receive them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogMode {
    File,
    Stdout,
}

impl LogMode {
    /// `file` and `stdout` are explicit; anything else picks the file when
    /// stdout is a terminal (the TUI owns it) and stdout otherwise.
    fn resolve(setting: Option<&str>, interactive: bool) -> Self {
        match setting {
            Some("file") => Self::File,
            Some("stdout") => Self::Stdout,
            _ if interactive => Self::File,
            _ => Self::Stdout,
        }
    }
}

fn init_logging() -> Result<WorkerGuard> {
    let setting = std::env::var(LOG_MODE_ENV).ok();
    let mode = LogMode::resolve(setting.as_deref(), std::io::stdout().is_terminal());

    let (writer, guard) = match mode {
        LogMode::File => {
            let log_file =
                std::env::var(LOG_FILE_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
            if let Some(parent) = Path::new(&log_file).parent() {
                // A directory that cannot be created surfaces on open below.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("opening log file {log_file}"))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stdout => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let _guard = init_logging()?;
    tracing::info!("Starting Brainscan...");

    let config = Config::from_env()?;
    App::new(&config)?.run()?;

    tracing::info!("Brainscan shutdown complete.");
    Ok(())
}
