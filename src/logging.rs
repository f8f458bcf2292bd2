//! Logging initialization
//!
//! TUI mode: logs to `<data dir>/logs/servicehub-{datetime}.log`
//! CLI mode: logs to stderr
//!
//! The level comes from `RUST_LOG` when set, otherwise from the settings
//! file, with `--verbose` forcing `debug`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{HubError, HubResult};

/// Keep alive for the whole program so buffered file logs get flushed
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

/// File name for a TUI session started now
pub fn log_file_name() -> String {
    format!("servicehub-{}.log", chrono::Utc::now().format("%Y%m%dT%H%M%SZ"))
}

/// Filter directive: `RUST_LOG` wins, then `--verbose`, then the configured level
pub fn filter_directive(rust_log: Option<String>, configured: &str, verbose: bool) -> String {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => "debug".to_string(),
        _ => configured.to_string(),
    }
}

/// Level used when the configured directive does not parse
pub const FALLBACK_LEVEL: &str = "info";

/// Parse `directive`, falling back to `FALLBACK_LEVEL` and returning the parse error
pub fn build_filter(directive: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (
            EnvFilter::new(FALLBACK_LEVEL),
            Some(format!("invalid log level '{}': {}", directive, e)),
        ),
    }
}

pub fn init_logging(
    logs_dir: &Path,
    level: &str,
    is_tui_mode: bool,
    verbose: bool,
) -> HubResult<LoggingHandle> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), level, verbose);
    let (filter, rejected) = build_filter(&directive);

    let handle = if is_tui_mode {
        std::fs::create_dir_all(logs_dir)?;
        let file_name = log_file_name();
        let log_file_path = logs_dir.join(&file_name);

        let file_appender = tracing_appender::rolling::never(logs_dir, &file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init()
            .map_err(|e| HubError::Config(format!("Failed to initialize logging: {}", e)))?;

        LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        }
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| HubError::Config(format!("Failed to initialize logging: {}", e)))?;

        LoggingHandle {
            _guard: None,
            log_file_path: None,
        }
    };

    if let Some(reason) = rejected {
        tracing::warn!(fallback = FALLBACK_LEVEL, "{}", reason);
    }

    Ok(handle)
}
