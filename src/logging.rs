//! Tracing setup.
//!
//! Everything goes to a daily rolling file under `<home>/logs`. Stderr gets a
//! copy only with `--verbose`, since stdout belongs to command output and the
//! TUI.

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::error::FocusError;

/// Log file name prefix.
pub const LOG_PREFIX: &str = "focus-space";

/// Rolled log files kept on disk.
pub const MAX_LOG_FILES: usize = 5;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Filter directive scoped to this crate.
#[must_use]
pub fn crate_directive(level: &str) -> String {
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

/// The filter to install.
///
/// `--verbose` means debug for this crate. A bare level in `RUST_LOG` is
/// scoped to this crate; anything else in it is used as written.
#[must_use]
pub fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return crate_directive(&LevelFilter::DEBUG.to_string());
    }

    match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) if value.parse::<LevelFilter>().is_ok() => crate_directive(value),
        Some(value) => value.to_string(),
        None => crate_directive(&LevelFilter::INFO.to_string()),
    }
}

/// Install the global subscriber. Later calls are no-ops.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn enable_logging(logs_dir: &Path, verbose: bool) -> Result<(), FocusError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(logs_dir)?;
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .build(logs_dir)
        .map_err(|e| FocusError::Config(format!("cannot open log directory: {e}")))?;

    let stderr = std::io::stderr.with_filter(move |_| verbose);
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(verbose, rust_log.as_deref());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&directive))
        .with_ansi(false)
        .with_target(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .is_ok();

    INITIALIZED.set(()).ok();
    if installed {
        tracing::debug!(dir = %logs_dir.display(), %directive, "logging enabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_crate_directive() {
        assert_eq!(crate_directive("debug"), "focus_space=debug");
    }

    #[test]
    fn test_verbose_wins() {
        assert_eq!(filter_directive(true, Some("warn")), "focus_space=debug");
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(filter_directive(false, None), "focus_space=info");
        assert_eq!(filter_directive(false, Some("  ")), "focus_space=info");
    }

    #[test]
    fn test_bare_rust_log_level_is_scoped() {
        assert_eq!(filter_directive(false, Some("trace")), "focus_space=trace");
        assert_eq!(filter_directive(false, Some("WARN")), "focus_space=WARN");
    }

    #[test]
    fn test_full_rust_log_directive_is_kept() {
        assert_eq!(
            filter_directive(false, Some("focus_space=debug")),
            "focus_space=debug"
        );
        assert_eq!(
            filter_directive(false, Some("info,rusqlite=warn")),
            "info,rusqlite=warn"
        );
    }

    #[test]
    fn test_enable_logging_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let logs = dir.path().join("logs");

        enable_logging(&logs, false).unwrap();
        enable_logging(&logs, false).unwrap();

        assert!(logs.is_dir());
    }
}
