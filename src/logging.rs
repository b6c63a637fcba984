//! Tracing subscriber initialization.
//!
//! Logs are written to a file instead of the terminal so they never corrupt
//! the TUI; watch them with `tail -f` in a separate terminal. Respects
//! `RUST_LOG`, defaulting to "info".

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize file-based logging. Errors if the subscriber is already set
/// or the log directory cannot be created.
pub fn init(log_path: &Path) -> Result<()> {
    let parent = log_path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("invalid log file path: {}", log_path.display()))?;
    let directory = parent.unwrap_or_else(|| Path::new("."));

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .try_init()
        .map_err(|e| anyhow!("failed to set tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn init_creates_log_directory_if_missing() {
        let test_dir = std::env::temp_dir().join("gridfield_test_logs");
        let log_file = test_dir.join("demo.log");
        let _ = fs::remove_dir_all(&test_dir);

        // A second init in the same process fails on the global subscriber,
        // but the directory is created either way.
        let _ = init(&log_file);
        assert!(test_dir.exists());

        let _ = fs::remove_dir_all(&test_dir);
    }
}
