// SPDX-License-Identifier: GPL-3.0-or-later
// tabpad - File logging bootstrap

use anyhow::Result;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;

const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start file logging under `log_dir`. The terminal belongs to the TUI, so
/// logs never go to stdout/stderr. Idempotent; level comes from RUST_LOG
/// with "info" as fallback.
pub fn init(log_dir: &Path) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    fs::create_dir_all(log_dir)?;
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory(log_dir).basename("tabpad"))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .start()?;
    let _ = LOGGER.set(handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_is_idempotent() {
        let dir = tempdir().unwrap();
        init(dir.path()).unwrap();
        init(dir.path()).unwrap();
        // The logger installed above is process-global and keeps writing to
        // this directory; leak it so logging in later tests still works.
        std::mem::forget(dir);
    }
}
