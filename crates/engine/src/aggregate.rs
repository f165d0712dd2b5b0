//! # Aggregate Files
//!
//! An aggregate ("run") file chains the scripts of one operation type so a
//! SQL client can execute them in order with its script-inclusion directive:
//!
//! ```text
//! -- script cleaned at 2024-05-01 10:00:00 +0200
//! @drop/index.sql
//! @drop/table.sql
//! ```
//!
//! The file is truncated once per run and then only ever appended to.

use porter_core::{PorterError, PorterResult};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Timestamp used in header comments
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z").to_string()
}

/// Truncates and appends to aggregate files
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateFileManager {
    console: bool,
}

impl AggregateFileManager {
    /// Create a manager; `console` enables an info line per append
    pub fn new(console: bool) -> Self {
        Self { console }
    }

    /// Truncate `path`, writing a header comment if requested
    pub fn reset(&self, path: &Path, write_header: bool) -> PorterResult<()> {
        let mut file = File::create(path).map_err(|e| PorterError::file_write(path, e))?;
        if write_header {
            writeln!(file, "-- script cleaned at {}", timestamp())
                .map_err(|e| PorterError::file_write(path, e))?;
        }
        tracing::debug!(aggregate = %path.display(), "aggregate file reset");
        Ok(())
    }

    /// Append one `@<generated>` line to the aggregate file at `path`
    pub fn append(&self, path: &Path, generated: &Path) -> PorterResult<()> {
        if self.console {
            tracing::info!(
                script = %generated.display(),
                aggregate = %path.display(),
                "script reference added",
            );
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| PorterError::file_write(path, e))?;
        writeln!(file, "@{}", generated.display()).map_err(|e| PorterError::file_write(path, e))
    }
}

// ============================================================================
// Tests
// ============================================================================
