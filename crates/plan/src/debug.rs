//! Debug options
//!
//! Independent toggles that control console output and the optional
//! header/footer lines of generated scripts.

use serde::{Deserialize, Serialize};

/// Run-wide debug toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Log elapsed time per task (only when `console` is also set)
    pub timing: bool,

    /// Log queries and aggregate-file appends
    pub console: bool,

    /// Finish every generated script with a `COMMIT;` marker
    pub commit: bool,

    /// Write a timestamped header comment into scripts and aggregate files
    pub comment: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            timing: true,
            console: true,
            commit: false,
            comment: true,
        }
    }
}

impl DebugOptions {
    /// All toggles off: scripts contain only the transformed rows
    pub fn silent() -> Self {
        Self {
            timing: false,
            console: false,
            commit: false,
            comment: false,
        }
    }

    /// Set the commit marker toggle
    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    /// Set the header comment toggle
    pub fn with_comment(mut self, comment: bool) -> Self {
        self.comment = comment;
        self
    }

    /// Set the console logging toggle
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Set the timing toggle
    pub fn with_timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }

    /// Whether per-task elapsed time should be reported
    pub fn reports_timing(&self) -> bool {
        self.timing && self.console
    }
}
