//! Settings files
//!
//! A settings file describes a run without code: the debug toggles, the
//! script targets, and optionally the task list. TOML is the primary
//! format; files ending in `.json` are read and written as JSON.
//!
//! ```toml
//! [debug]
//! timing = true
//! console = true
//! commit = false
//! comment = true
//!
//! [[targets]]
//! operation = "drop"
//! folder = "drop"
//! aggregate_file = "drop_all.sql"
//!
//! [[tasks]]
//! label = "index"
//! operation = "drop"
//! role = "destination"
//! transform = "drop_index"
//! ```
//!
//! Tasks name their transformer by key; turning a [`TaskSpec`] into a
//! runnable entry is the job of the engine's catalog.

use crate::{ConnectionRole, DebugOptions, OperationType, ScriptConfig};
use porter_core::{PorterError, PorterResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// TaskSpec
// ============================================================================

/// Declarative form of a generation task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Task label, also the generated file stem
    pub label: String,

    /// Operation type
    pub operation: OperationType,

    /// Connection role the query runs against
    pub role: ConnectionRole,

    /// Name of a built-in transformer
    pub transform: String,

    /// Catalog query; the transformer's default query is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl TaskSpec {
    /// Create a task using the transformer's default query
    pub fn new(
        label: impl Into<String>,
        operation: impl Into<OperationType>,
        role: ConnectionRole,
        transform: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            operation: operation.into(),
            role,
            transform: transform.into(),
            query: None,
        }
    }

    /// Override the catalog query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

// ============================================================================
// RunSettings
// ============================================================================

/// Everything a run needs apart from live connections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Debug toggles
    #[serde(default)]
    pub debug: DebugOptions,

    /// Script targets in declaration order
    #[serde(default)]
    pub targets: ScriptConfig,

    /// Task list; empty means "use the default catalog"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskSpec>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            debug: DebugOptions::default(),
            targets: ScriptConfig::default(),
            tasks: Vec::new(),
        }
    }
}

impl RunSettings {
    /// Check if the task list falls back to the default catalog
    pub fn uses_default_tasks(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// ============================================================================
// Load Functions
// ============================================================================

/// Parse settings from TOML text
pub fn settings_from_toml(text: &str) -> PorterResult<RunSettings> {
    toml::from_str(text).map_err(|e| PorterError::Settings(e.to_string()))
}

/// Parse settings from JSON text
pub fn settings_from_json(text: &str) -> PorterResult<RunSettings> {
    serde_json::from_str(text).map_err(|e| PorterError::Settings(e.to_string()))
}

/// Load settings from a file, choosing the format by extension
pub fn load_settings(path: impl AsRef<Path>) -> PorterResult<RunSettings> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| PorterError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parsed = if is_json(path) {
        settings_from_json(&text)
    } else {
        settings_from_toml(&text)
    };
    let settings = parsed.map_err(|e| {
        PorterError::with_context(format!("Loading '{}'", path.display()), e.to_string())
    })?;

    tracing::debug!(
        path = %path.display(),
        targets = settings.targets.len(),
        tasks = settings.tasks.len(),
        "settings loaded",
    );
    Ok(settings)
}

// ============================================================================
// Save Functions
// ============================================================================

/// Render settings as TOML
pub fn settings_to_toml(settings: &RunSettings) -> PorterResult<String> {
    toml::to_string_pretty(settings).map_err(|e| PorterError::Settings(e.to_string()))
}

/// Render settings as pretty JSON
pub fn settings_to_json(settings: &RunSettings) -> PorterResult<String> {
    serde_json::to_string_pretty(settings).map_err(|e| PorterError::Settings(e.to_string()))
}

/// Save settings to a file, choosing the format by extension
pub fn save_settings(settings: &RunSettings, path: impl AsRef<Path>) -> PorterResult<()> {
    let path = path.as_ref();
    let text = if is_json(path) {
        settings_to_json(settings)?
    } else {
        settings_to_toml(settings)?
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| PorterError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, text).map_err(|e| PorterError::file_write(path, e))
}

// ============================================================================
// Tests
// ============================================================================
