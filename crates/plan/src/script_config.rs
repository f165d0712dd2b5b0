//! Script configuration
//!
//! Each operation type owns one output folder, where its generated scripts
//! land, and one aggregate "run" file that chains those scripts together.

use crate::OperationType;
use porter_core::{PorterError, PorterResult, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// ScriptTarget
// ============================================================================

/// Output location for one operation type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTarget {
    /// Operation type this target serves
    pub operation: OperationType,

    /// Folder receiving one `<label>.sql` file per task
    pub folder: PathBuf,

    /// Aggregate file listing `@<script>` lines in task order
    pub aggregate_file: PathBuf,
}

impl ScriptTarget {
    /// Create a new target
    pub fn new(
        operation: impl Into<OperationType>,
        folder: impl Into<PathBuf>,
        aggregate_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            operation: operation.into(),
            folder: folder.into(),
            aggregate_file: aggregate_file.into(),
        }
    }

    /// Path of the generated script for a task label
    pub fn script_path(&self, label: &str) -> PathBuf {
        self.folder.join(format!("{}.sql", label))
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty()
}

impl Validatable for ScriptTarget {
    fn validate(&self) -> PorterResult<()> {
        let entry = format!("target '{}'", self.operation);
        if self.operation.is_blank() {
            return Err(PorterError::configuration(
                entry,
                "operation",
                "operation name can not be empty",
            ));
        }
        if is_blank(&self.folder) {
            return Err(PorterError::configuration(
                entry,
                "folder",
                format!("invalid folder name for '{}'", self.operation),
            ));
        }
        if is_blank(&self.aggregate_file) {
            return Err(PorterError::configuration(
                entry,
                "aggregate_file",
                format!("invalid aggregate file name for '{}'", self.operation),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// ScriptConfig
// ============================================================================

/// Ordered set of script targets, one per operation type
///
/// Declaration order is significant: targets are prepared in this order at
/// the start of every run.
///
/// Loading from a settings file goes through [`ScriptConfig::insert`], so a
/// later target for an operation type replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScriptTarget>", into = "Vec<ScriptTarget>")]
pub struct ScriptConfig {
    targets: Vec<ScriptTarget>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self::new()
            .with_target(ScriptTarget::new(OperationType::make(), "make", "make_all.sql"))
            .with_target(ScriptTarget::new(OperationType::drop(), "drop", "drop_all.sql"))
    }
}

impl ScriptConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Add a target, replacing any earlier target for the same operation type
    /// while keeping its original position
    pub fn with_target(mut self, target: ScriptTarget) -> Self {
        self.insert(target);
        self
    }

    /// Add or replace a target
    pub fn insert(&mut self, target: ScriptTarget) {
        match self
            .targets
            .iter_mut()
            .find(|t| t.operation == target.operation)
        {
            Some(existing) => *existing = target,
            None => self.targets.push(target),
        }
    }

    /// Look up the target for an operation type
    pub fn get(&self, operation: &OperationType) -> Option<&ScriptTarget> {
        self.targets.iter().find(|t| &t.operation == operation)
    }

    /// Check if an operation type is declared
    pub fn contains(&self, operation: &OperationType) -> bool {
        self.get(operation).is_some()
    }

    /// Targets in declaration order
    pub fn targets(&self) -> &[ScriptTarget] {
        &self.targets
    }

    /// Number of declared targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if no target is declared
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl From<Vec<ScriptTarget>> for ScriptConfig {
    fn from(targets: Vec<ScriptTarget>) -> Self {
        targets
            .into_iter()
            .fold(ScriptConfig::new(), ScriptConfig::with_target)
    }
}

impl From<ScriptConfig> for Vec<ScriptTarget> {
    fn from(config: ScriptConfig) -> Self {
        config.targets
    }
}

// ============================================================================
// Tests
// ============================================================================
