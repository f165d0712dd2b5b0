//! Operation types and connection roles
//!
//! An [`OperationType`] classifies a generation task ("drop", "make", or any
//! caller-defined kind) and selects its output folder and aggregate file.
//! A [`ConnectionRole`] selects which connection a task queries.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// OperationType
// ============================================================================

/// Classification of a generation task
///
/// The set is open: any non-empty name is a valid operation type as long as
/// the script configuration declares a target for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationType(String);

impl OperationType {
    /// Create an operation type from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Scripts that remove existing destination objects
    pub fn drop() -> Self {
        Self::new("drop")
    }

    /// Scripts that recreate and repopulate objects from the source
    pub fn make() -> Self {
        Self::new("make")
    }

    /// The operation name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the name is blank
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for OperationType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ============================================================================
// ConnectionRole
// ============================================================================

/// Which side of the migration a task reads its catalog from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionRole {
    /// Database the objects are copied from
    #[serde(alias = "src")]
    Source,
    /// Database the objects are dropped from and recreated in
    #[serde(alias = "dest")]
    Destination,
}

impl ConnectionRole {
    /// All roles, in a stable order
    pub fn all() -> [ConnectionRole; 2] {
        [ConnectionRole::Source, ConnectionRole::Destination]
    }

    /// Name used in settings files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionRole::Source => "source",
            ConnectionRole::Destination => "destination",
        }
    }
}

impl fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
