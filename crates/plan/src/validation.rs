//! Validation of a run plan
//!
//! Every entry is checked against the script configuration and the
//! connection set before anything touches the filesystem. Validation stops
//! at the first invalid entry.

use crate::{ConnectionSet, ParameterEntry, ScriptConfig};
use porter_core::{PorterError, PorterResult, Validatable};
use std::collections::HashSet;

/// Identification of an entry in error messages: `#<index> (<label>)`
pub fn entry_id(index: usize, entry: &ParameterEntry) -> String {
    if entry.label.trim().is_empty() {
        format!("#{}", index)
    } else {
        format!("#{} ({})", index, entry.label)
    }
}

/// Validate a single entry
pub fn validate_entry(
    index: usize,
    entry: &ParameterEntry,
    config: &ScriptConfig,
    connections: &ConnectionSet,
) -> PorterResult<()> {
    let id = entry_id(index, entry);

    if entry.operation.is_blank() {
        return Err(PorterError::configuration(
            id,
            "operation",
            "operation type can not be empty",
        ));
    }

    let target = config.get(&entry.operation).ok_or_else(|| {
        PorterError::configuration(
            id.clone(),
            "operation",
            format!(
                "operation type '{}' has no script configuration",
                entry.operation
            ),
        )
    })?;

    if let Err(PorterError::Configuration { field, message, .. }) = target.validate() {
        return Err(PorterError::configuration(id, field, message));
    }

    if entry.label.trim().is_empty() {
        return Err(PorterError::configuration(id, "label", "label can not be empty"));
    }

    if entry.query.trim().is_empty() {
        return Err(PorterError::configuration(id, "query", "query can not be empty"));
    }

    if entry.transform.is_none() {
        return Err(PorterError::configuration(
            id,
            "transform",
            "transform function can not be empty",
        ));
    }

    if !connections.contains(entry.role) {
        return Err(PorterError::configuration(
            id,
            "role",
            format!("no connection bound to role '{}'", entry.role),
        ));
    }

    Ok(())
}

/// Validate every entry, in order, stopping at the first failure
pub fn validate_entries(
    entries: &[ParameterEntry],
    config: &ScriptConfig,
    connections: &ConnectionSet,
) -> PorterResult<()> {
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        validate_entry(index, entry, config, connections)?;

        if !seen.insert((entry.operation.clone(), entry.label.clone())) {
            tracing::warn!(
                entry = %entry.display_name(),
                "duplicate task label, its script will be overwritten and referenced twice",
            );
        }
    }

    tracing::debug!(entries = entries.len(), "run plan validated");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
