//! # Default Catalog
//!
//! Ready-made generation tasks for migrating an Oracle schema: drop the
//! destination's indexes, tables and sequences, then recreate tables, copy
//! their rows, and recreate sequences and indexes from the source's DDL.
//!
//! The catalog also resolves declarative [`TaskSpec`]s from settings files
//! into runnable [`ParameterEntry`] values.

pub mod queries;
pub mod transforms;

pub use transforms::TransformKind;

use porter_plan::{
    ConnectionRole, ConnectionSet, OperationType, ParameterEntry, TaskSpec,
};

/// Principal names the built-in transformers qualify objects with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Principals {
    pub source: String,
    pub destination: String,
}

impl Principals {
    /// Create a principal pair
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Read the principals of the bound connections; unbound roles yield ""
    pub fn from_connections(connections: &ConnectionSet) -> Self {
        Self::new(
            connections
                .principal(ConnectionRole::Source)
                .unwrap_or_default(),
            connections
                .principal(ConnectionRole::Destination)
                .unwrap_or_default(),
        )
    }
}

/// The default task list, in execution order
pub fn default_tasks() -> Vec<TaskSpec> {
    use TransformKind::*;

    [
        ("index", OperationType::drop(), DropIndex),
        ("table", OperationType::drop(), DropTable),
        ("sequence", OperationType::drop(), DropSequence),
        ("create_table", OperationType::make(), CopyTableDdl),
        ("insert", OperationType::make(), CopyRows),
        ("sequence", OperationType::make(), CopySequenceDdl),
        ("index", OperationType::make(), CopyIndexDdl),
    ]
    .into_iter()
    .map(|(label, operation, kind)| TaskSpec::new(label, operation, kind.default_role(), kind.name()))
    .collect()
}

/// Turn a task spec into an entry.
///
/// An unknown transformer name yields an entry without a transformer, which
/// is rejected when the engine is configured.
pub fn resolve_task(spec: &TaskSpec, principals: &Principals) -> ParameterEntry {
    match spec.transform.parse::<TransformKind>() {
        Ok(kind) => {
            let query = spec
                .query
                .clone()
                .unwrap_or_else(|| kind.default_query(principals));
            ParameterEntry::without_transform(&spec.label, spec.role, spec.operation.clone(), query)
                .with_shared_transform(kind.build(principals))
        }
        Err(reason) => {
            tracing::warn!(task = %spec.label, %reason, "task has no usable transformer");
            ParameterEntry::without_transform(
                &spec.label,
                spec.role,
                spec.operation.clone(),
                spec.query.clone().unwrap_or_default(),
            )
        }
    }
}

/// Resolve a list of task specs, keeping their order
pub fn resolve_tasks(specs: &[TaskSpec], principals: &Principals) -> Vec<ParameterEntry> {
    specs.iter().map(|spec| resolve_task(spec, principals)).collect()
}

/// The default task list resolved for a principal pair
pub fn default_entries(principals: &Principals) -> Vec<ParameterEntry> {
    resolve_tasks(&default_tasks(), principals)
}
