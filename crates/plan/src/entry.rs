//! Parameter entries
//!
//! A [`ParameterEntry`] is one generation task: which connection to query,
//! what to ask it, how to turn each row into SQL, and where the resulting
//! script belongs.

use crate::{ConnectionRole, OperationType};
use porter_core::RowTransformer;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a row transformer
pub type SharedTransformer = Arc<dyn RowTransformer>;

/// One generation task
#[derive(Clone)]
pub struct ParameterEntry {
    /// Task label, also the generated file stem (`<label>.sql`)
    pub label: String,

    /// Connection the query runs against
    pub role: ConnectionRole,

    /// Operation type selecting the output folder and aggregate file
    pub operation: OperationType,

    /// Catalog query text
    pub query: String,

    /// Row transformer; `None` when the task names no known transformer
    pub transform: Option<SharedTransformer>,
}

impl ParameterEntry {
    /// Create a complete entry
    pub fn new(
        label: impl Into<String>,
        role: ConnectionRole,
        operation: impl Into<OperationType>,
        query: impl Into<String>,
        transform: impl RowTransformer + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            role,
            operation: operation.into(),
            query: query.into(),
            transform: Some(Arc::new(transform)),
        }
    }

    /// Create an entry without a transformer
    pub fn without_transform(
        label: impl Into<String>,
        role: ConnectionRole,
        operation: impl Into<OperationType>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            role,
            operation: operation.into(),
            query: query.into(),
            transform: None,
        }
    }

    /// Replace the transformer with an already shared one
    pub fn with_shared_transform(mut self, transform: SharedTransformer) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Short identification used in logs and errors, e.g. `drop/index`
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.operation, self.label)
    }
}

impl fmt::Debug for ParameterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterEntry")
            .field("label", &self.label)
            .field("role", &self.role)
            .field("operation", &self.operation)
            .field("query", &self.query)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
