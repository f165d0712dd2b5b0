//! Core traits for Schema Porter
//!
//! This module defines the capabilities the engine consumes from the outside
//! world: a [`Connection`] that streams catalog rows and a [`RowTransformer`]
//! that turns one row into SQL text. It also carries the [`Validatable`]
//! trait shared by the run-plan types.

use crate::error::PorterResult;
use crate::types::Row;

// ============================================================================
// Connection
// ============================================================================

/// Lazy sequence of rows produced by [`Connection::exec`].
///
/// Each item is fetched on demand; an `Err` item means streaming failed
/// part-way through the result set.
pub type RowStream<'a> = Box<dyn Iterator<Item = PorterResult<Row>> + 'a>;

/// A database connection the engine can run catalog queries against
///
/// Implementations are reused sequentially for several queries. The engine
/// never starts a second query on a connection while a previous
/// [`RowStream`] is still alive.
///
/// # Example
///
/// ```rust,ignore
/// use porter_core::{Connection, PorterResult, Row, RowStream};
///
/// struct Fixed(Vec<Row>);
///
/// impl Connection for Fixed {
///     fn principal(&self) -> &str {
///         "HR"
///     }
///
///     fn exec<'a>(&'a self, _query: &str) -> PorterResult<RowStream<'a>> {
///         Ok(Box::new(self.0.iter().cloned().map(Ok)))
///     }
/// }
/// ```
pub trait Connection {
    /// Schema/user the connection is logged in as
    fn principal(&self) -> &str;

    /// Execute `query` and stream its rows in delivery order
    fn exec<'a>(&'a self, query: &str) -> PorterResult<RowStream<'a>>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn principal(&self) -> &str {
        (**self).principal()
    }

    fn exec<'a>(&'a self, query: &str) -> PorterResult<RowStream<'a>> {
        (**self).exec(query)
    }
}

// ============================================================================
// RowTransformer
// ============================================================================

/// Converts one catalog row into a SQL text fragment
///
/// Transformers must be pure: anything they need (principal names, clause
/// patterns) is captured immutably when they are built. Any closure
/// `Fn(&Row) -> anyhow::Result<String>` is a transformer.
pub trait RowTransformer {
    /// Produce the SQL fragment for `row`
    fn transform(&self, row: &Row) -> anyhow::Result<String>;
}

impl<F> RowTransformer for F
where
    F: Fn(&Row) -> anyhow::Result<String>,
{
    fn transform(&self, row: &Row) -> anyhow::Result<String> {
        self(row)
    }
}

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return a configuration error if the state is invalid.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `PorterError` describing the problem.
    fn validate(&self) -> PorterResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
