//! In-memory connection
//!
//! Serves canned result sets keyed by query text. Useful for tests and for
//! embedders that already hold catalog rows in memory.

use porter_core::{Connection, PorterError, PorterResult, Row, RowStream, Value};
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned result set for one query
#[derive(Debug, Clone, Default)]
struct CannedResult {
    rows: Vec<Row>,
    /// Fail immediately on exec
    exec_error: Option<String>,
    /// Fail after yielding this many rows
    stream_error: Option<(usize, String)>,
}

/// Connection backed by in-memory result sets
#[derive(Debug, Default)]
pub struct MemoryConnection {
    principal: String,
    results: HashMap<String, CannedResult>,
    executed: RefCell<Vec<String>>,
}

/// Queries match after trimming surrounding whitespace
pub(crate) fn query_key(query: &str) -> String {
    query.trim().to_string()
}

impl MemoryConnection {
    /// Create a connection for a principal with no result sets
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            ..Self::default()
        }
    }

    /// Register the rows returned by `query`
    pub fn with_rows<V: Into<Value>>(mut self, query: &str, rows: Vec<Vec<V>>) -> Self {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|r| r.into_iter().collect::<Row>())
            .collect();
        self.add_rows(query, rows);
        self
    }

    /// Register already built rows for `query`
    pub fn add_rows(&mut self, query: &str, rows: Vec<Row>) {
        self.results.entry(query_key(query)).or_default().rows = rows;
    }

    /// Make `query` fail as soon as it is executed
    pub fn failing(mut self, query: &str, message: impl Into<String>) -> Self {
        self.results.entry(query_key(query)).or_default().exec_error = Some(message.into());
        self
    }

    /// Make `query` fail after yielding `rows` rows
    pub fn failing_after(mut self, query: &str, rows: usize, message: impl Into<String>) -> Self {
        self.results.entry(query_key(query)).or_default().stream_error =
            Some((rows, message.into()));
        self
    }

    /// Queries executed so far, in order
    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl Connection for MemoryConnection {
    fn principal(&self) -> &str {
        &self.principal
    }

    fn exec<'a>(&'a self, query: &str) -> PorterResult<RowStream<'a>> {
        let key = query_key(query);
        self.executed.borrow_mut().push(key.clone());

        let result = self.results.get(&key).ok_or_else(|| {
            PorterError::query(&self.principal, format!("no result set for query: {}", key))
        })?;

        if let Some(message) = &result.exec_error {
            return Err(PorterError::query(&self.principal, message.clone()));
        }

        let principal = self.principal.as_str();
        let rows = result.rows.iter().cloned().map(Ok::<Row, PorterError>);
        match &result.stream_error {
            Some((after, message)) => Ok(Box::new(
                rows.take(*after)
                    .chain(std::iter::once(Err(PorterError::query(principal, message.clone())))),
            )),
            None => Ok(Box::new(rows)),
        }
    }
}
