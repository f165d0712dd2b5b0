//! Snapshot connection
//!
//! Replays catalog result sets captured to a JSON file, so scripts can be
//! produced without a live database:
//!
//! ```json
//! {
//!   "principal": "HR",
//!   "queries": [
//!     { "query": "SELECT object_name FROM user_objects ...", "rows": [["EMP_IDX"], ["DEPT_IDX"]] }
//!   ]
//! }
//! ```
//!
//! Query text is matched after trimming surrounding whitespace.

use porter_core::{Connection, PorterError, PorterResult, Row, RowStream};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::memory::MemoryConnection;

/// One captured query and its rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedQuery {
    pub query: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// On-disk snapshot format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub principal: String,
    #[serde(default)]
    pub queries: Vec<CapturedQuery>,
}

/// Connection replaying a [`SnapshotFile`]
#[derive(Debug)]
pub struct SnapshotConnection {
    inner: MemoryConnection,
    queries: usize,
}

impl SnapshotConnection {
    /// Build a connection from an in-memory snapshot
    pub fn from_snapshot(snapshot: SnapshotFile) -> Self {
        let mut inner = MemoryConnection::new(snapshot.principal);
        let queries = snapshot.queries.len();
        for captured in snapshot.queries {
            inner.add_rows(&captured.query, captured.rows);
        }
        Self { inner, queries }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> PorterResult<Self> {
        let snapshot: SnapshotFile = serde_json::from_str(json)
            .map_err(|e| PorterError::connection(format!("invalid snapshot: {}", e)))?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot file
    pub fn load(path: impl AsRef<Path>) -> PorterResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| PorterError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let snapshot: SnapshotFile = serde_json::from_str(&json).map_err(|e| {
            PorterError::connection(format!("invalid snapshot '{}': {}", path.display(), e))
        })?;
        let conn = Self::from_snapshot(snapshot);

        tracing::debug!(
            path = %path.display(),
            principal = %conn.principal(),
            queries = conn.queries,
            "snapshot loaded",
        );
        Ok(conn)
    }

    /// Number of captured queries
    pub fn query_count(&self) -> usize {
        self.queries
    }
}

impl Connection for SnapshotConnection {
    fn principal(&self) -> &str {
        self.inner.principal()
    }

    fn exec<'a>(&'a self, query: &str) -> PorterResult<RowStream<'a>> {
        self.inner.exec(query)
    }
}
