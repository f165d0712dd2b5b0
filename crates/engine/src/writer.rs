//! # Script Writer
//!
//! Runs one [`ParameterEntry`] end to end:
//!
//! ```text
//! folder/<label>.sql  ◄── [header] + transform(row) for each row + [COMMIT;]
//!         │
//!         └──► aggregate file  ◄── @folder/<label>.sql
//! ```
//!
//! Rows are streamed from the connection and written as they arrive, so
//! memory use is bounded by one row regardless of catalog size.

use porter_core::{Connection, PorterError, PorterResult, RowTransformer};
use porter_plan::{ConnectionSet, DebugOptions, ParameterEntry, ScriptConfig};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::aggregate::{AggregateFileManager, timestamp};

/// Marker closing every script when the `commit` toggle is on
pub const COMMIT_MARKER: &str = "COMMIT;\n";

// ============================================================================
// GeneratedScript
// ============================================================================

/// Outcome of one successful entry
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScript {
    /// Entry label
    pub label: String,

    /// Path of the generated script (`folder/<label>.sql`)
    pub path: PathBuf,

    /// Aggregate file the script was referenced from
    pub aggregate_file: PathBuf,

    /// Number of catalog rows transformed
    pub rows: usize,

    /// Wall-clock time spent on the entry
    pub elapsed: Duration,
}

// ============================================================================
// ScriptWriter
// ============================================================================

/// Produces the generated script of a single entry
#[derive(Debug, Clone, Copy)]
pub struct ScriptWriter {
    debug: DebugOptions,
    aggregates: AggregateFileManager,
}

impl ScriptWriter {
    /// Create a writer honouring the given debug toggles
    pub fn new(debug: DebugOptions) -> Self {
        Self {
            debug,
            aggregates: AggregateFileManager::new(debug.console),
        }
    }

    /// Debug toggles in effect
    pub fn debug(&self) -> &DebugOptions {
        &self.debug
    }

    /// Generate the script for `entry` and reference it from its aggregate file.
    ///
    /// The script file is closed on every path. When a row fails to
    /// transform, the fragments written before it stay on disk and the
    /// aggregate file is left untouched.
    pub fn run(
        &self,
        entry: &ParameterEntry,
        connections: &ConnectionSet,
        config: &ScriptConfig,
    ) -> PorterResult<GeneratedScript> {
        let start = Instant::now();

        let target = config.get(&entry.operation).ok_or_else(|| {
            PorterError::configuration(
                entry.display_name(),
                "operation",
                format!("operation type '{}' has no script configuration", entry.operation),
            )
        })?;
        let transform = entry.transform.as_deref().ok_or_else(|| {
            PorterError::configuration(
                entry.display_name(),
                "transform",
                "transform function can not be empty",
            )
        })?;
        let connection = connections.get(entry.role).ok_or_else(|| {
            PorterError::connection(format!(
                "no connection bound to role '{}' for '{}'",
                entry.role,
                entry.display_name()
            ))
        })?;

        let path = target.script_path(&entry.label);
        let file = File::create(&path).map_err(|e| PorterError::file_write(&path, e))?;
        let mut out = BufWriter::new(file);

        let written = self.write_script(entry, transform, connection, &path, &mut out);
        // Flush on the error path too, so fragments already produced reach disk.
        let flushed = out.flush().map_err(|e| PorterError::file_write(&path, e));
        drop(out);
        let rows = written?;
        flushed?;

        self.aggregates.append(&target.aggregate_file, &path)?;

        let elapsed = start.elapsed();
        if self.debug.reports_timing() {
            tracing::info!(
                script = %path.display(),
                rows,
                elapsed_s = elapsed.as_secs_f64(),
                "script done",
            );
        }

        Ok(GeneratedScript {
            label: entry.label.clone(),
            path,
            aggregate_file: target.aggregate_file.clone(),
            rows,
            elapsed,
        })
    }

    fn write_script<W: Write>(
        &self,
        entry: &ParameterEntry,
        transform: &dyn RowTransformer,
        connection: &dyn Connection,
        path: &Path,
        out: &mut W,
    ) -> PorterResult<usize> {
        if self.debug.console {
            tracing::info!(
                entry = %entry.display_name(),
                query = %entry.query.trim_end(),
                "running query",
            );
        }

        if self.debug.comment {
            writeln!(out, "-- {} script produced at {}.", entry.label, timestamp())
                .map_err(|e| PorterError::file_write(path, e))?;
        }

        let rows = connection
            .exec(&entry.query)
            .map_err(|e| query_failure(entry, e))?;

        let mut count = 0;
        for row in rows {
            let row = row.map_err(|e| query_failure(entry, e))?;
            count += 1;

            let fragment = transform
                .transform(&row)
                .map_err(|e| PorterError::Transform {
                    label: entry.label.clone(),
                    row: count,
                    message: format!("{:#}", e),
                })?;
            out.write_all(fragment.as_bytes())
                .map_err(|e| PorterError::file_write(path, e))?;
        }

        if self.debug.commit {
            out.write_all(COMMIT_MARKER.as_bytes())
                .map_err(|e| PorterError::file_write(path, e))?;
        }

        tracing::debug!(entry = %entry.display_name(), rows = count, "rows streamed");
        Ok(count)
    }
}

/// Attribute a connection-side failure to the entry that triggered it
fn query_failure(entry: &ParameterEntry, err: PorterError) -> PorterError {
    match err {
        PorterError::QueryExecution { message, .. } => PorterError::query(&entry.label, message),
        err @ PorterError::Connection(_) => err,
        other => PorterError::query(&entry.label, other.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryConnection;
    use porter_core::Row;
    use porter_plan::{ConnectionRole, OperationType, ScriptTarget};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn drop_index(row: &Row) -> anyhow::Result<String> {
        Ok(format!("DROP INDEX T.{};\n", row.text(0)?))
    }

    fn setup(dir: &TempDir) -> ScriptConfig {
        let folder = dir.path().join("drop");
        std::fs::create_dir_all(&folder).unwrap();
        ScriptConfig::new().with_target(ScriptTarget::new(
            "drop",
            folder,
            dir.path().join("drop_all.sql"),
        ))
    }

    fn connections() -> ConnectionSet {
        ConnectionSet::new().with(
            ConnectionRole::Destination,
            MemoryConnection::new("T").with_rows("Q", vec![vec!["IDX1"], vec!["IDX2"]]),
        )
    }

    fn entry() -> ParameterEntry {
        ParameterEntry::new(
            "index",
            ConnectionRole::Destination,
            OperationType::drop(),
            "Q",
            drop_index,
        )
    }

    #[test]
    fn test_rows_only_when_toggles_off() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);

        let script = ScriptWriter::new(DebugOptions::silent())
            .run(&entry(), &connections(), &config)
            .unwrap();

        assert_eq!(script.rows, 2);
        assert_eq!(script.path, dir.path().join("drop/index.sql"));
        assert_eq!(
            std::fs::read_to_string(&script.path).unwrap(),
            "DROP INDEX T.IDX1;\nDROP INDEX T.IDX2;\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("drop_all.sql")).unwrap(),
            format!("@{}\n", script.path.display())
        );
    }

    #[test]
    fn test_header_and_commit_marker() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        let debug = DebugOptions::silent().with_comment(true).with_commit(true);

        let script = ScriptWriter::new(debug)
            .run(&entry(), &connections(), &config)
            .unwrap();

        let content = std::fs::read_to_string(&script.path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("-- index script produced at "));
        assert_eq!(
            lines[1..].to_vec(),
            vec!["DROP INDEX T.IDX1;", "DROP INDEX T.IDX2;", "COMMIT;"]
        );
    }

    #[test]
    fn test_timing_on_console_leaves_script_unchanged() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        let debug = DebugOptions::silent().with_console(true).with_timing(true);
        assert!(debug.reports_timing());

        let script = ScriptWriter::new(debug)
            .run(&entry(), &connections(), &config)
            .unwrap();

        assert!(script.elapsed.as_secs_f64() >= 0.0);
        assert_eq!(
            std::fs::read_to_string(&script.path).unwrap(),
            "DROP INDEX T.IDX1;\nDROP INDEX T.IDX2;\n"
        );
    }

    #[test]
    fn test_overwrites_previous_script() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        std::fs::write(dir.path().join("drop/index.sql"), "stale content\n").unwrap();

        let script = ScriptWriter::new(DebugOptions::silent())
            .run(&entry(), &connections(), &config)
            .unwrap();

        let content = std::fs::read_to_string(&script.path).unwrap();
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_transform_failure_keeps_earlier_rows() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        let conns = ConnectionSet::new().with(
            ConnectionRole::Destination,
            MemoryConnection::new("T").with_rows("Q", vec![vec!["IDX1"], vec![], vec!["IDX3"]]),
        );

        let err = ScriptWriter::new(DebugOptions::silent().with_comment(true))
            .run(&entry(), &conns, &config)
            .unwrap_err();

        match err {
            PorterError::Transform { label, row, .. } => {
                assert_eq!(label, "index");
                assert_eq!(row, 2);
            }
            other => panic!("expected transform error, got {other:?}"),
        }

        let content = std::fs::read_to_string(dir.path().join("drop/index.sql")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "DROP INDEX T.IDX1;");
        assert!(!dir.path().join("drop_all.sql").exists());
    }

    #[test]
    fn test_unknown_query_is_query_error() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        let mut entry = entry();
        entry.query = "SELECT nothing".to_string();

        let err = ScriptWriter::new(DebugOptions::silent())
            .run(&entry, &connections(), &config)
            .unwrap_err();
        assert!(matches!(err, PorterError::QueryExecution { ref label, .. } if label == "index"));
    }

    #[test]
    fn test_streaming_failure_is_query_error() {
        let dir = TempDir::new().unwrap();
        let config = setup(&dir);
        let conns = ConnectionSet::new().with(
            ConnectionRole::Destination,
            MemoryConnection::new("T")
                .with_rows("Q", vec![vec!["IDX1"], vec!["IDX2"]])
                .failing_after("Q", 1, "ORA-01555: snapshot too old"),
        );

        let err = ScriptWriter::new(DebugOptions::silent())
            .run(&entry(), &conns, &config)
            .unwrap_err();
        assert_eq!(err.to_string(), "Query failed for 'index': ORA-01555: snapshot too old");

        let content = std::fs::read_to_string(dir.path().join("drop/index.sql")).unwrap();
        assert_eq!(content, "DROP INDEX T.IDX1;\n");
    }

    #[test]
    fn test_missing_folder_is_io_error() {
        let dir = TempDir::new().unwrap();
        let config = ScriptConfig::new().with_target(ScriptTarget::new(
            "drop",
            dir.path().join("absent"),
            dir.path().join("drop_all.sql"),
        ));

        let err = ScriptWriter::new(DebugOptions::silent())
            .run(&entry(), &connections(), &config)
            .unwrap_err();
        assert!(err.is_io());
    }
}
