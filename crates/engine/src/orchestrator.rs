//! # Run Orchestrator
//!
//! The `Orchestrator` is the top-level entry point for script generation. It
//! takes a [`ScriptConfig`], a [`ConnectionSet`], [`DebugOptions`] and the
//! ordered task list, validates all of it up front, and then drives the
//! [`ScriptWriter`] over the tasks.
//!
//! ## Pipeline
//!
//! ```text
//! configure(config, connections, debug, entries)
//!         │   validate every target and entry (no side effects)
//!         ▼
//!     produce()
//!         ├──► for each declared target: mkdir folder, reset aggregate file
//!         ├──► for each entry, in order: ScriptWriter::run
//!         │        └── first failure aborts the run
//!         ▼
//!     RunReport { scripts, aggregate_files }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use porter_engine::{Orchestrator, MemoryConnection};
//! use porter_plan::{ConnectionSet, DebugOptions, ScriptConfig};
//!
//! let connections = ConnectionSet::pair(source, destination);
//! let entries = porter_engine::catalog::default_entries(&principals);
//!
//! let report = Orchestrator::configure(
//!     ScriptConfig::default(),
//!     connections,
//!     DebugOptions::default(),
//!     entries,
//! )?
//! .produce()?;
//!
//! println!("{}", report);
//! ```

use porter_core::{PorterError, PorterResult, Validatable};
use porter_plan::{ConnectionSet, DebugOptions, ParameterEntry, ScriptConfig, validate_entries};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::aggregate::AggregateFileManager;
use crate::writer::{GeneratedScript, ScriptWriter};

// ============================================================================
// Orchestrator
// ============================================================================

/// Validated run plan, ready to produce scripts
#[derive(Debug)]
pub struct Orchestrator {
    config: ScriptConfig,
    connections: ConnectionSet,
    debug: DebugOptions,
    entries: Vec<ParameterEntry>,
}

impl Orchestrator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Build an engine from its parts, validating every target and entry.
    ///
    /// # Errors
    ///
    /// Returns a `PorterError::Configuration` naming the first invalid target
    /// or entry and its field. Nothing is written to disk in that case.
    pub fn configure(
        config: ScriptConfig,
        connections: ConnectionSet,
        debug: DebugOptions,
        entries: Vec<ParameterEntry>,
    ) -> PorterResult<Self> {
        for target in config.targets() {
            target.validate()?;
        }
        validate_entries(&entries, &config, &connections)?;

        Ok(Self {
            config,
            connections,
            debug,
            entries,
        })
    }

    /// Script configuration
    pub fn script_config(&self) -> &ScriptConfig {
        &self.config
    }

    /// Bound connections
    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    /// Debug toggles
    pub fn debug(&self) -> &DebugOptions {
        &self.debug
    }

    /// Entries in execution order
    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    // ====================================================================
    // Production
    // ====================================================================

    /// Run every entry in declaration order.
    ///
    /// # Steps
    ///
    /// 1. **Prepare** every declared target, in declaration order, whether
    ///    or not an entry uses it: create its folder and truncate its
    ///    aggregate file (with a header comment when `comment` is on).
    /// 2. **Generate** one script per entry; each completed script is
    ///    appended to its aggregate file.
    ///
    /// # Errors
    ///
    /// The first runtime error (connection, query, transform or IO) stops
    /// the run. Scripts and aggregate lines already written stay on disk.
    pub fn produce(&self) -> PorterResult<RunReport> {
        let aggregate_files = self.prepare_targets()?;
        let writer = ScriptWriter::new(self.debug);

        let mut scripts = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match writer.run(entry, &self.connections, &self.config) {
                Ok(script) => scripts.push(script),
                Err(e) => {
                    tracing::error!(
                        entry = %entry.display_name(),
                        completed = scripts.len(),
                        error = %e,
                        "run aborted",
                    );
                    return Err(e);
                }
            }
        }

        let report = RunReport {
            scripts,
            aggregate_files,
        };
        tracing::info!(
            scripts = report.scripts.len(),
            rows = report.total_rows(),
            "script generation complete",
        );
        Ok(report)
    }

    fn prepare_targets(&self) -> PorterResult<Vec<PathBuf>> {
        let aggregates = AggregateFileManager::new(self.debug.console);
        let mut prepared = Vec::new();

        for target in self.config.targets() {
            create_dir(&target.folder)?;
            if let Some(parent) = target.aggregate_file.parent() {
                if !parent.as_os_str().is_empty() {
                    create_dir(parent)?;
                }
            }

            aggregates.reset(&target.aggregate_file, self.debug.comment)?;
            prepared.push(target.aggregate_file.clone());
        }

        Ok(prepared)
    }
}

fn create_dir(path: &Path) -> PorterResult<()> {
    std::fs::create_dir_all(path).map_err(|e| PorterError::DirectoryCreate {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// RunReport
// ============================================================================

/// Outcome of a completed run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One generated script per entry, in execution order
    pub scripts: Vec<GeneratedScript>,

    /// Aggregate files prepared for this run, in target order
    pub aggregate_files: Vec<PathBuf>,
}

impl RunReport {
    /// Total number of catalog rows transformed
    pub fn total_rows(&self) -> usize {
        self.scripts.iter().map(|s| s.rows).sum()
    }

    /// Total wall-clock time spent in entries
    pub fn total_elapsed(&self) -> Duration {
        self.scripts.iter().map(|s| s.elapsed).sum()
    }

    /// Scripts referenced from a given aggregate file
    pub fn scripts_in(&self, aggregate_file: &Path) -> Vec<&GeneratedScript> {
        self.scripts
            .iter()
            .filter(|s| s.aggregate_file == aggregate_file)
            .collect()
    }

    /// Format the report as a human-readable summary
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(256);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Script Generation Complete               ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Scripts:     {:<35}║\n", self.scripts.len()));
        out.push_str(&format!("║  Rows:        {:<35}║\n", self.total_rows()));
        for aggregate in &self.aggregate_files {
            let name = aggregate.display().to_string();
            out.push_str(&format!(
                "║  Run file:    {:<35}║\n",
                format!("{} ({})", name, self.scripts_in(aggregate).len())
            ));
        }
        out.push_str(&format!(
            "║  Elapsed:     {:<35}║\n",
            format!("{:.3} s", self.total_elapsed().as_secs_f64())
        ));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
