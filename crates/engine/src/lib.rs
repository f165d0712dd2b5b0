//! # Porter Engine
//!
//! Script generation engine for Schema Porter.
//!
//! The engine reads catalog metadata through a [`Connection`], turns every
//! row into a SQL fragment with a [`RowTransformer`], and writes one script
//! per task plus one aggregate "run file" per operation type.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────────┐
//! │ ScriptConfig │     │ ConnectionSet│     │ Vec<ParameterEntry> │
//! └──────┬───────┘     └──────┬───────┘     └──────────┬──────────┘
//!        └────────────────────┼────────────────────────┘
//!                             ▼
//!                   ┌───────────────────┐
//!                   │   Orchestrator    │  configure() validates
//!                   └─────────┬─────────┘
//!                             ▼ produce()
//!                   ┌───────────────────┐
//!                   │   ScriptWriter    │  one entry at a time
//!                   └─────────┬─────────┘
//!              ┌──────────────┴──────────────┐
//!              ▼                             ▼
//!       folder/<label>.sql        AggregateFileManager (@path lines)
//! ```
//!
//! ## Modules
//!
//! - [`orchestrator`]: validation and run sequencing
//! - [`writer`]: per-entry script generation
//! - [`aggregate`]: aggregate run files
//! - [`catalog`]: built-in Oracle tasks and transformers
//! - [`rewrite`]: principal and tablespace rewriting of DDL text
//! - [`connection`]: in-memory and snapshot-file connections
//!

pub mod aggregate;
pub mod catalog;
pub mod connection;
pub mod orchestrator;
pub mod rewrite;
pub mod writer;

pub use aggregate::AggregateFileManager;
pub use catalog::{Principals, TransformKind, default_entries, default_tasks, resolve_tasks};
pub use connection::{CapturedQuery, MemoryConnection, SnapshotConnection, SnapshotFile};
pub use orchestrator::{Orchestrator, RunReport};
pub use rewrite::IdentifierRewrite;
pub use writer::{COMMIT_MARKER, GeneratedScript, ScriptWriter};

pub use porter_core::{Connection, PorterError, PorterResult, Row, RowTransformer, Value};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
