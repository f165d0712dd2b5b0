//! # Porter Plan
//!
//! The run plan for Schema Porter: everything the engine needs to know
//! before it touches a database or the filesystem.
//!
//! ## Core Concepts
//!
//! - **OperationType**: Classification of a task (`drop`, `make`, ...)
//! - **ScriptConfig**: Output folder and aggregate file per operation type
//! - **ParameterEntry**: One generation task (label, role, query, transformer)
//! - **ConnectionSet**: Connections bound to the `source` / `destination` roles
//! - **DebugOptions**: Console, timing, header and commit toggles
//! - **RunSettings**: File-backed form of all of the above
//!

// Module declarations
pub mod connections;
pub mod debug;
pub mod entry;
pub mod operation;
pub mod script_config;
pub mod settings;
pub mod validation;

// Re-export commonly used types at crate root
pub use connections::ConnectionSet;
pub use debug::DebugOptions;
pub use entry::{ParameterEntry, SharedTransformer};
pub use operation::{ConnectionRole, OperationType};
pub use script_config::{ScriptConfig, ScriptTarget};
pub use settings::{
    RunSettings, TaskSpec, load_settings, save_settings, settings_from_json, settings_from_toml,
    settings_to_json, settings_to_toml,
};
pub use validation::{entry_id, validate_entries, validate_entry};

// Re-export core types that are commonly used with the plan
pub use porter_core::{Connection, PorterError, PorterResult, Row, RowTransformer, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
