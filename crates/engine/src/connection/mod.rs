//! # Connections
//!
//! Connection implementations that ship with the engine. Live database
//! drivers are provided by the embedding application; these two cover
//! tests and offline runs.
//!
//! - [`MemoryConnection`]: result sets registered in code
//! - [`SnapshotConnection`]: result sets replayed from a JSON capture

pub mod memory;
pub mod snapshot;

pub use memory::MemoryConnection;
pub use snapshot::{CapturedQuery, SnapshotConnection, SnapshotFile};
