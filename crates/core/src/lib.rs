//! # Porter Core
//!
//! Core types, traits, and error handling for Schema Porter.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Catalog rows and column values (`Row`, `Value`)
//! - **Traits**: The `Connection` and `RowTransformer` capabilities, `Validatable`
//! - **Errors**: Unified error handling with `PorterError` and `PorterResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{PorterError, PorterResult, ResultExt};
pub use traits::{Connection, RowStream, RowTransformer, Validatable};
pub use types::{Row, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
