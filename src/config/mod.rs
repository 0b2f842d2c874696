//! Store configuration
//!
//! The document store has a single required option, the backing file
//! location. `StoreConfig` resolves it and carries the write format.

mod types;

pub use types::{DEFAULT_FILE_NAME, StoreConfig, StoreConfigBuilder};
