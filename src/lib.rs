//! # recstore - path-addressable record storage
//!
//! A small embedded store for record-keeping applications that keep all of
//! their data in one JSON file.
//!
//! ## Features
//!
//! - **Document store**: get, set and delete any value by a key path such as
//!   `["Client", "1"]`; every mutation is written to disk before returning
//! - **Term search**: decide whether a search term appears anywhere inside an
//!   arbitrary JSON value
//! - **Record collections**: typed CRUD and search over one namespace for any
//!   serde type implementing [`Record`]
//! - **Change events**: listeners called after each persisted mutation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recstore::DocumentStore;
//! use serde_json::json;
//!
//! # fn example() -> recstore::Result<()> {
//! let mut store = DocumentStore::open("records.json");
//!
//! store.set(&["Client", "1"], json!({"Name": "John", "City": "London"}))?;
//! let client = store.get(&["Client", "1"])?;
//! assert!(recstore::contains_term(client, "Lond"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Load Behavior
//!
//! Opening a store never fails. A missing file, an unreadable file, or a file
//! that does not parse as a JSON mapping all produce an empty document, and
//! the next mutation overwrites the file. The failure is logged through the
//! `log` facade at `warn` level.
//!
//! ## Search Rules
//!
//! Strings match on substring, numbers and booleans only on their exact text
//! (`"42"`, `"True"`), null never matches, and mappings match when any value
//! does. Lists are decided by their **first element only** unless a
//! [`TermMatcher`] is configured with [`ListScan::AllElements`].
//!
//! ## Record Collections
//!
//! ```rust,no_run
//! use recstore::{DocumentStore, Record};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Flight {
//!     #[serde(rename = "Flight ID")]
//!     id: String,
//!     #[serde(rename = "Departure")]
//!     departure: String,
//!     #[serde(rename = "Status")]
//!     status: String,
//! }
//!
//! impl Record for Flight {
//!     const NAMESPACE: &'static str = "Flight";
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! # fn example() -> recstore::Result<()> {
//! let mut store = DocumentStore::open("records.json");
//! let mut flights = store.collection::<Flight>();
//!
//! flights.create(&Flight {
//!     id: "EI154".into(),
//!     departure: "Dublin".into(),
//!     status: "Pending".into(),
//! })?;
//! flights.update("EI154", &serde_json::json!({"Status": "Boarded"}))?;
//!
//! let from_dublin = flights.search("Dublin")?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod collection;
mod document;
mod error;
mod events;
mod record;
pub mod search;
pub mod storage;
mod sync;

// Grouped modules
pub mod config;

// Re-exports from core
pub use collection::Collection;
pub use config::{StoreConfig, StoreConfigBuilder};
pub use document::DocumentStore;
pub use error::{Error, Result};
pub use events::{ChangeCallback, EventManager};
pub use record::Record;
pub use search::{ListScan, TermMatcher, contains_term};
pub use storage::{JsonStorage, StorageBackend};
