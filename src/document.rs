//! Path-addressable document store mirrored to a single file
//!
//! The store owns one JSON mapping in memory. Every successful `set` or
//! `delete` rewrites the whole backing file before returning, so the file
//! and the in-memory document never disagree after a mutation that reported
//! success.

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::error::{Error, Result, display_path};
use crate::events::EventManager;
use crate::record::Record;
use crate::storage::{JsonStorage, StorageBackend};

use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// In-memory JSON document addressed by key paths and persisted on every change
///
/// A path is a non-empty slice of string segments. Each segment indexes a
/// mapping at its depth: `["Client", "1"]` is the record `1` inside the
/// `Client` namespace.
///
/// # Example
///
/// ```rust,no_run
/// use recstore::DocumentStore;
/// use serde_json::json;
///
/// # fn example() -> recstore::Result<()> {
/// let mut store = DocumentStore::open("records.json");
/// store.set(&["Client", "1"], json!({"Name": "John"}))?;
/// assert_eq!(store.get(&["Client", "1"])?["Name"], "John");
///
/// store.delete(&["Client", "1"])?;
/// assert!(store.get(&["Client", "1"]).unwrap_err().is_not_found());
/// # Ok(())
/// # }
/// ```
pub struct DocumentStore<S: StorageBackend = JsonStorage> {
    file_path: PathBuf,
    storage: S,
    data: Map<String, Value>,
    events: EventManager,
}

impl DocumentStore<JsonStorage> {
    /// Open the store backed by `path` with pretty-printed JSON
    ///
    /// A missing or unreadable file yields an empty document; see [`load`](Self::load).
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_storage(path, JsonStorage::new())
    }
}

impl<S: StorageBackend> DocumentStore<S> {
    /// Open the store described by `config`
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration does not name a usable file.
    pub fn with_config(config: StoreConfig<S>) -> Result<Self> {
        config.validate()?;
        let path = config.file_path();
        Ok(Self::with_storage(path, config.storage))
    }

    /// Open the store backed by `path` using a specific storage backend
    pub fn with_storage(path: impl AsRef<Path>, storage: S) -> Self {
        let mut store = Self {
            file_path: path.as_ref().to_path_buf(),
            storage,
            data: Map::new(),
            events: EventManager::new(),
        };
        store.load();
        info!(
            "Opened document store {} ({} namespaces)",
            store.file_path.display(),
            store.data.len()
        );
        store
    }

    /// Replace the in-memory document with the backing file's content
    ///
    /// A missing file, an unreadable or unparsable file, or a file whose root
    /// is not a mapping all reset the document to an empty mapping. None of
    /// these are reported as errors; corruption therefore reads as "no data".
    pub fn load(&mut self) {
        self.data = read_document(&self.storage, &self.file_path);
    }

    /// Get the value at `path`
    ///
    /// # Errors
    ///
    /// * `Error::EmptyPath` - `path` has no segments
    /// * `Error::PathNotFound` - a segment is missing or crosses a non-mapping value
    pub fn get<P: AsRef<str>>(&self, path: &[P]) -> Result<&Value> {
        let (last, parents) = path.split_last().ok_or(Error::EmptyPath)?;
        walk(&self.data, parents)
            .and_then(|node| node.get(last.as_ref()))
            .ok_or_else(|| Error::PathNotFound(display_path(path)))
    }

    /// Check whether `path` resolves to a value
    pub fn exists<P: AsRef<str>>(&self, path: &[P]) -> bool {
        self.get(path).is_ok()
    }

    /// List the keys of the mapping at `path`, in sorted order
    ///
    /// Sorted because `serde_json::Map` is a `BTreeMap` unless the
    /// `preserve_order` feature is enabled somewhere in the build, in which
    /// case keys come back (and are written) in insertion order.
    ///
    /// # Errors
    ///
    /// Fails like [`get`](Self::get), or with `Error::NotAMapping` when the
    /// value at `path` is a leaf or list.
    pub fn keys<P: AsRef<str>>(&self, path: &[P]) -> Result<Vec<String>> {
        match self.get(path)? {
            Value::Object(map) => Ok(map.keys().cloned().collect()),
            _ => Err(Error::NotAMapping {
                path: display_path(path),
            }),
        }
    }

    /// Top-level keys of the document
    pub fn namespaces(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Store `value` at `path` and persist the document
    ///
    /// Missing intermediate segments are created as empty mappings. If an
    /// existing intermediate value is not a mapping the call fails and the
    /// document is left untouched.
    ///
    /// # Errors
    ///
    /// * `Error::EmptyPath` - `path` has no segments
    /// * `Error::NotAMapping` - an intermediate segment holds a leaf or list
    /// * `Error::FileWrite` / `Error::DirectoryCreate` / `Error::Serialize` -
    ///   persisting failed; the in-memory document already holds the new value
    pub fn set<P: AsRef<str>>(&mut self, path: &[P], value: Value) -> Result<()> {
        let (last, parents) = path.split_last().ok_or(Error::EmptyPath)?;
        check_walkable(&self.data, parents)?;

        let node = walk_or_create(&mut self.data, parents)?;
        let old = node.insert(last.as_ref().to_string(), value);

        self.save()?;
        debug!("Set {}", display_path(path));

        let new = self.get(path).ok();
        self.events.notify(&owned_path(path), old.as_ref(), new);
        Ok(())
    }

    /// Remove the value at `path` and persist the document
    ///
    /// # Errors
    ///
    /// * `Error::EmptyPath` - `path` has no segments
    /// * `Error::PathNotFound` - nothing is stored at `path`
    /// * `Error::FileWrite` / `Error::DirectoryCreate` / `Error::Serialize` -
    ///   persisting failed; the value is already gone from memory
    pub fn delete<P: AsRef<str>>(&mut self, path: &[P]) -> Result<()> {
        let (last, parents) = path.split_last().ok_or(Error::EmptyPath)?;

        let removed = walk_mut(&mut self.data, parents)
            .and_then(|node| node.remove(last.as_ref()))
            .ok_or_else(|| Error::PathNotFound(display_path(path)))?;

        self.save()?;
        debug!("Deleted {}", display_path(path));

        self.events.notify(&owned_path(path), Some(&removed), None);
        Ok(())
    }

    /// Typed view over the records of one namespace
    pub fn collection<R: Record>(&mut self) -> Collection<'_, R, S> {
        Collection::new(self)
    }

    /// Borrow the whole document
    pub fn document(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Whether the document holds no namespaces
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Path of the backing file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Change listeners for this store
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Register a listener called after every persisted `set` or `delete`
    ///
    /// The callback receives (`path`, `old_value`, `new_value`).
    pub fn on_change<F>(&self, callback: F)
    where
        F: Fn(&[String], Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        self.events.on_change(callback);
    }

    /// Register a listener for changes under a single namespace
    pub fn watch<F>(&self, namespace: &str, callback: F)
    where
        F: Fn(&[String], Option<&Value>, Option<&Value>) + Send + Sync + 'static,
    {
        self.events.watch(namespace, callback);
    }

    fn save(&self) -> Result<()> {
        self.storage.write(&self.file_path, &self.data)
    }
}

impl<S: StorageBackend> std::fmt::Debug for DocumentStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("file_path", &self.file_path)
            .field("namespaces", &self.data.len())
            .finish()
    }
}

// =============================================================================
// Traversal helpers
// =============================================================================

fn read_document<S: StorageBackend>(storage: &S, path: &Path) -> Map<String, Value> {
    match std::fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No document at {}, starting empty", path.display());
            return Map::new();
        }
        Err(e) => {
            warn!("Cannot stat {}: {e}; starting empty", path.display());
            return Map::new();
        }
    }

    match storage.read::<Value>(path) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(
                "Document root in {} is not a mapping (found {}); starting empty",
                path.display(),
                kind_name(&other)
            );
            Map::new()
        }
        Err(e) => {
            warn!("Error loading document {}: {e}; starting empty", path.display());
            Map::new()
        }
    }
}

fn walk<'a, P: AsRef<str>>(
    root: &'a Map<String, Value>,
    segments: &[P],
) -> Option<&'a Map<String, Value>> {
    let mut node = root;
    for segment in segments {
        node = node.get(segment.as_ref())?.as_object()?;
    }
    Some(node)
}

fn walk_mut<'a, P: AsRef<str>>(
    root: &'a mut Map<String, Value>,
    segments: &[P],
) -> Option<&'a mut Map<String, Value>> {
    let mut node = root;
    for segment in segments {
        node = node.get_mut(segment.as_ref())?.as_object_mut()?;
    }
    Some(node)
}

/// Fail if an existing value along `segments` would block `walk_or_create`
fn check_walkable<P: AsRef<str>>(root: &Map<String, Value>, segments: &[P]) -> Result<()> {
    let mut node = root;
    for (depth, segment) in segments.iter().enumerate() {
        match node.get(segment.as_ref()) {
            None => return Ok(()),
            Some(Value::Object(map)) => node = map,
            Some(_) => {
                return Err(Error::NotAMapping {
                    path: display_path(&segments[..=depth]),
                });
            }
        }
    }
    Ok(())
}

fn walk_or_create<'a, P: AsRef<str>>(
    root: &'a mut Map<String, Value>,
    segments: &[P],
) -> Result<&'a mut Map<String, Value>> {
    let mut node = root;
    for (depth, segment) in segments.iter().enumerate() {
        let entry = node
            .entry(segment.as_ref())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(Error::NotAMapping {
                    path: display_path(&segments[..=depth]),
                });
            }
        };
    }
    Ok(node)
}

fn owned_path<P: AsRef<str>>(path: &[P]) -> Vec<String> {
    path.iter().map(|s| s.as_ref().to_string()).collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

// =============================================================================
// Tests
// =============================================================================
