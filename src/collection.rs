//! Typed record collections over a document store
//!
//! A collection is the repository for one [`Record`] type. It keys every
//! record by `[R::NAMESPACE, id]` and translates path misses into
//! `Error::RecordNotFound` so callers never see raw document paths.

use crate::document::DocumentStore;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::search::TermMatcher;
use crate::storage::{JsonStorage, StorageBackend};

use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// Repository view over the records of one namespace
///
/// Obtained from [`DocumentStore::collection`]. Mutations go straight
/// through to the store and are persisted before returning.
pub struct Collection<'s, R: Record, S: StorageBackend = JsonStorage> {
    store: &'s mut DocumentStore<S>,
    matcher: TermMatcher,
    _marker: PhantomData<fn() -> R>,
}

impl<'s, R: Record, S: StorageBackend> Collection<'s, R, S> {
    pub(crate) fn new(store: &'s mut DocumentStore<S>) -> Self {
        Self {
            store,
            matcher: TermMatcher::new(),
            _marker: PhantomData,
        }
    }

    /// Use a custom matcher for [`search`](Self::search)
    #[must_use]
    pub fn with_matcher(mut self, matcher: TermMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// The namespace this collection reads and writes
    pub fn namespace(&self) -> &'static str {
        R::NAMESPACE
    }

    /// IDs of all stored records, sorted
    ///
    /// Ordering follows [`DocumentStore::keys`]; it becomes insertion order if
    /// serde_json's `preserve_order` feature is enabled.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAMapping` if the namespace holds something other than a mapping.
    pub fn ids(&self) -> Result<Vec<String>> {
        match self.store.keys(&[R::NAMESPACE]) {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    /// All stored records; an absent namespace is an empty collection
    ///
    /// # Errors
    ///
    /// Fails if the namespace is not a mapping or any entry does not decode as `R`.
    pub fn list(&self) -> Result<Vec<R>> {
        let entries = match self.store.get(&[R::NAMESPACE]) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(Error::NotAMapping {
                    path: format!("[{}]", R::NAMESPACE),
                });
            }
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        entries.values().cloned().map(R::from_value).collect()
    }

    /// Fetch one record by ID
    ///
    /// # Errors
    ///
    /// * `Error::RecordNotFound` - no record with this ID
    /// * `Error::InvalidRecord` - the stored value does not decode as `R`
    pub fn get(&self, id: &str) -> Result<R> {
        let value = self.raw(id)?;
        R::from_value(value.clone())
    }

    /// Whether a record with this ID is stored
    pub fn exists(&self, id: &str) -> bool {
        self.store.exists(&[R::NAMESPACE, id])
    }

    /// Validate and store a record, replacing any record with the same ID
    ///
    /// # Errors
    ///
    /// * `Error::InvalidRecord` - the record's `validate` hook rejected it or its ID is empty
    /// * any error from [`DocumentStore::set`]
    pub fn create(&mut self, record: &R) -> Result<()> {
        self.check(record)?;
        let value = record.to_value()?;
        self.store.set(&[R::NAMESPACE, record.id()], value)?;
        debug!("Stored {} {}", R::NAMESPACE, record.id());
        Ok(())
    }

    /// Overlay the non-null fields of `patch` onto the stored record
    ///
    /// `patch` must serialize to a mapping. Null fields (typically `None`
    /// options) keep the stored value; every other field replaces it. The
    /// merged result must still decode as `R`, pass validation, and keep its ID.
    /// The merged mapping itself is written back, so stored fields that `R`
    /// does not declare survive the update.
    ///
    /// # Errors
    ///
    /// * `Error::RecordNotFound` - no record with this ID
    /// * `Error::InvalidRecord` - the patch or the merged record is invalid
    /// * any error from [`DocumentStore::set`]
    pub fn update<P: Serialize>(&mut self, id: &str, patch: &P) -> Result<R> {
        let patch = match serde_json::to_value(patch)? {
            Value::Object(map) => map,
            _ => return Err(Self::invalid("update patch must be a mapping of fields")),
        };

        let mut merged = match self.raw(id)? {
            Value::Object(map) => map.clone(),
            _ => return Err(Self::invalid(format!("stored entry '{id}' is not a mapping"))),
        };
        for (field, value) in patch {
            if !value.is_null() {
                merged.insert(field, value);
            }
        }

        let merged = Value::Object(merged);
        let record = R::from_value(merged.clone())?;
        if record.id() != id {
            return Err(Self::invalid(format!(
                "update would change id '{id}' to '{}'",
                record.id()
            )));
        }
        self.check(&record)?;

        self.store.set(&[R::NAMESPACE, id], merged)?;
        debug!("Updated {} {id}", R::NAMESPACE);
        Ok(record)
    }

    /// Remove a record
    ///
    /// # Errors
    ///
    /// * `Error::RecordNotFound` - no record with this ID
    /// * any persistence error from [`DocumentStore::delete`]
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store
            .delete(&[R::NAMESPACE, id])
            .map_err(|e| Self::not_found_as_record(e, id))?;
        debug!("Deleted {} {id}", R::NAMESPACE);
        Ok(())
    }

    /// Records in which `term` appears in some field value
    ///
    /// # Errors
    ///
    /// Fails like [`list`](Self::list).
    pub fn search(&self, term: &str) -> Result<Vec<R>> {
        let mut found = Vec::new();
        for record in self.list()? {
            if self.matcher.matches(&record.to_value()?, term) {
                found.push(record);
            }
        }
        Ok(found)
    }

    fn raw(&self, id: &str) -> Result<&Value> {
        self.store
            .get(&[R::NAMESPACE, id])
            .map_err(|e| Self::not_found_as_record(e, id))
    }

    fn check(&self, record: &R) -> Result<()> {
        if record.id().is_empty() {
            return Err(Self::invalid("id is required"));
        }
        record.validate().map_err(|reason| Self::invalid(reason))
    }

    fn invalid(reason: impl Into<String>) -> Error {
        Error::InvalidRecord {
            namespace: R::NAMESPACE.to_string(),
            reason: reason.into(),
        }
    }

    fn not_found_as_record(err: Error, id: &str) -> Error {
        if err.is_not_found() {
            Error::RecordNotFound {
                namespace: R::NAMESPACE.to_string(),
                id: id.to_string(),
            }
        } else {
            err
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
