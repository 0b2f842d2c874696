//! Common test utilities for recstore integration tests
//!
//! Provides a scratch-directory fixture and the record types the suites share.

#![allow(dead_code)]

use recstore::{DocumentStore, Record};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Records
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Type", default)]
    pub client_type: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "Country", default)]
    pub country: String,
}

impl Record for Client {
    const NAMESPACE: &'static str = "Client";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if !self.id.chars().all(|c| c.is_ascii_digit()) {
            return Err("Client ID must be a number.".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClientUpdate {
    #[serde(rename = "Type")]
    pub client_type: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    #[serde(rename = "Flight ID")]
    pub id: String,
    #[serde(rename = "Client ID")]
    pub client_id: String,
    #[serde(rename = "Airline ID")]
    pub airline_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Arrival")]
    pub arrival: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Seats", default)]
    pub seats: u32,
}

impl Record for Flight {
    const NAMESPACE: &'static str = "Flight";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), String> {
        if self.date.split('-').count() != 3 {
            return Err("Invalid date format. Use YYYY-MM-DD.".into());
        }
        Ok(())
    }
}

pub fn client(id: &str, name: &str, city: &str) -> Client {
    Client {
        id: id.into(),
        client_type: "Regular".into(),
        name: name.into(),
        city: city.into(),
        country: "UK".into(),
    }
}

pub fn flight(id: &str, departure: &str, arrival: &str) -> Flight {
    Flight {
        id: id.into(),
        client_id: "1".into(),
        airline_id: "1".into(),
        date: "2024-05-01".into(),
        departure: departure.into(),
        arrival: arrival.into(),
        status: "Pending".into(),
        seats: 180,
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

/// Temporary directory plus a store backed by `records.json` inside it
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store: DocumentStore,
}

impl TestFixture {
    pub fn new() -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DocumentStore::open(temp_dir.path().join("records.json"));
        Self { temp_dir, store }
    }

    /// Fixture whose file already contains `content` before the store opens
    pub fn with_file_content(content: &str) -> Self {
        init_logging();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("records.json");
        std::fs::write(&path, content).expect("Failed to seed file");
        let store = DocumentStore::open(&path);
        Self { temp_dir, store }
    }

    pub fn file_path(&self) -> PathBuf {
        self.temp_dir.path().join("records.json")
    }

    /// Open a second, independent store over the same file
    pub fn reopen(&self) -> DocumentStore {
        DocumentStore::open(self.file_path())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Route `log` output through the test harness (RUST_LOG=debug to see it)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Read and parse the raw backing file
pub fn read_file(fixture: &TestFixture) -> Option<serde_json::Value> {
    let content = std::fs::read_to_string(fixture.file_path()).ok()?;
    serde_json::from_str(&content).ok()
}
