//! Store configuration types

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};

/// Default file name for the backing document
pub const DEFAULT_FILE_NAME: &str = "records.json";

/// Configuration for opening a [`DocumentStore`](crate::DocumentStore)
///
/// The only thing the store really needs is where its backing file lives;
/// everything else here controls how that file is written.
#[derive(Debug, Clone)]
pub struct StoreConfig<S: StorageBackend = JsonStorage> {
    /// Directory holding the backing file
    pub data_dir: PathBuf,

    /// File name of the backing document (e.g., "records.json")
    pub file_name: String,

    /// Storage backend implementation
    pub storage: S,
}

impl Default for StoreConfig<JsonStorage> {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.into(),
            storage: JsonStorage::new(),
        }
    }
}

impl<S: StorageBackend> StoreConfig<S> {
    /// Get the full path to the backing file
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    /// Check that the configuration can address a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file name is empty or contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(Error::Config("file name must not be empty".into()));
        }
        if self.file_name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "file name '{}' must not contain path separators",
                self.file_name
            )));
        }
        Ok(())
    }
}

impl StoreConfig<JsonStorage> {
    /// Create a new builder for StoreConfig
    ///
    /// # Example
    /// ```rust
    /// use recstore::StoreConfig;
    ///
    /// let config = StoreConfig::builder()
    ///     .data_dir("~/.local/share/flights")
    ///     .file_name("records.json")
    ///     .build();
    /// ```
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Configuration pointing straight at an existing file path
    ///
    /// A bare file name resolves against the current directory.
    pub fn for_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let data_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            data_dir,
            file_name,
            storage: JsonStorage::new(),
        }
    }

    /// Per-user data directory for an application (e.g. `~/.local/share/<app>`)
    ///
    /// Falls back to the current directory when the platform has no data dir.
    pub fn default_dir(app_name: &str) -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join(app_name))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Builder for creating StoreConfig with a fluent API
#[derive(Debug, Clone)]
pub struct StoreConfigBuilder {
    data_dir: Option<PathBuf>,
    app_name: Option<String>,
    file_name: String,
    indent: Option<usize>,
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConfigBuilder {
    /// Create a new builder with the default file name and 4-space pretty JSON
    pub fn new() -> Self {
        Self {
            data_dir: None,
            app_name: None,
            file_name: DEFAULT_FILE_NAME.into(),
            indent: Some(4),
        }
    }

    /// Set the data directory
    ///
    /// Supports `~` expansion for home directory.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.data_dir = Some(expanded);
        self
    }

    /// Use the per-user data directory for `app_name` unless `data_dir` is set
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Set the backing file name (default: "records.json")
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Use compact JSON (no pretty printing)
    pub fn compact_json(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Pretty print with `spaces` per indentation level
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }

    /// Build the StoreConfig
    ///
    /// Without an explicit `data_dir`, uses the platform data directory for
    /// the app name, or the current directory when neither is known.
    pub fn build(self) -> StoreConfig<JsonStorage> {
        let storage = match self.indent {
            Some(spaces) => JsonStorage::with_indent(spaces),
            None => JsonStorage::compact(),
        };
        self.build_with_storage(storage)
    }

    /// Build the StoreConfig around a custom storage backend
    pub fn build_with_storage<S: StorageBackend>(self, storage: S) -> StoreConfig<S> {
        let data_dir = match (self.data_dir, self.app_name) {
            (Some(dir), _) => dir,
            (None, Some(app)) => StoreConfig::default_dir(&app),
            (None, None) => PathBuf::from("."),
        };

        StoreConfig {
            data_dir,
            file_name: self.file_name,
            storage,
        }
    }
}
