//! Records: typed values that live under `[namespace, id]` in a document

use crate::error::{Error, Result};
use crate::search;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// A type that can be stored as one entry of a namespace
///
/// Conversion to and from the generic `Value` tree comes from serde by
/// default. Implementors only name their namespace and expose their ID.
///
/// # Example
///
/// ```rust
/// use recstore::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Airline {
///     #[serde(rename = "ID")]
///     id: String,
///     #[serde(rename = "Company Name")]
///     company_name: String,
/// }
///
/// impl Record for Airline {
///     const NAMESPACE: &'static str = "Airline";
///
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned {
    /// Top-level document key for this record kind (e.g. "Client")
    const NAMESPACE: &'static str;

    /// Key of this record inside its namespace
    fn id(&self) -> &str;

    /// Reject a record before it is written
    ///
    /// Returns a human-readable reason on failure. Accepts everything by default.
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }

    /// Convert into the generic value tree
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialize` if serde cannot represent the record.
    fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    /// Rebuild a record from the generic value tree
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRecord` if `value` does not have this record's shape.
    fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidRecord {
            namespace: Self::NAMESPACE.to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether `term` appears in any of this record's field values
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialize` if the record cannot be converted to a value.
    fn contains_term(&self, term: &str) -> Result<bool> {
        let value = self.to_value()?;
        Ok(search::contains_term(&value, term))
    }
}
