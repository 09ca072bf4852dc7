//! Cached fact lookups
//!
//! Facts are collected out-of-band and written to a JSON file; this module
//! only reads them. An absent file or fact is "unset", never an error.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::FactError;

/// Fact key holding the CA hostname of the server the host enrolled with
pub const CA_HOSTNAME_FACT: &str = "rhsm_ca_name";

/// Fact key holding the identity string issued at registration
pub const IDENTITY_FACT: &str = "rhsm_identity";

/// Read-only access to cached facts
pub trait FactCache: Send + Sync {
    /// Cached CA hostname; `None` when unset
    fn ca_hostname(&self) -> Option<String>;

    /// Cached identity string; `None` when unset
    fn identity(&self) -> Option<String>;
}

/// Fact cache backed by a JSON object file
///
/// The file is read once at load time; facts do not change within a pass.
#[derive(Debug, Clone, Default)]
pub struct JsonFactCache {
    facts: HashMap<String, String>,
}

impl JsonFactCache {
    /// Cache with no facts set
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load facts from a JSON object file
    ///
    /// A missing file yields an empty cache. Non-string values are skipped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FactError> {
        if !path.exists() {
            debug!(path = %path.display(), "facts file not present");
            return Ok(Self::empty());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| FactError::Unreadable(e.to_string()))?;
        let values: HashMap<String, Value> =
            serde_json::from_str(&content).map_err(|e| FactError::ParseError(e.to_string()))?;

        let facts = values
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect();

        Ok(Self { facts })
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.facts
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl FactCache for JsonFactCache {
    fn ca_hostname(&self) -> Option<String> {
        self.lookup(CA_HOSTNAME_FACT)
    }

    fn identity(&self) -> Option<String> {
        self.lookup(IDENTITY_FACT)
    }
}
