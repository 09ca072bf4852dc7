//! Observed registration status

use serde::{Deserialize, Serialize};

/// Registration state observed on the host, recomputed on every read
///
/// The three variants have different downstream behavior: `Unregistered`
/// means the host holds no record at all and is excluded from enumeration,
/// while `Broken` is a discovered (and repairable) instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum RegistrationStatus {
    /// No server hostname or identity discoverable
    Unregistered,
    /// A server hostname is known but no identity backs it
    Broken {
        /// Server the host last pointed at
        server: String,
    },
    /// The host holds an identity issued by the given server
    Registered {
        /// Server the identity was issued by
        server: String,
        /// Opaque identity string from the fact cache
        identity: String,
    },
}

impl RegistrationStatus {
    /// Server hostname, if one was discoverable
    #[must_use]
    pub fn server(&self) -> Option<&str> {
        match self {
            RegistrationStatus::Unregistered => None,
            RegistrationStatus::Broken { server }
            | RegistrationStatus::Registered { server, .. } => Some(server),
        }
    }

    /// Whether the host holds a valid identity
    #[must_use]
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationStatus::Registered { .. })
    }

    /// Whether enumeration reports this status as an instance
    ///
    /// `Broken` counts as discovered; `Unregistered` does not.
    #[must_use]
    pub fn is_discovered(&self) -> bool {
        !matches!(self, RegistrationStatus::Unregistered)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Unregistered => write!(f, "unregistered"),
            RegistrationStatus::Broken { server } => write!(f, "broken registration to {server}"),
            RegistrationStatus::Registered { server, .. } => write!(f, "registered to {server}"),
        }
    }
}
