//! Desired registration configuration

use serde::{Deserialize, Serialize};

/// Whether the host should hold a registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensure {
    /// Host should be registered
    #[default]
    Present,
    /// Host should not be registered
    Absent,
}

/// Target registration state supplied by the operator
///
/// Exactly one of username+password or activationkey must be set, and
/// `org` is always required; both are checked when register arguments are
/// built, before any command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Entitlement server hostname; identity key for matching
    pub name: String,
    /// Username for credential-based registration
    #[serde(default)]
    pub username: Option<String>,
    /// Password for credential-based registration
    #[serde(default)]
    pub password: Option<String>,
    /// Activation key for unattended registration
    #[serde(default)]
    pub activationkey: Option<String>,
    /// Organization label
    #[serde(default)]
    pub org: String,
    /// Content environment; only valid with username/password
    #[serde(default)]
    pub environment: Option<String>,
    /// Attach subscriptions automatically after registering
    #[serde(default)]
    pub autosubscribe: bool,
    /// Service level to attach when autosubscribing
    #[serde(default)]
    pub servicelevel: Option<String>,
    /// Re-register even when already registered to the same server
    #[serde(default)]
    pub force: bool,
    /// Whether the registration should exist at all
    #[serde(default)]
    pub ensure: Ensure,
}

/// Treat empty and whitespace-only strings as unset
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl RegistrationConfig {
    /// Whether username and password are both supplied
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        is_set(&self.username) && is_set(&self.password)
    }

    /// Whether an activation key is supplied
    #[must_use]
    pub fn has_activationkey(&self) -> bool {
        is_set(&self.activationkey)
    }

    /// Names of the fields on which `self` and `other` differ
    #[must_use]
    pub fn diff(&self, other: &RegistrationConfig) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.name != other.name {
            changed.push("name");
        }
        if self.username != other.username {
            changed.push("username");
        }
        if self.password != other.password {
            changed.push("password");
        }
        if self.activationkey != other.activationkey {
            changed.push("activationkey");
        }
        if self.org != other.org {
            changed.push("org");
        }
        if self.environment != other.environment {
            changed.push("environment");
        }
        if self.autosubscribe != other.autosubscribe {
            changed.push("autosubscribe");
        }
        if self.servicelevel != other.servicelevel {
            changed.push("servicelevel");
        }
        if self.force != other.force {
            changed.push("force");
        }
        if self.ensure != other.ensure {
            changed.push("ensure");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_equal_configs() {
        let config = RegistrationConfig {
            name: "sat6.example.com".to_string(),
            ..Default::default()
        };

        assert!(config.diff(&config.clone()).is_empty());
    }

    #[test]
    fn test_diff_lists_changed_fields() {
        let a = RegistrationConfig {
            name: "sat6.example.com".to_string(),
            autosubscribe: true,
            ..Default::default()
        };
        let b = RegistrationConfig {
            name: "other.example.com".to_string(),
            ensure: Ensure::Absent,
            ..Default::default()
        };

        assert_eq!(a.diff(&b), vec!["name", "autosubscribe", "ensure"]);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let config = RegistrationConfig {
            username: Some(String::new()),
            password: Some("  ".to_string()),
            activationkey: Some("key".to_string()),
            ..Default::default()
        };

        assert!(!config.has_credentials());
        assert!(config.has_activationkey());
    }
}
