//! Configuration loading and types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use subtend_core::RegistrationConfig;

/// Top-level configuration for the subtend CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Local client settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Desired registration state
    #[serde(default)]
    pub registration: RegistrationConfig,
}

/// Local client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// CLI binary to invoke
    #[serde(default = "default_program")]
    pub program: String,
    /// Facts file written by the out-of-band collector
    #[serde(default = "default_facts_path")]
    pub facts_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            facts_path: default_facts_path(),
            log_level: default_log_level(),
        }
    }
}

fn default_program() -> String {
    "subscription-manager".to_string()
}

fn default_facts_path() -> PathBuf {
    PathBuf::from("/etc/subtend/facts.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &PathBuf) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    pub fn load_default() -> eyre::Result<Self> {
        // Check environment variable
        if let Ok(path) = std::env::var("SUBTEND_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        // Try common paths
        let paths = [
            PathBuf::from("subtend.toml"),
            PathBuf::from("/etc/subtend/subtend.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        // Return default config if no file found
        tracing::warn!("no config file found, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtend_core::Ensure;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
[client]
program = "/usr/sbin/subscription-manager"
facts_path = "/var/lib/subtend/facts.json"

[registration]
name = "sat6.example.com"
activationkey = "el9-key"
org = "Default_Organization"
autosubscribe = true
servicelevel = "Premium"
"#,
        )
        .unwrap();

        assert_eq!(config.client.program, "/usr/sbin/subscription-manager");
        assert_eq!(config.registration.name, "sat6.example.com");
        assert_eq!(config.registration.ensure, Ensure::Present);
        assert!(config.registration.autosubscribe);
    }

    #[test]
    fn test_defaults_fill_in() {
        let config: Config = toml::from_str(
            r#"
[registration]
name = "sat6.example.com"
org = "Default_Organization"
"#,
        )
        .unwrap();

        assert_eq!(config.client.program, "subscription-manager");
        assert_eq!(
            config.client.facts_path,
            PathBuf::from("/etc/subtend/facts.json")
        );
        assert!(!config.registration.force);
    }
}
