//! Registration status reader
//!
//! Composes the individual probes into one observed-state record.

use std::path::PathBuf;
use std::sync::Arc;

use subtend_exec::traits::CommandRunner;
use tracing::{debug, instrument};

use crate::cache::FactCache;
use crate::probe::{self, CONSUMER_CERT_PATH, CONSUMER_KEY_PATH};
use crate::status::RegistrationStatus;

/// Reads the registration state observed on the host
///
/// The status is derived fresh on every call; nothing is cached here.
pub struct StatusReader {
    runner: Arc<dyn CommandRunner>,
    cache: Arc<dyn FactCache>,
    program: String,
    cert_paths: Vec<PathBuf>,
}

impl StatusReader {
    /// Create a new status reader
    ///
    /// # Arguments
    /// * `runner` - Command runner for `config --list`
    /// * `cache` - Cached facts from the out-of-band collector
    /// * `program` - CLI binary name, normally `subscription-manager`
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        cache: Arc<dyn FactCache>,
        program: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            cache,
            program: program.into(),
            cert_paths: vec![
                PathBuf::from(CONSUMER_CERT_PATH),
                PathBuf::from(CONSUMER_KEY_PATH),
            ],
        }
    }

    /// Override the consumer certificate paths
    #[must_use]
    pub fn with_cert_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.cert_paths = paths;
        self
    }

    /// Derive the current registration status
    ///
    /// The config file takes precedence for the server name; the CA-name
    /// fact is only trusted when a consumer certificate backs it. A cached
    /// identity always means registered, whatever the name says.
    #[instrument(skip(self))]
    pub async fn read(&self) -> RegistrationStatus {
        let mut server = probe::configured_hostname(self.runner.as_ref(), &self.program).await;

        if server.is_none() {
            let paths: Vec<&std::path::Path> =
                self.cert_paths.iter().map(PathBuf::as_path).collect();
            if probe::cert_files_present(&paths) {
                server = self.cache.ca_hostname();
            }
        }

        let identity = self.cache.identity();

        let status = match (identity, server) {
            (Some(identity), server) => RegistrationStatus::Registered {
                server: server.unwrap_or_default(),
                identity,
            },
            (None, Some(server)) => RegistrationStatus::Broken { server },
            (None, None) => RegistrationStatus::Unregistered,
        };

        debug!(status = %status, "observed registration status");

        status
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use subtend_exec::error::ExecError;
    use subtend_exec::result::CommandResult;

    use super::*;

    struct FakeRunner {
        stdout: String,
        status: i32,
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, _program: &str, _args: &[&str]) -> Result<CommandResult, ExecError> {
            Ok(CommandResult {
                status: self.status,
                stdout: self.stdout.clone(),
                stderr: String::new(),
                duration: Duration::from_millis(1),
            })
        }

        fn runner_type(&self) -> &'static str {
            "fake"
        }
    }

    struct FakeCache {
        ca: Option<String>,
        identity: Option<String>,
    }

    impl FactCache for FakeCache {
        fn ca_hostname(&self) -> Option<String> {
            self.ca.clone()
        }

        fn identity(&self) -> Option<String> {
            self.identity.clone()
        }
    }

    fn reader(runner: FakeRunner, cache: FakeCache) -> StatusReader {
        // Point at paths that never exist so the CA fallback stays off
        // unless a test overrides them.
        StatusReader::new(Arc::new(runner), Arc::new(cache), "subscription-manager")
            .with_cert_paths(vec![PathBuf::from("/nonexistent/cert.pem")])
    }

    #[tokio::test]
    async fn test_identity_means_registered() {
        let reader = reader(
            FakeRunner {
                stdout: "hostname = sat6.example.com".to_string(),
                status: 0,
            },
            FakeCache {
                ca: None,
                identity: Some("abc-123".to_string()),
            },
        );

        assert_eq!(
            reader.read().await,
            RegistrationStatus::Registered {
                server: "sat6.example.com".to_string(),
                identity: "abc-123".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_hostname_without_identity_is_broken() {
        let reader = reader(
            FakeRunner {
                stdout: "hostname = sat6.example.com".to_string(),
                status: 0,
            },
            FakeCache {
                ca: None,
                identity: None,
            },
        );

        assert_eq!(
            reader.read().await,
            RegistrationStatus::Broken {
                server: "sat6.example.com".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_nothing_discoverable_is_unregistered() {
        let reader = reader(
            FakeRunner {
                stdout: String::new(),
                status: 1,
            },
            FakeCache {
                ca: Some("sat6.example.com".to_string()),
                identity: None,
            },
        );

        // CA fact is present but no certificate backs it
        assert_eq!(reader.read().await, RegistrationStatus::Unregistered);
    }

    #[tokio::test]
    async fn test_ca_fact_fallback_with_certificate() {
        let cert = std::env::temp_dir().join("subtend-reader-test-cert.pem");
        std::fs::write(&cert, "cert").unwrap();

        let reader = StatusReader::new(
            Arc::new(FakeRunner {
                stdout: String::new(),
                status: 1,
            }),
            Arc::new(FakeCache {
                ca: Some("sat6.example.com".to_string()),
                identity: None,
            }),
            "subscription-manager",
        )
        .with_cert_paths(vec![cert.clone()]);

        let status = reader.read().await;
        std::fs::remove_file(&cert).unwrap();

        assert_eq!(
            status,
            RegistrationStatus::Broken {
                server: "sat6.example.com".to_string(),
            }
        );
    }
}
