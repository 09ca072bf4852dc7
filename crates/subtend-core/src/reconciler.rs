//! Registration reconciliation state machine
//!
//! One convergence pass reads the observed status, compares it to the
//! desired configuration, and issues register/unregister/attach commands
//! strictly in sequence through the injected runner.

use std::sync::Arc;

use chrono::Utc;
use subtend_exec::traits::CommandRunner;
use subtend_facts::reader::StatusReader;
use subtend_facts::status::RegistrationStatus;
use tracing::{debug, info, instrument};

use crate::args::build_register_args;
use crate::config::{Ensure, RegistrationConfig, is_set};
use crate::error::ReconcileError;
use crate::report::{PassAction, PassReport};

/// Default CLI binary
pub const SUBSCRIPTION_MANAGER: &str = "subscription-manager";

/// Reconciles desired registration state against the observed status
pub struct Reconciler {
    runner: Arc<dyn CommandRunner>,
    reader: StatusReader,
    program: String,
}

impl Reconciler {
    /// Create a new reconciler
    ///
    /// # Arguments
    /// * `runner` - Command runner the actions go through
    /// * `reader` - Status reader for the observation phase
    pub fn new(runner: Arc<dyn CommandRunner>, reader: StatusReader) -> Self {
        Self {
            runner,
            reader,
            program: SUBSCRIPTION_MANAGER.to_string(),
        }
    }

    /// Override the CLI binary name
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Enumeration query: the registration discovered on this host, if any
    ///
    /// A broken registration counts as discovered; a host with no record
    /// at all yields `None`.
    pub async fn instances(&self) -> Option<RegistrationStatus> {
        let status = self.reader.read().await;
        status.is_discovered().then_some(status)
    }

    /// Run one convergence pass
    ///
    /// # Errors
    /// Returns a validation error (credential conflict, missing org) or
    /// [`ReconcileError::RequiresForce`] before any command has run. Once
    /// commands start, non-zero exits are tolerated and the pass succeeds.
    #[instrument(skip(self, desired), fields(server = %desired.name))]
    pub async fn flush(&self, desired: &RegistrationConfig) -> Result<PassReport, ReconcileError> {
        let mut report = PassReport::new();

        if desired.ensure == Ensure::Absent {
            self.unregister(&mut report).await;
            report.completed_at = Utc::now();
            return Ok(report);
        }

        // Validate the desired configuration before observing anything.
        let register_args = build_register_args(desired)?;

        let observed = self.reader.read().await;

        match &observed {
            RegistrationStatus::Registered { server, .. } if *server == desired.name => {
                if !desired.force {
                    return Err(ReconcileError::RequiresForce {
                        server: server.clone(),
                    });
                }
                info!(server = %server, "forcing re-registration");
            }
            RegistrationStatus::Registered { server, .. } => {
                // Switching servers is always intentional; force not required.
                info!(current = %server, desired = %desired.name, "switching servers");
                self.unregister(&mut report).await;
            }
            RegistrationStatus::Broken { server } => {
                info!(current = %server, "repairing broken registration");
            }
            RegistrationStatus::Unregistered => {
                info!("registering unenrolled host");
            }
        }

        self.register(&register_args, &mut report).await;
        self.attach(desired, &mut report).await;

        report.completed_at = Utc::now();
        Ok(report)
    }

    /// Register against the desired server
    ///
    /// Non-zero exits are expected here: 1 when registering over stale
    /// local records, 2 when re-registering to the same server after an
    /// unregister. Neither fails the pass.
    async fn register(&self, args: &[String], report: &mut PassReport) {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();

        match self.runner.run(&self.program, &argv).await {
            Ok(result) if result.success() => {}
            Ok(result) => {
                debug!(
                    status = result.status,
                    output = %result.combined_output(),
                    "register exited non-zero"
                );
                report.tolerate();
            }
            Err(e) => {
                debug!(error = %e, "register did not run");
                report.tolerate();
            }
        }

        report.record(PassAction::Register);
    }

    /// Attach the configured service level
    ///
    /// Only runs with autosubscribe and a non-empty service level. Failures
    /// are tolerated; deployments with only custom products have no service
    /// levels to attach.
    async fn attach(&self, desired: &RegistrationConfig, report: &mut PassReport) {
        if !desired.autosubscribe || !is_set(&desired.servicelevel) {
            return;
        }
        let level = desired.servicelevel.clone().unwrap_or_default();

        let servicelevel = format!("--servicelevel={level}");
        match self
            .runner
            .run(&self.program, &["attach", &servicelevel, "--auto"])
            .await
        {
            Ok(result) if result.success() => {}
            Ok(result) => {
                debug!(
                    status = result.status,
                    output = %result.combined_output(),
                    "attach exited non-zero"
                );
                report.tolerate();
            }
            Err(e) => {
                debug!(error = %e, "attach did not run");
                report.tolerate();
            }
        }

        report.record(PassAction::Attach);
    }

    /// Best-effort local cleanup
    ///
    /// All three steps always run, whatever the earlier ones returned, so
    /// the host ends up locally clean even when the server is unreachable.
    async fn unregister(&self, report: &mut PassReport) {
        info!("unregistering");

        for args in [
            ["unsubscribe", "--all"].as_slice(),
            ["unregister"].as_slice(),
            ["clean"].as_slice(),
        ] {
            match self.runner.run(&self.program, args).await {
                Ok(result) if result.success() => {}
                Ok(result) => {
                    debug!(
                        subcommand = args[0],
                        status = result.status,
                        output = %result.combined_output(),
                        "cleanup step exited non-zero"
                    );
                    report.tolerate();
                }
                Err(e) => {
                    debug!(subcommand = args[0], error = %e, "cleanup step did not run");
                    report.tolerate();
                }
            }
        }

        report.record(PassAction::Unregister);
    }
}
