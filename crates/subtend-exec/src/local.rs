//! Local command execution using `tokio::process`

use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::ExecError;
use crate::result::CommandResult;
use crate::traits::CommandRunner;

/// Local command runner
///
/// Executes programs on the local machine using `tokio::process::Command`.
/// Arguments are passed as a discrete vector, never through a shell.
#[derive(Debug, Clone)]
pub struct LocalRunner;

impl LocalRunner {
    /// Create a new local runner
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Internal method to execute command
    #[instrument(skip(self), level = "debug")]
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandResult, ExecError> {
        let start = Instant::now();

        debug!(program = %program, args = ?args, "executing command");

        let child = Command::new(program)
            .args(args)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| ExecError::SpawnError(e.to_string()))?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecError::IoError(e.to_string()))?;

        let duration = start.elapsed();

        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        // Non-zero exits are routine for subscription-manager; the call
        // sites decide whether they matter.
        debug!(
            program = %program,
            status = status,
            duration = ?duration,
            "command completed"
        );

        Ok(CommandResult {
            status,
            stdout,
            stderr,
            duration,
        })
    }
}

impl Default for LocalRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for LocalRunner {
    #[instrument(skip(self), level = "debug")]
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, ExecError> {
        self.execute(program, args).await
    }

    fn runner_type(&self) -> &'static str {
        "local"
    }
}
