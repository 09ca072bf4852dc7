//! Error types for subtend-exec

use thiserror::Error;

/// Errors that can occur while running a command
#[derive(Error, Debug, Clone)]
pub enum ExecError {
    /// Process could not be spawned (binary missing, permissions)
    #[error("failed to spawn process: {0}")]
    SpawnError(String),

    /// I/O error while collecting output
    #[error("I/O error: {0}")]
    IoError(String),
}
