//! Error types for subtend-core

use thiserror::Error;

/// Errors that abort a convergence pass
///
/// All of these are raised before any command is issued. Non-zero exits
/// from the commands themselves are tolerated and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Neither or both credential modes supplied
    #[error("exactly one of username/password or activationkey must be set")]
    CredentialConflict,

    /// Organization label missing
    #[error("org must be set")]
    MissingOrg,

    /// Already registered to the desired server and force is not set
    #[error("already registered to {server}; re-registration requires force")]
    RequiresForce {
        /// Server the host is currently registered to
        server: String,
    },
}
