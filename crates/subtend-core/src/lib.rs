//! subtend-core: Registration reconciliation logic
//!
//! Compares the desired registration configuration against the status
//! observed on the host and issues register/unregister/attach commands
//! through an injected command runner.

pub mod args;
pub mod config;
pub mod error;
pub mod reconciler;
pub mod report;

pub use args::build_register_args;
pub use config::{Ensure, RegistrationConfig};
pub use error::ReconcileError;
pub use reconciler::Reconciler;
pub use report::{PassAction, PassReport};
