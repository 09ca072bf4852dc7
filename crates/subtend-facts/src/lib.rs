//! subtend-facts: Registration fact probes
//!
//! Reads the weak local signals a registration leaves behind (consumer
//! certificates, cached facts, `subscription-manager config` output) and
//! composes them into an observed registration status.

pub mod cache;
pub mod error;
pub mod probe;
pub mod reader;
pub mod status;

pub use cache::{FactCache, JsonFactCache};
pub use error::FactError;
pub use reader::StatusReader;
pub use status::RegistrationStatus;
