//! subtend-exec: Command execution abstraction
//!
//! Provides the `CommandRunner` trait and a local implementation for
//! invoking external tools with discrete argument vectors

pub mod error;
pub mod local;
pub mod result;
pub mod traits;

pub use error::ExecError;
pub use local::LocalRunner;
pub use result::CommandResult;
pub use traits::CommandRunner;
