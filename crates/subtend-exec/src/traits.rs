//! Command runner trait

use async_trait::async_trait;

use crate::error::ExecError;
use crate::result::CommandResult;

/// Capability to run an external program and capture its outcome.
///
/// A non-zero exit status is not an error at this layer; it is reported in
/// the returned [`CommandResult`] and call sites decide what to make of it.
/// `Err` is reserved for the program failing to run at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, ExecError>;

    fn runner_type(&self) -> &'static str;
}
