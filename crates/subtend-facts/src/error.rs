//! Error types for subtend-facts

use thiserror::Error;

/// Errors that can occur while loading cached facts
#[derive(Error, Debug, Clone)]
pub enum FactError {
    /// Facts file exists but could not be read
    #[error("facts file unreadable: {0}")]
    Unreadable(String),

    /// Facts file is not valid JSON
    #[error("facts file parse error: {0}")]
    ParseError(String),
}
