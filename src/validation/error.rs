//! # Validation Error
//!
//! The single failure kind every validator reports.

use thiserror::Error;

/// A rejected parameter value
///
/// The message is the whole contract: it is shown to the user as-is and
/// callers match on its text. There are no codes or structured fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
