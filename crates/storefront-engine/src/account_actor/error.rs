//! Error types for the identity provider.

use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Missing registration field: {0}")]
    MissingField(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AccountError {
    fn from(msg: String) -> Self {
        AccountError::ActorCommunicationError(msg)
    }
}
