//! Error types for the category registry.

use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Category already exists: {0}")]
    Duplicate(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CategoryError {
    fn from(msg: String) -> Self {
        CategoryError::ActorCommunicationError(msg)
    }
}
