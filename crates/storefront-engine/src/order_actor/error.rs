//! Error types for the order store.

use crate::model::ShippingField;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order has no lines")]
    NoLines,

    #[error("Missing shipping field: {0}")]
    MissingShippingField(ShippingField),

    #[error("Line quantity must be at least 1 for {0}")]
    InvalidQuantity(String),

    /// The draft total disagrees with its lines.
    #[error("Order total {claimed} does not match lines total {computed}")]
    TotalMismatch { claimed: Decimal, computed: Decimal },

    /// The checkout was dismissed before the request was sent.
    #[error("Checkout dismissed before the order was sent")]
    Dismissed,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
