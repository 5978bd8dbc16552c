//! Errors raised by the engine components themselves.

use crate::account_actor::AccountError;
use crate::category_actor::CategoryError;
use crate::engine::checkout::CheckoutPhase;
use crate::engine::session::Capability;
use crate::model::{OrderId, OrderStatus, ProductId, ShippingField};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// A required shipping field is blank. Nothing was sent.
    #[error("Please fill in the {0}")]
    MissingField(ShippingField),

    /// A submission is already in flight for this checkout.
    #[error("Order is already being submitted")]
    AlreadySubmitting,

    #[error("Not possible while the checkout is in {actual:?}, expected {expected:?}")]
    WrongPhase {
        expected: CheckoutPhase,
        actual: CheckoutPhase,
    },

    #[error("Nothing to check out")]
    EmptySelection,

    /// The ticket does not belong to the current submission.
    #[error("Stale submission ticket")]
    StaleTicket,

    #[error("Could not place the order: {0}")]
    Collaborator(#[from] OrderError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    #[error("Unknown order: {0}")]
    UnknownOrder(OrderId),

    #[error("Status change {from} -> {to} is not allowed")]
    TransitionRejected { from: OrderStatus, to: OrderStatus },

    /// The local cache already shows the new status; the store does not.
    #[error("Status of {id} shown locally but not saved: {source}")]
    RemoteWriteFailed { id: OrderId, source: OrderError },

    #[error("Could not load orders: {0}")]
    Refresh(#[source] OrderError),
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Not permitted for this session: {0:?}")]
    NotPermitted(Capability),

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("No checkout in progress")]
    NoActiveCheckout,

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Account(#[from] AccountError),
}
