//! # Collaborator Contracts
//!
//! The engine never owns durable state. Products, orders, accounts, categories and the
//! wishlist live behind these traits, held as `Arc<dyn ...>` so tests and the demo can plug in
//! the in-memory actors, a mock, or anything else that honours the contract.

pub mod dismissal;
pub mod wishlist_storage;

pub use dismissal::Dismissal;
pub use wishlist_storage::*;

use crate::account_actor::AccountError;
use crate::category_actor::CategoryError;
use crate::model::{
    Account, Credentials, Order, OrderDraft, OrderId, OrderStatus, ProductDraft, ProductId,
    ProductPatch, ProductRecord, Registration,
};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote product store. Records come back in the store's own shape and are normalized by
/// the catalog mirror.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductRecord>, ProductError>;
    async fn create(&self, draft: ProductDraft) -> Result<ProductRecord, ProductError>;
    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<ProductRecord, ProductError>;
    /// `Ok(false)` when the store had no such product.
    async fn delete(&self, id: &ProductId) -> Result<bool, ProductError>;
}

/// Remote order store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Assigns id, timestamps and `Processing`. Must not send anything once `dismissal` has
    /// fired; [`OrderError::Dismissed`] is returned instead.
    async fn create(&self, draft: OrderDraft, dismissal: &Dismissal) -> Result<Order, OrderError>;
    async fn list_mine(&self, buyer_email: &str) -> Result<Vec<Order>, OrderError>;
    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, OrderError>;
}

/// Durable per-device storage for the wishlist.
#[async_trait]
pub trait WishlistStorage: Send + Sync {
    async fn read(&self) -> Result<Vec<ProductId>, WishlistError>;
    async fn write(&self, ids: &[ProductId]) -> Result<(), WishlistError>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Account, AccountError>;
    async fn register(&self, registration: Registration) -> Result<Account, AccountError>;
}

#[async_trait]
pub trait CategoryRegistry: Send + Sync {
    async fn list(&self) -> Result<Vec<String>, CategoryError>;
    async fn create(&self, name: &str) -> Result<String, CategoryError>;
}

/// Handles to every collaborator the storefront talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub categories: Arc<dyn CategoryRegistry>,
    pub wishlist: Arc<dyn WishlistStorage>,
}
