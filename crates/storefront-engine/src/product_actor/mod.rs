//! # Product Actor
//!
//! The in-memory product store of record. The catalog mirror reads it in full and the
//! operator's catalog editor writes through it.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use storefront_engine::collaborators::ProductStore;
//! use storefront_engine::model::ProductDraft;
//! use storefront_engine::product_actor;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let record = client
//!         .create(ProductDraft {
//!             name: "Desk Lamp".to_string(),
//!             price: Decimal::new(899, 0),
//!             images: vec!["lamp.jpg".to_string()],
//!             ..Default::default()
//!         })
//!         .await?;
//!     assert_eq!(record.id, "prod_0000000001");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::ProductAction;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, ProductClient::new(generic_client))
}
