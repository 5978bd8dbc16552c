//! # Order Actor
//!
//! The in-memory order store of record, shared by customer checkout (create) and operator
//! fulfilment (status change).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Key Features
//!
//! - **Immutable snapshot**: lines, total and summary are fixed at creation
//! - **Single initial state**: every order starts `Processing`
//! - **Narrow update**: a status change touches only `status` and `updated_at`

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, OrderClient::new(generic_client))
}
