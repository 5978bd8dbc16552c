//! # Category Actor
//!
//! The in-memory category registry: names in creation order, no duplicates.

pub mod entity;
pub mod error;

pub use entity::CategoryAction;
pub use error::*;

use crate::clients::CategoryClient;
use crate::model::Category;
use actor_framework::ResourceActor;

/// Creates a new Category actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, CategoryClient::new(generic_client))
}
