//! # Account Actor
//!
//! The in-memory identity provider. It only exists to populate the session holder: the
//! engine never inspects credentials itself.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Identity`]
//! - [`actions`] - [`AccountAction::VerifyPassword`]
//! - [`error`] - [`AccountError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::AccountClient;
use crate::model::Identity;
use actor_framework::ResourceActor;

/// Creates a new Account actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Identity>, AccountClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, AccountClient::new(generic_client))
}
