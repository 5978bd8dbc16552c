//! # ActorEntity Trait
//!
//! The contract every record kept by a [`ResourceActor`](crate::ResourceActor) must satisfy.
//! In the storefront these are the collaborator-side records of record: products, orders,
//! accounts and categories. The actor owns the store; the entity owns its own validation and
//! mutation rules through the hooks below.
//!
//! Identifiers are assigned by the store, never by the caller: the actor hands a fresh `u32`
//! sequence number to `T::Id::from`, and the entity type decides how that number is rendered
//! (for example `prod_0000000007`). Identifiers are `Ord` so that listing is deterministic and
//! follows creation order.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The hooks are async so an entity may consult other actors while validating. The
/// `Context` type carries those dependencies and is injected through
/// [`ResourceActor::run`](crate::ResourceActor::run), not at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Store-assigned identifier, built from the actor's sequence counter.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a new record.
    type Create: Send + Sync + Debug;

    /// Payload for a partial update of an existing record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations that are not plain CRUD.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per resource rather than one per message. Callers match on a single
    /// type per collaborator.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the assigned id and the create payload.
    /// Rejecting the payload here means nothing is stored and the id is not reused.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the record is inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload in place. On error the actor keeps the record as it was
    /// before the call returned the error; implementations must validate before mutating.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
