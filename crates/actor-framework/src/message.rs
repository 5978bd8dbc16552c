//! # Generic Messages
//!
//! Requests travelling from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor). Each carries a oneshot sender for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A single request against a resource store.
///
/// The variants mirror what a remote store of record offers to the storefront:
///
/// - **Create** returns the stored record, including its store-assigned id.
/// - **Get** returns `None` for unknown ids instead of an error.
/// - **List** returns every record in identifier order (a full snapshot, never a delta).
/// - **Update** returns the record after the update was applied.
/// - **Delete** fails with [`FrameworkError::NotFound`] for unknown ids.
/// - **Action** runs a resource-specific [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
