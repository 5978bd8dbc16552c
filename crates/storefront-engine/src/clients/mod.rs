//! # Collaborator Clients
//!
//! Typed wrappers around each actor's [`ResourceClient`](actor_framework::ResourceClient).
//! Every wrapper implements [`ActorClient`](actor_framework::ActorClient) for the shared
//! read/delete plumbing and the collaborator trait the engine consumes.

pub mod account_client;
pub mod category_client;
pub mod order_client;
pub mod product_client;

pub use account_client::AccountClient;
pub use category_client::CategoryClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;

use actor_framework::FrameworkError;

/// Maps a framework error back into the resource error type.
///
/// Entity errors travel boxed through the actor and are unboxed here, so a validation
/// failure reaches the caller as its own variant rather than as a communication error.
pub(crate) fn resource_error<E>(e: FrameworkError, not_found: impl FnOnce(String) -> E) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::NotFound(id) => not_found(id),
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(err) => *err,
            Err(other) => E::from(other.to_string()),
        },
        other => E::from(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_actor::ProductError;

    #[test]
    fn entity_errors_are_unboxed() {
        let err = resource_error(
            FrameworkError::entity(ProductError::EmptyName),
            ProductError::NotFound,
        );
        assert_eq!(err, ProductError::EmptyName);
    }

    #[test]
    fn transport_errors_become_communication_errors() {
        let err = resource_error(FrameworkError::ActorClosed, ProductError::NotFound);
        assert_eq!(err, ProductError::ActorCommunicationError("Actor closed".to_string()));
    }

    #[test]
    fn not_found_uses_the_resource_variant() {
        let err = resource_error(
            FrameworkError::NotFound("prod_0000000009".to_string()),
            ProductError::NotFound,
        );
        assert_eq!(err, ProductError::NotFound("prod_0000000009".to_string()));
    }
}
