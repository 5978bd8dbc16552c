//! # Order Client
//!
//! Wraps a `ResourceClient<Order>` and serves it as an [`OrderStore`].
use super::resource_error;
use crate::collaborators::{Dismissal, OrderStore};
use crate::model::{Order, OrderDraft, OrderId, OrderStatus, StatusChange};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        resource_error(e, OrderError::NotFound)
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    #[instrument(skip(self, draft, dismissal), fields(buyer = %draft.buyer_email, lines = draft.lines.len()))]
    async fn create(&self, draft: OrderDraft, dismissal: &Dismissal) -> Result<Order, OrderError> {
        debug!(?draft, "create_order called");
        if dismissal.is_dismissed() {
            warn!("Checkout dismissed, order not sent");
            return Err(OrderError::Dismissed);
        }

        info!("Sending create_order to actor");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn list_mine(&self, buyer_email: &str) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = ActorClient::list(self).await?;
        Ok(orders
            .into_iter()
            .filter(|order| order.buyer_email.eq_ignore_ascii_case(buyer_email))
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        ActorClient::list(self).await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id.clone(), StatusChange { status })
            .await
            .map_err(Self::map_error)
    }
}
