//! [`ActorEntity`] implementation for [`Order`].
//!
//! Creation assigns the timestamps and the initial `Processing` status and freezes the lines,
//! total and summary. The only update is a [`StatusChange`].

use super::OrderError;
use crate::model::{lines_total, Order, OrderDraft, OrderId, OrderStatus, StatusChange};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

/// The order store has no operations beyond create, read and status change.
#[derive(Debug, Clone)]
pub enum OrderAction {}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderDraft;
    type Update = StatusChange;
    type Action = OrderAction;
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, draft: OrderDraft) -> Result<Self, Self::Error> {
        if draft.lines.is_empty() {
            return Err(OrderError::NoLines);
        }
        if let Some(field) = draft.shipping.first_missing() {
            return Err(OrderError::MissingShippingField(field));
        }
        if let Some(line) = draft.lines.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.product_id.to_string()));
        }
        let computed = lines_total(&draft.lines);
        if computed != draft.total {
            return Err(OrderError::TotalMismatch {
                claimed: draft.total,
                computed,
            });
        }

        let now = Utc::now();
        Ok(Self {
            id,
            buyer_email: draft.buyer_email,
            shipping: draft.shipping,
            summary: Order::summarize(&draft.lines),
            lines: draft.lines,
            total: draft.total,
            status: OrderStatus::Processing,
            created_at: now,
            updated_at: now,
        })
    }

    /// Touches only `status` and `updated_at`.
    async fn on_update(&mut self, change: StatusChange, _ctx: &()) -> Result<(), Self::Error> {
        if self.status != change.status {
            self.status = change.status;
            self.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
