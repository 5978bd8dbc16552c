//! # Order Lifecycle Tracker
//!
//! A read-through cache of orders plus the operator's status writes.
//!
//! Status changes are optimistic: the cache shows the new status before the order store is
//! asked. A failed write is not rolled back. The order is recorded as divergent instead, and
//! stays that way until the next full refresh replaces the cache with what the store holds.

use crate::collaborators::OrderStore;
use crate::engine::error::TrackerError;
use crate::model::{Order, OrderId, OrderStatus, StatusFilter};
use chrono::Utc;
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Which status changes the operator may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may be set from any other, so mis-clicks can be corrected.
    #[default]
    Permissive,
    /// Processing -> Shipped | Delivered, Shipped -> Delivered | Returned,
    /// Delivered -> Returned.
    ForwardOnly,
}

impl TransitionPolicy {
    /// Re-selecting the current status is always allowed.
    pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
        use OrderStatus::*;
        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::ForwardOnly => matches!(
                (from, to),
                (Processing, Shipped)
                    | (Processing, Delivered)
                    | (Shipped, Delivered)
                    | (Shipped, Returned)
                    | (Delivered, Returned)
            ),
        }
    }
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "forward-only" | "forward_only" => Ok(TransitionPolicy::ForwardOnly),
            other => Err(format!("expected 'permissive' or 'forward-only', got '{other}'")),
        }
    }
}

#[derive(Debug, Default)]
pub struct OrderTracker {
    orders: Vec<Order>,
    divergent: BTreeSet<OrderId>,
    policy: TransitionPolicy,
}

impl OrderTracker {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            orders: Vec::new(),
            divergent: BTreeSet::new(),
            policy,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Replaces the cache with every order (operator view).
    pub async fn refresh_all(&mut self, store: &dyn OrderStore) -> Result<usize, TrackerError> {
        let orders = store.list_all().await.map_err(|e| {
            warn!(error = %e, "Order refresh failed");
            TrackerError::Refresh(e)
        })?;
        Ok(self.replace(orders))
    }

    /// Replaces the cache with the buyer's own orders (customer view).
    pub async fn refresh_mine(
        &mut self,
        store: &dyn OrderStore,
        buyer_email: &str,
    ) -> Result<usize, TrackerError> {
        let orders = store.list_mine(buyer_email).await.map_err(|e| {
            warn!(error = %e, "Order refresh failed");
            TrackerError::Refresh(e)
        })?;
        Ok(self.replace(orders))
    }

    fn replace(&mut self, orders: Vec<Order>) -> usize {
        if !self.divergent.is_empty() {
            info!(count = self.divergent.len(), "Refresh reconciled divergent orders");
        }
        self.divergent.clear();
        self.orders = orders;
        info!(count = self.orders.len(), "Orders refreshed");
        self.orders.len()
    }

    /// Adds an order the engine just created, or replaces the cached copy.
    pub fn record(&mut self, order: Order) {
        debug!(order_id = %order.id, "Order recorded");
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
    }

    /// Sets `status` locally, then writes it to the store.
    ///
    /// Re-selecting the current status does nothing. A transition the policy forbids touches
    /// neither the cache nor the store. A failed write leaves the new status in place and
    /// marks the order divergent.
    pub async fn update_status(
        &mut self,
        store: &dyn OrderStore,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), TrackerError> {
        let policy = self.policy;
        let order = self
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| TrackerError::UnknownOrder(id.clone()))?;

        let from = order.status;
        if from == status {
            debug!(order_id = %id, %status, "Status unchanged");
            return Ok(());
        }
        if !policy.allows(from, status) {
            warn!(order_id = %id, %from, to = %status, "Status change rejected");
            return Err(TrackerError::TransitionRejected { from, to: status });
        }

        order.status = status;
        order.updated_at = Utc::now();
        info!(order_id = %id, %from, to = %status, "Status applied locally");

        match store.update_status(id, status).await {
            Ok(saved) => {
                self.divergent.remove(id);
                if let Some(cached) = self.orders.iter_mut().find(|o| &o.id == id) {
                    cached.status = saved.status;
                    cached.updated_at = saved.updated_at;
                }
                Ok(())
            }
            Err(e) => {
                warn!(order_id = %id, error = %e, "Status not saved, cache diverges until refresh");
                self.divergent.insert(id.clone());
                Err(TrackerError::RemoteWriteFailed {
                    id: id.clone(),
                    source: e,
                })
            }
        }
    }

    /// Cached orders matching `filter`, newest first.
    pub fn orders(&self, filter: StatusFilter) -> Vec<&Order> {
        let mut found: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| filter.matches(o.status))
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        found
    }

    /// Orders still on their way.
    pub fn active(&self) -> Vec<&Order> {
        self.orders(StatusFilter::All)
            .into_iter()
            .filter(|o| o.status.is_active())
            .collect()
    }

    pub fn past(&self) -> Vec<&Order> {
        self.orders(StatusFilter::All)
            .into_iter()
            .filter(|o| !o.status.is_active())
            .collect()
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders whose cached status the store has not confirmed.
    pub fn divergent(&self) -> &BTreeSet<OrderId> {
        &self.divergent
    }

    pub fn is_divergent(&self, id: &OrderId) -> bool {
        self.divergent.contains(id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
