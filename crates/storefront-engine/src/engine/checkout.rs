//! # Checkout Orchestrator
//!
//! One [`CheckoutSession`] per purchase attempt, either the whole cart or a single "Buy Now"
//! product. A cart checkout takes the cart's lines again at submission through
//! [`CheckoutSession::replace_lines`], so edits made while the form is open are ordered too.
//! The session walks a linear state machine:
//!
//! ```text
//! Payment -> Address -> Submitting -> Settled -> Closed
//!                ^           |
//!                +-----------+  (order store failure)
//! ```
//!
//! ## Single flight
//!
//! [`CheckoutSession::submit_address`] is the only way into `Submitting`, and it refuses while
//! a submission is in flight. Each submission gets a [`SubmitTicket`] that must be handed
//! back to [`CheckoutSession::complete`]; tickets from an earlier attempt are rejected.
//!
//! ## Dismissal
//!
//! Closing the checkout before submission drops it with no remote effect. Closing it while
//! `Submitting` fires the session's [`Dismissal`]: the order store is expected to skip the
//! request if it has not been sent, and whatever result comes back is reported as
//! [`CheckoutOutcome::Dismissed`] instead of settling the checkout.

use crate::collaborators::{Dismissal, OrderStore};
use crate::engine::cart::{Cart, MAX_LINE_QUANTITY};
use crate::engine::error::CheckoutError;
use crate::model::{
    lines_total, Order, OrderDraft, OrderId, OrderLine, Product, ShippingDetails, ShippingField,
};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a settled checkout stays on screen by default.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutPhase {
    Payment,
    Address,
    Submitting,
    Settled,
    Closed,
}

/// Where the lines came from. Only a cart checkout empties the cart when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutKind {
    Cart,
    BuyNow,
}

/// Advisory payment choice. No gateway is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Wallet,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::Wallet,
        PaymentMethod::CashOnDelivery,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Wallet => "Wallet",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

/// Proof of one submission. Carries the draft to send and the signal to honour.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    attempt: u32,
    draft: OrderDraft,
    dismissal: Dismissal,
}

impl SubmitTicket {
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn dismissal(&self) -> &Dismissal {
        &self.dismissal
    }
}

/// What became of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Settled(Order),
    /// Back at `Address` with the error surfaced.
    Failed(CheckoutError),
    /// The buyer closed the checkout while it was submitting. Carries the order id if the
    /// store created one anyway.
    Dismissed(Option<OrderId>),
}

#[derive(Debug)]
pub struct CheckoutSession {
    kind: CheckoutKind,
    phase: CheckoutPhase,
    lines: Vec<OrderLine>,
    payment: PaymentMethod,
    shipping: ShippingDetails,
    field_error: Option<ShippingField>,
    last_error: Option<CheckoutError>,
    attempt: u32,
    in_flight: Option<u32>,
    dismissal: Dismissal,
    order: Option<Order>,
    settled_at: Option<Instant>,
    settle_window: Duration,
}

impl CheckoutSession {
    fn open(kind: CheckoutKind, lines: Vec<OrderLine>) -> Self {
        info!(?kind, lines = lines.len(), "Checkout opened");
        Self {
            kind,
            phase: CheckoutPhase::Payment,
            lines,
            payment: PaymentMethod::default(),
            shipping: ShippingDetails::default(),
            field_error: None,
            last_error: None,
            attempt: 0,
            in_flight: None,
            dismissal: Dismissal::new(),
            order: None,
            settled_at: None,
            settle_window: DEFAULT_SETTLE_WINDOW,
        }
    }

    /// Checks out every line of the cart, priced as the cart holds them now.
    pub fn for_cart(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        Ok(Self::open(CheckoutKind::Cart, cart.snapshot_lines()))
    }

    /// Checks out one product directly, leaving the cart alone. Zero counts as one.
    pub fn buy_now(product: &Product, quantity: u32) -> Self {
        let line = OrderLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: quantity.clamp(1, MAX_LINE_QUANTITY),
            image: product.primary_image().map(str::to_string),
        };
        Self::open(CheckoutKind::BuyNow, vec![line])
    }

    pub fn with_settle_window(mut self, window: Duration) -> Self {
        self.settle_window = window;
        self
    }

    /// Prefills the recipient name from the signed-in account.
    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        if self.shipping.full_name.trim().is_empty() {
            self.shipping.full_name = name.into();
        }
        self
    }

    pub fn kind(&self) -> CheckoutKind {
        self.kind
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    /// The field the form should highlight.
    pub fn field_error(&self) -> Option<ShippingField> {
        self.field_error
    }

    /// The most recent failure, cleared when a submission settles.
    pub fn last_error(&self) -> Option<&CheckoutError> {
        self.last_error.as_ref()
    }

    /// The order once settled.
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn settled_at(&self) -> Option<Instant> {
        self.settled_at
    }

    pub fn is_open(&self) -> bool {
        self.phase != CheckoutPhase::Closed
    }

    pub fn dismissal(&self) -> &Dismissal {
        &self.dismissal
    }

    fn expect_phase(&self, expected: CheckoutPhase) -> Result<(), CheckoutError> {
        if self.phase == expected {
            return Ok(());
        }
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::AlreadySubmitting);
        }
        Err(CheckoutError::WrongPhase {
            expected,
            actual: self.phase,
        })
    }

    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.expect_phase(CheckoutPhase::Payment)?;
        debug!(?method, "Payment method selected");
        self.payment = method;
        Ok(())
    }

    pub fn confirm_payment(&mut self) -> Result<(), CheckoutError> {
        self.expect_phase(CheckoutPhase::Payment)?;
        self.phase = CheckoutPhase::Address;
        info!(phase = ?self.phase, payment = ?self.payment, "Payment confirmed");
        Ok(())
    }

    /// Replaces the shipping form. Clears the highlighted field once it is filled in.
    pub fn update_shipping(&mut self, shipping: ShippingDetails) -> Result<(), CheckoutError> {
        self.expect_phase(CheckoutPhase::Address)?;
        self.shipping = shipping;
        if let Some(field) = self.field_error {
            if !self.shipping.missing_fields().contains(&field) {
                self.field_error = None;
            }
        }
        Ok(())
    }

    /// Swaps in the lines to order, priced as they are now. Only possible before submitting.
    pub fn replace_lines(&mut self, lines: Vec<OrderLine>) -> Result<(), CheckoutError> {
        self.expect_phase(CheckoutPhase::Address)?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        if lines != self.lines {
            debug!(before = self.lines.len(), after = lines.len(), "Checkout lines updated");
            self.lines = lines;
        }
        Ok(())
    }

    /// Validates the address and moves to `Submitting`.
    ///
    /// A blank required field keeps the session at `Address` with the field highlighted and
    /// nothing to send.
    pub fn submit_address(&mut self, buyer_email: &str) -> Result<SubmitTicket, CheckoutError> {
        self.expect_phase(CheckoutPhase::Address)?;

        if let Some(field) = self.shipping.first_missing() {
            warn!(%field, "Shipping field missing");
            let err = CheckoutError::MissingField(field);
            self.field_error = Some(field);
            self.last_error = Some(err.clone());
            return Err(err);
        }

        self.field_error = None;
        self.attempt += 1;
        self.in_flight = Some(self.attempt);
        self.phase = CheckoutPhase::Submitting;
        info!(phase = ?self.phase, attempt = self.attempt, total = %self.total(), "Submitting order");

        Ok(SubmitTicket {
            attempt: self.attempt,
            draft: OrderDraft::new(buyer_email, self.shipping.clone(), self.lines.clone()),
            dismissal: self.dismissal.clone(),
        })
    }

    /// Applies the order store's answer for `ticket`.
    pub fn complete(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Order, OrderError>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.complete_at(ticket, result, Instant::now())
    }

    /// Like [`CheckoutSession::complete`] with an explicit settlement instant.
    pub fn complete_at(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Order, OrderError>,
        now: Instant,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if self.in_flight != Some(ticket.attempt) {
            warn!(attempt = ticket.attempt, "Ignoring stale submission result");
            return Err(CheckoutError::StaleTicket);
        }
        self.in_flight = None;

        if self.dismissal.is_dismissed() {
            let order_id = result.ok().map(|order| order.id);
            match &order_id {
                Some(id) => warn!(order_id = %id, "Order created after checkout was dismissed"),
                None => info!("Dismissed checkout finished without an order"),
            }
            return Ok(CheckoutOutcome::Dismissed(order_id));
        }

        match result {
            Ok(order) => {
                self.phase = CheckoutPhase::Settled;
                self.settled_at = Some(now);
                self.last_error = None;
                self.order = Some(order.clone());
                info!(phase = ?self.phase, order_id = %order.id, "Checkout settled");
                Ok(CheckoutOutcome::Settled(order))
            }
            Err(e) => {
                let err = CheckoutError::Collaborator(e);
                self.phase = CheckoutPhase::Address;
                self.last_error = Some(err.clone());
                warn!(phase = ?self.phase, error = %err, "Order submission failed");
                Ok(CheckoutOutcome::Failed(err))
            }
        }
    }

    /// Validates, sends the order and applies the answer.
    pub async fn submit(
        &mut self,
        store: &dyn OrderStore,
        buyer_email: &str,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let ticket = self.submit_address(buyer_email)?;
        let result = store.create(ticket.draft.clone(), &ticket.dismissal).await;
        self.complete(ticket, result)
    }

    /// Closes the checkout. While submitting, the in-flight call is signalled instead of
    /// being awaited.
    pub fn dismiss(&mut self) {
        match self.phase {
            CheckoutPhase::Closed => return,
            CheckoutPhase::Submitting => {
                self.dismissal.dismiss();
                info!("Checkout dismissed during submission");
            }
            phase => debug!(?phase, "Checkout dismissed"),
        }
        self.phase = CheckoutPhase::Closed;
    }

    /// Closes a settled checkout once its display window has passed. Returns whether the
    /// phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phase != CheckoutPhase::Settled {
            return false;
        }
        let Some(settled_at) = self.settled_at else {
            return false;
        };
        if now.saturating_duration_since(settled_at) < self.settle_window {
            return false;
        }
        self.phase = CheckoutPhase::Closed;
        debug!("Settled checkout expired");
        true
    }
}
