//! # Storefront
//!
//! The application state: one session with its cart, wishlist, catalog mirror, order cache
//! and the checkout in progress, plus the collaborator handles they talk through. Every
//! component is owned here and reached through `&mut self`, so no two writers ever touch the
//! same aggregate.
//!
//! Actions are gated by the session's [`Capability`] set. A denied action returns
//! [`StorefrontError::NotPermitted`] and changes nothing.

use crate::collaborators::Collaborators;
use crate::engine::cart::{Cart, CartSummary};
use crate::engine::catalog::{Catalog, CatalogQuery};
use crate::engine::checkout::{
    CheckoutKind, CheckoutOutcome, CheckoutPhase, CheckoutSession, SubmitTicket,
};
use crate::engine::error::{CheckoutError, StorefrontError};
use crate::engine::session::{Capability, Session};
use crate::engine::tracker::OrderTracker;
use crate::engine::wishlist::Wishlist;
use crate::lifecycle::EngineConfig;
use crate::model::{
    format_money, Account, Credentials, Order, OrderId, OrderStatus, Product, ProductDraft,
    ProductId, ProductPatch, Registration,
};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{info, instrument, warn};

pub struct Storefront {
    config: EngineConfig,
    collaborators: Collaborators,
    session: Session,
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    tracker: OrderTracker,
    checkout: Option<CheckoutSession>,
}

impl Storefront {
    pub fn new(config: EngineConfig, collaborators: Collaborators) -> Self {
        Self {
            session: Session::new(config.guest_email.clone()),
            catalog: Catalog::new(),
            cart: Cart::new(),
            wishlist: Wishlist::new(collaborators.wishlist.clone()),
            tracker: OrderTracker::new(config.status_policy),
            checkout: None,
            config,
            collaborators,
        }
    }

    /// Loads the catalog, the categories and the stored wishlist. Failures leave the
    /// affected part empty.
    #[instrument(skip(self))]
    pub async fn start(&mut self) {
        if let Err(e) = self.catalog.refresh(&*self.collaborators.products).await {
            warn!(error = %e, "Starting with an empty catalog");
        }
        self.catalog
            .refresh_categories(&*self.collaborators.categories)
            .await;
        self.wishlist.load().await;
        info!(
            products = self.catalog.len(),
            wishlist = self.wishlist.len(),
            "Storefront started"
        );
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The collaborator handles, for callers that drive a submission themselves.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn tracker(&self) -> &OrderTracker {
        &self.tracker
    }

    pub fn checkout(&self) -> Option<&CheckoutSession> {
        self.checkout.as_ref()
    }

    /// The checkout in progress, for stepping through payment and address.
    pub fn checkout_mut(&mut self) -> Result<&mut CheckoutSession, StorefrontError> {
        self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)
    }

    fn require(&self, capability: Capability) -> Result<(), StorefrontError> {
        if self.session.has(capability) {
            Ok(())
        } else {
            warn!(?capability, "Action not offered to this session");
            Err(StorefrontError::NotPermitted(capability))
        }
    }

    fn product(&self, id: &ProductId) -> Result<&Product, StorefrontError> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))
    }

    // --- Session ---

    pub async fn login(&mut self, credentials: &Credentials) -> Result<Account, StorefrontError> {
        let account = self
            .session
            .login(&*self.collaborators.identity, credentials)
            .await?;
        Ok(account.clone())
    }

    pub async fn register(&mut self, registration: Registration) -> Result<Account, StorefrontError> {
        let account = self
            .session
            .register(&*self.collaborators.identity, registration)
            .await?;
        Ok(account.clone())
    }

    /// Signs out. Closes any checkout, forgets the cached orders and, unless configured
    /// otherwise, empties the cart. The wishlist stays.
    pub fn logout(&mut self) -> Option<Account> {
        let account = self.session.logout();
        if let Some(checkout) = self.checkout.as_mut() {
            checkout.dismiss();
        }
        if self.config.clear_cart_on_logout {
            self.cart.clear();
        }
        self.tracker = OrderTracker::new(self.config.status_policy);
        account
    }

    pub fn rename(&mut self, name: &str) {
        self.session.rename(name);
    }

    // --- Catalog ---

    pub async fn refresh_catalog(&mut self) -> Result<usize, StorefrontError> {
        Ok(self.catalog.refresh(&*self.collaborators.products).await?)
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.query(query)
    }

    pub async fn create_product(&mut self, draft: ProductDraft) -> Result<Product, StorefrontError> {
        self.require(Capability::ManageCatalog)?;
        self.catalog
            .create_product(&*self.collaborators.products, draft)
            .await
    }

    pub async fn update_product(
        &mut self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, StorefrontError> {
        self.require(Capability::ManageCatalog)?;
        self.catalog
            .update_product(&*self.collaborators.products, id, patch)
            .await
    }

    pub async fn delete_product(&mut self, id: &ProductId) -> Result<bool, StorefrontError> {
        self.require(Capability::ManageCatalog)?;
        self.catalog
            .delete_product(&*self.collaborators.products, id)
            .await
    }

    pub async fn create_category(&mut self, name: &str) -> Result<String, StorefrontError> {
        self.require(Capability::ManageCatalog)?;
        self.catalog
            .create_category(&*self.collaborators.categories, name)
            .await
    }

    // --- Cart ---

    pub fn add_to_cart(&mut self, id: &ProductId, count: u32) -> Result<(), StorefrontError> {
        self.require(Capability::Purchase)?;
        let product = self.product(id)?.clone();
        self.cart.add(&product, count);
        Ok(())
    }

    pub fn set_cart_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<(), StorefrontError> {
        self.require(Capability::Purchase)?;
        self.cart.set_quantity(id, quantity);
        Ok(())
    }

    pub fn increment_cart_line(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        self.require(Capability::Purchase)?;
        self.cart.increment(id);
        Ok(())
    }

    pub fn decrement_cart_line(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        self.require(Capability::Purchase)?;
        self.cart.decrement(id);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<(), StorefrontError> {
        self.require(Capability::Purchase)?;
        self.cart.remove(id);
        Ok(())
    }

    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary(self.config.tax_rate)
    }

    pub fn format_money(&self, amount: Decimal) -> String {
        format_money(amount, &self.config.currency_symbol)
    }

    // --- Wishlist ---

    pub async fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool, StorefrontError> {
        self.require(Capability::Wishlist)?;
        Ok(self.wishlist.toggle(id).await)
    }

    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.wishlist.products(&self.catalog)
    }

    // --- Checkout ---

    fn open_checkout(&mut self, session: CheckoutSession) -> Result<&mut CheckoutSession, StorefrontError> {
        if let Some(current) = self.checkout.as_mut() {
            if current.phase() == CheckoutPhase::Submitting {
                return Err(CheckoutError::AlreadySubmitting.into());
            }
            current.dismiss();
        }
        let mut session = session.with_settle_window(self.config.settle_window);
        if self.session.is_authenticated() {
            session = session.with_contact_name(self.session.display_name());
        }
        Ok(self.checkout.insert(session))
    }

    pub fn begin_cart_checkout(&mut self) -> Result<&mut CheckoutSession, StorefrontError> {
        self.require(Capability::Purchase)?;
        let session = CheckoutSession::for_cart(&self.cart)?;
        self.open_checkout(session)
    }

    pub fn begin_buy_now(
        &mut self,
        id: &ProductId,
        quantity: u32,
    ) -> Result<&mut CheckoutSession, StorefrontError> {
        self.require(Capability::Purchase)?;
        let session = CheckoutSession::buy_now(self.product(id)?, quantity);
        self.open_checkout(session)
    }

    /// A cart checkout orders the cart as it is when submitted, not as it was when opened.
    fn capture_cart_lines(&mut self) -> Result<(), StorefrontError> {
        let Some(checkout) = self.checkout.as_mut() else {
            return Err(StorefrontError::NoActiveCheckout);
        };
        if checkout.kind() == CheckoutKind::Cart && checkout.phase() == CheckoutPhase::Address {
            checkout.replace_lines(self.cart.snapshot_lines())?;
        }
        Ok(())
    }

    /// Validates the address and sends the order, waiting for the answer.
    pub async fn submit_checkout(&mut self) -> Result<CheckoutOutcome, StorefrontError> {
        let buyer_email = self.session.buyer_email().to_string();
        self.capture_cart_lines()?;
        let checkout = self.checkout.as_mut().ok_or(StorefrontError::NoActiveCheckout)?;
        let kind = checkout.kind();
        let outcome = checkout
            .submit(&*self.collaborators.orders, &buyer_email)
            .await?;
        self.apply_outcome(kind, &outcome);
        Ok(outcome)
    }

    /// First half of a submission: validates the address and returns the ticket to send.
    /// The caller performs the order store call and reports back through
    /// [`Storefront::finish_checkout`], which leaves room to dismiss in between.
    pub fn begin_checkout_submit(&mut self) -> Result<SubmitTicket, StorefrontError> {
        let buyer_email = self.session.buyer_email().to_string();
        self.capture_cart_lines()?;
        Ok(self.checkout_mut()?.submit_address(&buyer_email)?)
    }

    pub fn finish_checkout(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Order, OrderError>,
    ) -> Result<CheckoutOutcome, StorefrontError> {
        let checkout = self.checkout_mut()?;
        let kind = checkout.kind();
        let outcome = checkout.complete(ticket, result)?;
        self.apply_outcome(kind, &outcome);
        Ok(outcome)
    }

    fn apply_outcome(&mut self, kind: CheckoutKind, outcome: &CheckoutOutcome) {
        match outcome {
            CheckoutOutcome::Settled(order) => {
                if kind == CheckoutKind::Cart {
                    self.cart.take_ordered(&order.lines);
                }
                self.tracker.record(order.clone());
                info!(order_id = %order.id, reference = %order.reference(), "Order placed");
            }
            CheckoutOutcome::Dismissed(Some(id)) => {
                warn!(order_id = %id, "Order placed by a dismissed checkout, cart kept");
            }
            CheckoutOutcome::Dismissed(None) | CheckoutOutcome::Failed(_) => {}
        }
    }

    pub fn dismiss_checkout(&mut self) {
        if let Some(checkout) = self.checkout.as_mut() {
            checkout.dismiss();
        }
    }

    /// Expires a settled checkout once its window has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.checkout
            .as_mut()
            .is_some_and(|checkout| checkout.tick(now))
    }

    // --- Orders ---

    pub async fn refresh_my_orders(&mut self) -> Result<usize, StorefrontError> {
        self.require(Capability::ViewOwnOrders)?;
        let buyer_email = self.session.buyer_email().to_string();
        Ok(self
            .tracker
            .refresh_mine(&*self.collaborators.orders, &buyer_email)
            .await?)
    }

    pub async fn refresh_all_orders(&mut self) -> Result<usize, StorefrontError> {
        self.require(Capability::ManageOrders)?;
        Ok(self.tracker.refresh_all(&*self.collaborators.orders).await?)
    }

    pub async fn update_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), StorefrontError> {
        self.require(Capability::ManageOrders)?;
        Ok(self
            .tracker
            .update_status(&*self.collaborators.orders, id, status)
            .await?)
    }
}
