//! # Engine
//!
//! The storefront's in-memory state components and the [`Storefront`] that owns them.
//!
//! - [`cart`]: line items and derived totals
//! - [`wishlist`]: product membership set, written through to storage
//! - [`catalog`]: mirror of the product store with browse and search projections
//! - [`checkout`]: the per-purchase state machine
//! - [`tracker`]: order cache with optimistic status changes
//! - [`session`]: who is browsing and what they may do

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod session;
pub mod storefront;
pub mod tracker;
pub mod wishlist;

pub use cart::{Cart, CartLine, CartSummary, MAX_LINE_QUANTITY};
pub use catalog::{Catalog, CatalogQuery, SortOrder, ALL_CATEGORIES, FEATURED_LIMIT};
pub use checkout::{
    CheckoutKind, CheckoutOutcome, CheckoutPhase, CheckoutSession, PaymentMethod, SubmitTicket,
};
pub use error::{CheckoutError, StorefrontError, TrackerError};
pub use session::{Capability, Session, GUEST_NAME};
pub use storefront::Storefront;
pub use tracker::{OrderTracker, TransitionPolicy};
pub use wishlist::Wishlist;
