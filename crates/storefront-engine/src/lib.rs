//! # Storefront Engine
//!
//! The client-side state of a storefront: catalog mirror, cart, wishlist, checkout, order
//! tracking and the signed-in session. Durable data lives with collaborators (product store,
//! order store, identity provider, category registry, wishlist storage); this crate ships
//! in-memory versions of them built on [`actor_framework`].
//!
//! - **[model]**: plain data ([`Product`](model::Product), [`Order`](model::Order), ...)
//! - **[collaborators]**: the traits the engine talks through
//! - **[clients]** and the `*_actor` modules: in-memory stores of record
//! - **[engine]**: the state components and the [`Storefront`](engine::Storefront) that owns them
//! - **[lifecycle]**: configuration and the [`StoreSystem`](lifecycle::StoreSystem)

pub mod account_actor;
pub mod category_actor;
pub mod clients;
pub mod collaborators;
pub mod engine;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
