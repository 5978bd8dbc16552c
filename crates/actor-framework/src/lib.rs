//! # Actor Framework
//!
//! Building blocks for the in-memory stores of record used by the storefront engine. Each
//! resource (products, orders, accounts, categories) lives in its own actor: a Tokio task that
//! owns an ordered map of records and handles one request at a time. Callers hold a cheap,
//! cloneable client and talk to the actor through messages.
//!
//! ## Why actors for a store of record?
//!
//! The engine treats its collaborators as remote services: it sends a request, awaits a
//! reply, and never touches the stored record directly. An actor gives exactly that shape in
//! process:
//!
//! - **Isolation**: only the actor task can reach its records, so no locks are needed
//! - **Ordering**: requests from one client are handled in the order they were sent
//! - **Store-assigned identity**: ids come from the actor's sequence counter, never the caller
//! - **Swap-ability**: the same client API is served by [`mock::MockClient`] in tests
//!
//! **Further Reading**:
//! - [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/)
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - validation and mutation rules of one record type
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and the ordered store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed request/reply
//!
//! ## Core Abstractions
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Category {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct CategoryCreate { name: String }
//! #[derive(Debug)] struct CategoryUpdate { name: Option<String> }
//! #[derive(Debug)] enum CategoryAction {}
//! #[derive(Debug, thiserror::Error)]
//! enum CategoryError {
//!     #[error("category name must not be empty")]
//!     EmptyName,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Category {
//!     type Id = u32;
//!     type Create = CategoryCreate;
//!     type Update = CategoryUpdate;
//!     type Action = CategoryAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = CategoryError;
//!
//!     fn from_create_params(id: u32, params: CategoryCreate) -> Result<Self, Self::Error> {
//!         if params.name.trim().is_empty() {
//!             return Err(CategoryError::EmptyName);
//!         }
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     async fn on_update(&mut self, update: CategoryUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: CategoryAction, _ctx: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Category>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let created = client.create(CategoryCreate { name: "Home".into() }).await.unwrap();
//!     let fetched = client.get(created.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.name, "Home");
//!
//!     assert!(client.create(CategoryCreate { name: " ".into() }).await.is_err());
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`actor.run(context)`), not when it is
//! constructed, so actors that depend on each other can all be created first and wired
//! afterwards. The storefront's stores are independent and run with `()`.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Different actors run in parallel
//! - An actor stops when the last client is dropped
//!
//! ## Testing
//!
//! See the [`mock`] module for [`mock::MockClient`] and the channel helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
