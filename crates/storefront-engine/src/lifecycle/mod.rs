//! # System Lifecycle
//!
//! Configuration and the [`StoreSystem`] that starts, wires and stops the store actors.
//!
//! ## Startup
//!
//! 1. [`EngineConfig::from_env`] reads `.env` and the `STOREFRONT_*` variables.
//! 2. [`StoreSystem::new`] spawns one actor per store of record. None of them needs another,
//!    so every actor runs with an empty context.
//! 3. [`StoreSystem::collaborators`] hands the clients to a
//!    [`Storefront`](crate::engine::Storefront).
//!
//! ## Shutdown
//!
//! Actors stop when the last client of their channel is dropped. Drop the storefront (and
//! any other collaborator bundle) first, then call [`StoreSystem::shutdown`], which drops the
//! system's own clients and awaits every actor task.
//!
//! Tracing is set up once by the binary with
//! [`setup_tracing`](actor_framework::tracing::setup_tracing).

pub mod config;
pub mod store_system;

pub use config::*;
pub use store_system::*;
