//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide subscriber used by every actor and by the
//! storefront engine built on top of them.
//!
//! ## Configuration
//!
//! Compact output with the module prefix hidden (`with_target(false)`): actors log an
//! `entity_type` field instead, so a line reads `INFO Created entity_type="Order" id=ord_0000000001`.
//! Verbosity comes from `RUST_LOG`; nothing is printed when it is unset except errors.
//!
//! ```bash
//! RUST_LOG=info cargo run      # state transitions
//! RUST_LOG=debug cargo run     # full payloads once per request
//! RUST_LOG=storefront_engine=debug,actor_framework=info cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown with the final store size
//! - **Store operations**: Create, Get, List, Update, Delete and Actions
//! - **Engine transitions**: cart mutations, checkout phases, status changes
//! - **Recovered failures**: rejected payloads, unreachable collaborators, divergent writes
//!
//! A checkout at `RUST_LOG=info` looks like:
//!
//! ```text
//! INFO checkout: Payment confirmed phase=Address
//! INFO checkout: Submitting order lines=2 total=1499.00
//! INFO Created entity_type="Order" id=ord_0000000001 size=1
//! INFO checkout: Order settled order_id=ord_0000000001
//! ```

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once: later calls leave the first subscriber in place, so tests
/// and the demo binary can both call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
