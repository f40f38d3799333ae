//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber used by the binary.
//!
//! ## Configuration
//!
//! Verbosity comes from `RUST_LOG`. The output is compact and hides the module
//! prefix (`with_target(false)`); stores identify themselves with a `state_type`
//! field instead.
//!
//! ```bash
//! # Store lifecycle, cart changes, submitted orders
//! RUST_LOG=info pizza_order demo --offline
//!
//! # Every dispatched action and the full order payloads
//! RUST_LOG=debug pizza_order demo --offline
//!
//! # Only the HTTP services
//! RUST_LOG=pizza_order::services=debug pizza_order menu
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Actor started` / `Shutdown` per store
//! - **Store actions**: `Dispatch action=Add(..)`, then `Action ok` or `Action failed`
//! - **Flows**: submitted and rejected forms, loaded orders, priority upgrades
//! - **Address lookup**: position acquired, address fetched or lookup failed
//!
//! With `RUST_LOG=debug` the flows log their full input once on entry:
//!
//! ```text
//! DEBUG submit_order called form=OrderForm { customer: "Ada", .. }
//! INFO submit_order: Order created order_id=ORD1
//! INFO submit_order: Order submitted order_id=ORD1 priority=true
//! INFO Cart cleared
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
