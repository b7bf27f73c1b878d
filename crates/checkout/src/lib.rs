//! Lumen Checkout - cart, pricing, and payment-order orchestration.
//!
//! This crate turns a configured product selection into a priced cart,
//! persists it across a page transition, creates a payment order with the
//! remote order backend, hands off to the external payment gateway, and
//! verifies the gateway's callback with the backend before considering the
//! sale final.
//!
//! # Architecture
//!
//! - [`catalog`] / [`pricing`] - static product catalog and pure pricing math
//! - [`cart`] - priced cart snapshot and the durable single-slot cart store
//! - [`form`] - shopper contact/address form with field-level validation
//! - [`backend`] - HTTP client for the remote order backend
//! - [`gateway`] - seam for the external payment gateway's client flow
//! - [`orchestrator`] - the checkout state machine tying it all together
//! - [`presenter`] - terminal success/error views from the final state
//!
//! The two external systems (order backend, payment gateway) sit behind the
//! [`backend::OrderBackend`] and [`gateway::PaymentGateway`] traits so hosts
//! and tests can swap in their own implementations.
//!
//! # Security
//!
//! This subsystem never sees the gateway key secret and never decides payment
//! success on its own: a gateway completion callback is only trusted after
//! the order backend has verified its cryptographic signature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod orchestrator;
pub mod presenter;
pub mod pricing;

pub use error::CheckoutError;
pub use orchestrator::{CheckoutState, Orchestrator};
pub use presenter::PaymentResult;

/// Initialize tracing with `EnvFilter` for hosts that have no subscriber of
/// their own. Defaults to info level for this crate if `RUST_LOG` is not set.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lumen_checkout=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
