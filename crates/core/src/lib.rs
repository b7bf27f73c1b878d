//! Lumen Core - Shared types library.
//!
//! This crate provides common domain types used across the Lumen pre-order
//! storefront components:
//! - `checkout` - Cart, pricing, and payment-order orchestration
//! - `integration-tests` - End-to-end checkout scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, and validated
//!   contact fields (email, phone, postal PIN)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
