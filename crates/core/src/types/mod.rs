//! Core types for the Lumen storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod pin;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
pub use phone::{Phone, PhoneError};
pub use pin::{PinCode, PinCodeError};
pub use status::PaymentStatus;
