//! Checkout error taxonomy.
//!
//! Every externally-facing failure is converted into one of these categories
//! at the orchestrator boundary before it reaches the UI; raw network or SDK
//! errors are never shown to the shopper verbatim.

use std::collections::BTreeMap;

use lumen_core::OrderId;

use crate::form::Field;

/// A categorized checkout failure.
#[derive(thiserror::Error, Debug, Clone)]
pub enum CheckoutError {
    /// Field-level validation failed. User-correctable; the shopper fixes
    /// the flagged fields and resubmits. No side effect has occurred.
    #[error("please correct the highlighted fields")]
    Validation {
        /// Per-field messages for inline display.
        errors: BTreeMap<Field, String>,
    },

    /// No cart line item exists. The shopper is sent back to product
    /// selection.
    #[error("your cart is empty - go back to the product page to start an order")]
    EmptyCart,

    /// The order-creation call failed. Fully retryable; no side effect has
    /// occurred.
    #[error("{message}")]
    OrderCreation {
        /// Generic, user-facing message.
        message: String,
    },

    /// The shopper closed the gateway modal before completing. No charge
    /// occurred; safely retryable.
    #[error("payment was not completed - you can try again")]
    GatewayDismissed,

    /// The gateway reported failure before completion. No charge occurred;
    /// safely retryable.
    #[error("{message}")]
    GatewayFailed {
        /// Gateway-reported or generic message.
        message: String,
    },

    /// Signature verification failed or errored after the gateway reported
    /// completion. Money may already have been captured, so this is NOT
    /// retryable via a new payment; the shopper must contact support with
    /// the order id.
    #[error("payment verification failed")]
    Verification {
        /// The internal order id, when known. Must be surfaced to the
        /// shopper.
        order_id: Option<OrderId>,
        /// User-facing message including the support instruction.
        message: String,
    },
}

impl CheckoutError {
    /// Whether a fresh payment attempt is safe.
    ///
    /// False only for verification failures, where a retry could double
    /// charge the shopper.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Verification { .. })
    }

    /// The order id associated with the failure, if any.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        match self {
            Self::Verification { order_id, .. } => order_id.as_ref(),
            _ => None,
        }
    }
}
