//! Terminal success/error views from the orchestrator's final state.
//!
//! The presenter derives a display-ready [`PaymentResult`] from a terminal
//! [`CheckoutState`]; it holds no state of its own and nothing here is
//! persisted.

use lumen_core::{OrderId, PaymentStatus};
use serde::Serialize;

use crate::error::CheckoutError;
use crate::orchestrator::CheckoutState;

/// Display-ready outcome of a checkout attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    /// Success or error.
    pub status: PaymentStatus,
    /// Backend-assigned order id: always present on success, present on
    /// verification failures so the shopper can quote it to support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    /// User-facing message.
    pub message: String,
    /// Whether offering a "try again" action is safe.
    pub retryable: bool,
}

/// Derive the result view for a terminal state.
///
/// Returns `None` for non-terminal states; the checkout page keeps showing
/// the form (and the in-flight affordance) until the attempt terminates.
#[must_use]
pub fn present(state: &CheckoutState) -> Option<PaymentResult> {
    match state {
        CheckoutState::Succeeded { order_id } => Some(PaymentResult {
            status: PaymentStatus::Success,
            order_id: Some(order_id.clone()),
            message: format!("Your payment was successful. Your order ID is {order_id}."),
            retryable: false,
        }),
        CheckoutState::Failed(err) => Some(PaymentResult {
            status: PaymentStatus::Error,
            order_id: err.order_id().cloned(),
            message: failure_message(err),
            retryable: err.is_retryable(),
        }),
        _ => None,
    }
}

fn failure_message(err: &CheckoutError) -> String {
    match err {
        CheckoutError::Validation { .. } => {
            "Please correct the highlighted fields and try again.".to_owned()
        }
        CheckoutError::EmptyCart => {
            "Your cart is empty. Go back to the product page to start an order.".to_owned()
        }
        CheckoutError::OrderCreation { message }
        | CheckoutError::GatewayFailed { message }
        | CheckoutError::Verification { message, .. } => message.clone(),
        CheckoutError::GatewayDismissed => {
            "Payment was not completed. You can try again.".to_owned()
        }
    }
}
