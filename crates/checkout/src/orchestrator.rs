//! The checkout state machine.
//!
//! One submission walks `Idle -> Validating -> CreatingOrder ->
//! AwaitingGateway -> Verifying -> Succeeded | Failed`. Illegal state
//! combinations (submitting while already failed, two in-flight orders) are
//! unrepresentable: "in flight" is a property of the state itself, not a
//! separate flag.
//!
//! The single most important invariant lives in the `Verifying` step:
//! success is defined by backend-verified signature, not by the gateway UI
//! closing successfully.

use lumen_core::OrderId;

use crate::backend::{BackendError, CreateOrderRequest, OrderBackend, VerifyPaymentRequest};
use crate::cart::{Cart, CartStore};
use crate::error::CheckoutError;
use crate::form::CheckoutForm;
use crate::gateway::{
    GatewayCheckout, GatewayDisplay, GatewayOutcome, GatewayPrefill, PaymentGateway,
};

/// Generic user-facing message for retryable creation failures.
const CREATE_FAILED_MESSAGE: &str = "Failed to create your order. Please try again.";

/// User-facing message for post-charge verification failures. The order id
/// is appended when known.
const VERIFY_FAILED_MESSAGE: &str =
    "Your payment may have been captured but could not be verified. \
     Please contact support";

/// Where one checkout attempt currently stands.
#[derive(Debug, Clone)]
pub enum CheckoutState {
    /// No attempt in progress.
    Idle,
    /// Running field validation and the cart-present check.
    Validating,
    /// Waiting on the order backend to create a payment order.
    CreatingOrder,
    /// The gateway modal is open; waiting for its callback. There is no
    /// client-side timeout here - an abandoned modal leaves the attempt in
    /// this state until the gateway flow resolves.
    AwaitingGateway,
    /// Forwarding the gateway callback to the backend for signature
    /// verification.
    Verifying,
    /// Terminal: backend-verified success. The cart slot has been cleared.
    Succeeded {
        /// Backend-assigned order id.
        order_id: OrderId,
    },
    /// Terminal for this attempt: categorized failure. Retryable failures
    /// return to `Idle` via [`Orchestrator::reset`].
    Failed(CheckoutError),
}

impl CheckoutState {
    /// True while a submission is running; gates re-entry so a double-click
    /// cannot create two payment orders for the same cart.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Validating | Self::CreatingOrder | Self::AwaitingGateway | Self::Verifying
        )
    }

    /// True for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed(_))
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::CreatingOrder => "creating_order",
            Self::AwaitingGateway => "awaiting_gateway",
            Self::Verifying => "verifying",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Drives one checkout attempt against the two external systems.
///
/// Owns the state machine; reads the cart store and the validated form,
/// creates the payment order, hands off to the gateway, and verifies the
/// callback before clearing the cart.
#[derive(Debug)]
pub struct Orchestrator<B, G, S> {
    backend: B,
    gateway: G,
    cart_store: S,
    display: GatewayDisplay,
    state: CheckoutState,
}

impl<B, G, S> Orchestrator<B, G, S>
where
    B: OrderBackend,
    G: PaymentGateway,
    S: CartStore,
{
    /// Create an orchestrator in the `Idle` state.
    pub const fn new(backend: B, gateway: G, cart_store: S, display: GatewayDisplay) -> Self {
        Self {
            backend,
            gateway,
            cart_store,
            display,
            state: CheckoutState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Return to `Idle` after a failure so the shopper can retry.
    ///
    /// A fresh attempt always re-enters at `Validating` and creates a
    /// brand-new payment order; a stale order handle is never resumed.
    pub fn reset(&mut self) {
        if matches!(self.state, CheckoutState::Failed(_)) {
            self.transition(CheckoutState::Idle);
        }
    }

    /// Run one checkout attempt from the shopper's submit action.
    ///
    /// Returns the resulting state, which is terminal unless the call was
    /// refused because an attempt is already in flight.
    pub async fn submit(&mut self, form: &mut CheckoutForm, coupon_code: &str) -> &CheckoutState {
        if self.state.is_in_flight() {
            tracing::warn!(state = self.state.name(), "Submit ignored: already in flight");
            return &self.state;
        }
        if matches!(self.state, CheckoutState::Succeeded { .. }) {
            tracing::warn!("Submit ignored: checkout already succeeded");
            return &self.state;
        }

        // VALIDATING: field rules plus cart-present. No side effects on
        // failure; the shopper corrects inline and resubmits.
        self.transition(CheckoutState::Validating);

        let cart = match self.load_cart() {
            Some(cart) => cart,
            None => {
                self.transition(CheckoutState::Failed(CheckoutError::EmptyCart));
                return &self.state;
            }
        };

        let Some((contact, shipping_address)) = form.validated() else {
            self.transition(CheckoutState::Failed(CheckoutError::Validation {
                errors: form.errors().clone(),
            }));
            return &self.state;
        };

        let prefill = GatewayPrefill {
            name: format!("{} {}", shipping_address.first_name, shipping_address.last_name),
            email: contact.email.clone(),
            contact: contact.phone.clone(),
        };

        // CREATING_ORDER: the backend prices the cart server-side and
        // returns the gateway order handle.
        self.transition(CheckoutState::CreatingOrder);
        let request = CreateOrderRequest {
            cart,
            contact,
            shipping_address,
            coupon_code: coupon_code.to_owned(),
        };
        let order = match self.backend.create_order(&request).await {
            Ok(order) => order,
            Err(err) => {
                tracing::error!(error = %err, "Order creation failed");
                self.transition(CheckoutState::Failed(CheckoutError::OrderCreation {
                    message: CREATE_FAILED_MESSAGE.to_owned(),
                }));
                return &self.state;
            }
        };

        // AWAITING_GATEWAY: the backend returns major units; the gateway
        // expects minor units. Getting this wrong undercharges 100x.
        let amount_minor = match order.amount_money().to_minor_units() {
            Ok(amount) => amount,
            Err(err) => {
                tracing::error!(error = %err, "Order amount not representable in minor units");
                self.transition(CheckoutState::Failed(CheckoutError::OrderCreation {
                    message: CREATE_FAILED_MESSAGE.to_owned(),
                }));
                return &self.state;
            }
        };

        self.transition(CheckoutState::AwaitingGateway);
        let checkout = GatewayCheckout {
            key_id: order.key_id.clone(),
            amount_minor,
            currency: order.currency,
            gateway_order_id: order.gateway_order_id.clone(),
            display: self.display.clone(),
            prefill,
        };
        let callback = match self.gateway.collect(&checkout).await {
            GatewayOutcome::Completed(callback) => callback,
            GatewayOutcome::Dismissed => {
                tracing::info!(order_id = %order.order_id, "Gateway dismissed by shopper");
                self.transition(CheckoutState::Failed(CheckoutError::GatewayDismissed));
                return &self.state;
            }
            GatewayOutcome::Failed { message } => {
                tracing::warn!(order_id = %order.order_id, %message, "Gateway reported failure");
                self.transition(CheckoutState::Failed(CheckoutError::GatewayFailed {
                    message: "Payment was not completed. You can try again.".to_owned(),
                }));
                return &self.state;
            }
        };

        // VERIFYING: the completion callback is untrusted until the backend
        // has checked its signature. Money may already be captured here, so
        // failures surface the order id instead of inviting a retry.
        self.transition(CheckoutState::Verifying);
        let verify = VerifyPaymentRequest {
            gateway_order_id: callback.gateway_order_id,
            gateway_payment_id: callback.gateway_payment_id,
            gateway_signature: callback.signature,
            internal_order_id: order.order_id.clone(),
        };
        match self.backend.verify_payment(&verify).await {
            Ok(verified) => {
                self.consume_cart(&verified.order_id);
                self.transition(CheckoutState::Succeeded {
                    order_id: verified.order_id,
                });
            }
            Err(err) => {
                tracing::error!(
                    order_id = %order.order_id,
                    error = %err,
                    "Payment verification failed after gateway completion"
                );
                self.transition(CheckoutState::Failed(CheckoutError::Verification {
                    message: verification_message(&err, &order.order_id),
                    order_id: Some(order.order_id),
                }));
            }
        }

        &self.state
    }

    /// Read the cart slot; corrupt data and read errors both present as an
    /// empty cart, sending the shopper back to product selection.
    fn load_cart(&self) -> Option<Cart> {
        let cart = match self.cart_store.load() {
            Ok(cart) => cart?,
            Err(err) => {
                tracing::warn!(error = %err, "Cart slot unreadable; treating as empty");
                return None;
            }
        };
        if cart.is_empty() { None } else { Some(cart) }
    }

    /// Clear the cart slot after verified success. The sale is already
    /// final; a failure to clear is logged, not surfaced.
    fn consume_cart(&self, order_id: &OrderId) {
        if let Err(err) = self.cart_store.clear() {
            tracing::warn!(%order_id, error = %err, "Failed to clear cart after success");
        }
    }

    fn transition(&mut self, next: CheckoutState) {
        tracing::info!(from = self.state.name(), to = next.name(), "Checkout transition");
        self.state = next;
    }
}

/// Build the support-facing verification failure message, embedding the
/// order id so the shopper has a reference even if the UI discards state.
fn verification_message(err: &BackendError, order_id: &OrderId) -> String {
    let reason = match err {
        BackendError::Api { message, .. } => message.clone(),
        BackendError::Http(_) | BackendError::Parse(_) => "verification did not complete".to_owned(),
    };
    format!("{VERIFY_FAILED_MESSAGE} with order ID {order_id}. ({reason})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_states() {
        assert!(!CheckoutState::Idle.is_in_flight());
        assert!(CheckoutState::Validating.is_in_flight());
        assert!(CheckoutState::CreatingOrder.is_in_flight());
        assert!(CheckoutState::AwaitingGateway.is_in_flight());
        assert!(CheckoutState::Verifying.is_in_flight());
        assert!(
            !CheckoutState::Succeeded {
                order_id: OrderId::new("ord_1")
            }
            .is_in_flight()
        );
        assert!(!CheckoutState::Failed(CheckoutError::GatewayDismissed).is_in_flight());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!CheckoutState::Idle.is_terminal());
        assert!(!CheckoutState::AwaitingGateway.is_terminal());
        assert!(
            CheckoutState::Succeeded {
                order_id: OrderId::new("ord_1")
            }
            .is_terminal()
        );
        assert!(CheckoutState::Failed(CheckoutError::EmptyCart).is_terminal());
    }

    #[test]
    fn test_verification_message_embeds_order_id() {
        let err = BackendError::Api {
            status: 400,
            message: "Invalid payment signature".to_owned(),
        };
        let message = verification_message(&err, &OrderId::new("ord_42"));
        assert!(message.contains("ord_42"));
        assert!(message.contains("contact support"));
        assert!(message.contains("Invalid payment signature"));
    }
}
