//! End-to-end checkout scenarios for the Lumen pre-order storefront.
//!
//! The tests in `tests/` drive the real [`lumen_checkout::Orchestrator`]
//! against scripted stand-ins for the two external systems (order backend,
//! payment gateway), so every state transition and side effect of a checkout
//! attempt can be asserted without a network.
//!
//! # Test Categories
//!
//! - `pricing_scenarios` - priced-cart math from configuration to summary
//! - `cart_persistence` - the durable cart slot across "page navigations"
//! - `checkout_flow` - the full state machine, happy path and failures

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use lumen_checkout::backend::{
    BackendError, CreateOrderRequest, OrderBackend, PaymentOrder, VerifiedOrder,
    VerifyPaymentRequest,
};
use lumen_checkout::cart::{Cart, CartLineItem};
use lumen_checkout::catalog::Product;
use lumen_checkout::form::{CheckoutForm, Field};
use lumen_checkout::gateway::{
    GatewayCallback, GatewayCheckout, GatewayDisplay, GatewayOutcome, PaymentGateway,
};
use lumen_core::{CurrencyCode, GatewayOrderId, GatewayPaymentId, OrderId, VariantId};
use rust_decimal::Decimal;

/// Order backend that replays scripted responses and records calls.
#[derive(Default)]
pub struct ScriptedBackend {
    create_responses: Mutex<VecDeque<Result<PaymentOrder, BackendError>>>,
    verify_responses: Mutex<VecDeque<Result<VerifiedOrder, BackendError>>>,
    create_calls: AtomicUsize,
    verify_calls: AtomicUsize,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_create(&self, response: Result<PaymentOrder, BackendError>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn script_verify(&self, response: Result<VerifiedOrder, BackendError>) {
        self.verify_responses.lock().unwrap().push_back(response);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl OrderBackend for &ScriptedBackend {
    async fn create_order(
        &self,
        _request: &CreateOrderRequest,
    ) -> Result<PaymentOrder, BackendError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted create_order call")
    }

    async fn verify_payment(
        &self,
        _request: &VerifyPaymentRequest,
    ) -> Result<VerifiedOrder, BackendError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted verify_payment call")
    }
}

/// Payment gateway that resolves with scripted outcomes and records the
/// checkouts it was invoked with.
#[derive(Default)]
pub struct ScriptedGateway {
    outcomes: Mutex<VecDeque<GatewayOutcome>>,
    invocations: Mutex<Vec<GatewayCheckout>>,
}

impl ScriptedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, outcome: GatewayOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Checkouts the orchestrator invoked the gateway with.
    pub fn invocations(&self) -> Vec<GatewayCheckout> {
        self.invocations.lock().unwrap().clone()
    }
}

impl PaymentGateway for &ScriptedGateway {
    async fn collect(&self, checkout: &GatewayCheckout) -> GatewayOutcome {
        self.invocations.lock().unwrap().push(checkout.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted gateway invocation")
    }
}

/// A standard-variant, quantity-1 configured cart.
#[must_use]
pub fn configured_cart() -> Cart {
    let product = Product::lumen_smart_glasses();
    let item = CartLineItem::configure(&product, &VariantId::new("standard"), 1).unwrap();
    Cart::single(item)
}

/// A checkout form filled with valid shopper details.
#[must_use]
pub fn filled_form() -> CheckoutForm {
    let mut form = CheckoutForm::new();
    form.set_field(Field::Email, "asha@example.com");
    form.set_field(Field::Phone, "+91 98765 43210");
    form.set_field(Field::FirstName, "Asha");
    form.set_field(Field::LastName, "Rao");
    form.set_field(Field::Address1, "14 Marine Drive");
    form.set_field(Field::City, "Mumbai");
    form.set_field(Field::State, "Maharashtra");
    form.set_field(Field::Pin, "400001");
    form
}

/// Gateway display branding used across scenarios.
#[must_use]
pub fn display() -> GatewayDisplay {
    GatewayDisplay {
        name: "Lumen".to_owned(),
        description: "Lumen Smart Glasses pre-order".to_owned(),
        theme_color: Some("#1E5BFF".to_owned()),
    }
}

/// A payment order as the backend would return it for [`configured_cart`].
#[must_use]
pub fn payment_order(amount_major: i64) -> PaymentOrder {
    PaymentOrder {
        order_id: OrderId::new("ord_internal_1"),
        gateway_order_id: GatewayOrderId::new("order_gw_1"),
        amount: Decimal::from(amount_major),
        currency: CurrencyCode::Inr,
        key_id: "rzp_test_key".to_owned(),
    }
}

/// A completion callback matching [`payment_order`].
#[must_use]
pub fn completion_callback() -> GatewayOutcome {
    GatewayOutcome::Completed(GatewayCallback {
        gateway_order_id: GatewayOrderId::new("order_gw_1"),
        gateway_payment_id: GatewayPaymentId::new("pay_1"),
        signature: "valid-signature".to_owned(),
    })
}
