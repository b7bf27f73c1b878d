//! End-to-end checkout state machine scenarios.
//!
//! Each test drives the real orchestrator with scripted backend/gateway
//! stand-ins and asserts both the terminal state and the cart-slot side
//! effect (cleared only after backend-verified success).

#![allow(clippy::unwrap_used)]

use lumen_checkout::backend::{BackendError, VerifiedOrder};
use lumen_checkout::cart::{CartStore, MemoryCartStore};
use lumen_checkout::gateway::GatewayOutcome;
use lumen_checkout::orchestrator::{CheckoutState, Orchestrator};
use lumen_checkout::{CheckoutError, presenter};
use lumen_core::OrderId;
use lumen_integration_tests::{
    ScriptedBackend, ScriptedGateway, completion_callback, configured_cart, display, filled_form,
    payment_order,
};

#[tokio::test]
async fn test_happy_path_clears_cart_and_surfaces_order_id() {
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(payment_order(59_999)));
    backend.script_verify(Ok(VerifiedOrder {
        order_id: OrderId::new("ord_internal_1"),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let mut form = filled_form();

    let state = orchestrator.submit(&mut form, "").await;
    assert!(
        matches!(state, CheckoutState::Succeeded { order_id } if order_id.as_str() == "ord_internal_1")
    );

    // Verified success consumes the cart.
    assert!(store.load().unwrap().is_none());
    assert_eq!(backend.create_calls(), 1);
    assert_eq!(backend.verify_calls(), 1);

    let result = presenter::present(orchestrator.state()).unwrap();
    assert!(result.status.is_success());
    assert!(result.message.contains("ord_internal_1"));
}

#[tokio::test]
async fn test_gateway_receives_minor_units_and_prefill() {
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(payment_order(59_999)));
    backend.script_verify(Ok(VerifiedOrder {
        order_id: OrderId::new("ord_internal_1"),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    orchestrator.submit(&mut filled_form(), "").await;

    let invocations = gateway.invocations();
    assert_eq!(invocations.len(), 1);
    let checkout = invocations.first().unwrap();
    // Backend returned 59,999 rupees; the gateway must see paise.
    assert_eq!(checkout.amount_minor, 5_999_900);
    assert_eq!(checkout.key_id, "rzp_test_key");
    assert_eq!(checkout.prefill.name, "Asha Rao");
    assert_eq!(checkout.prefill.email.as_str(), "asha@example.com");
}

#[tokio::test]
async fn test_creation_failure_is_retryable_and_keeps_cart() {
    let backend = ScriptedBackend::new();
    backend.script_create(Err(BackendError::Api {
        status: 500,
        message: "Internal Server Error".to_owned(),
    }));
    let gateway = ScriptedGateway::new();
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let state = orchestrator.submit(&mut filled_form(), "").await;

    let CheckoutState::Failed(err) = state else {
        panic!("expected failure, got {state:?}");
    };
    assert!(matches!(err, CheckoutError::OrderCreation { .. }));
    assert!(err.is_retryable());

    // No charge occurred and the cart survives for the retry.
    assert!(store.load().unwrap().is_some());
    assert!(gateway.invocations().is_empty());
}

#[tokio::test]
async fn test_gateway_dismissal_is_retryable_and_keeps_cart() {
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(payment_order(59_999)));
    let gateway = ScriptedGateway::new();
    gateway.script(GatewayOutcome::Dismissed);
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let state = orchestrator.submit(&mut filled_form(), "").await;

    assert!(matches!(
        state,
        CheckoutState::Failed(CheckoutError::GatewayDismissed)
    ));
    assert!(store.load().unwrap().is_some());
    // The callback never fired, so verification must not have been called.
    assert_eq!(backend.verify_calls(), 0);
}

#[tokio::test]
async fn test_verification_failure_surfaces_order_id_and_keeps_cart() {
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(payment_order(59_999)));
    backend.script_verify(Err(BackendError::Api {
        status: 400,
        message: "Invalid payment signature".to_owned(),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let state = orchestrator.submit(&mut filled_form(), "").await;

    let CheckoutState::Failed(err) = state else {
        panic!("expected failure, got {state:?}");
    };
    // Money may be captured: not retryable, order id surfaced for support.
    assert!(!err.is_retryable());
    assert_eq!(err.order_id().map(OrderId::as_str), Some("ord_internal_1"));

    let result = presenter::present(orchestrator.state()).unwrap();
    assert!(result.message.contains("ord_internal_1"));
    assert!(result.message.contains("contact support"));

    // The shopper keeps a record of what was attempted.
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_validation_failure_has_no_side_effects() {
    let backend = ScriptedBackend::new();
    let gateway = ScriptedGateway::new();
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let mut form = filled_form();
    form.set_field(lumen_checkout::form::Field::Pin, "012345");

    let state = orchestrator.submit(&mut form, "").await;
    let CheckoutState::Failed(CheckoutError::Validation { errors }) = state else {
        panic!("expected validation failure, got {state:?}");
    };
    assert!(errors.contains_key(&lumen_checkout::form::Field::Pin));

    // Nothing was called and nothing was persisted or cleared.
    assert_eq!(backend.create_calls(), 0);
    assert!(gateway.invocations().is_empty());
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_empty_cart_fails_before_any_network_call() {
    let backend = ScriptedBackend::new();
    let gateway = ScriptedGateway::new();
    let store = MemoryCartStore::new();

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let state = orchestrator.submit(&mut filled_form(), "").await;

    assert!(matches!(
        state,
        CheckoutState::Failed(CheckoutError::EmptyCart)
    ));
    assert_eq!(backend.create_calls(), 0);
}

#[tokio::test]
async fn test_retry_after_failure_creates_a_fresh_order() {
    let backend = ScriptedBackend::new();
    backend.script_create(Err(BackendError::Api {
        status: 503,
        message: "Service Unavailable".to_owned(),
    }));
    backend.script_create(Ok(payment_order(59_999)));
    backend.script_verify(Ok(VerifiedOrder {
        order_id: OrderId::new("ord_internal_1"),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let mut form = filled_form();

    let first = orchestrator.submit(&mut form, "").await;
    assert!(matches!(first, CheckoutState::Failed(_)));

    orchestrator.reset();
    assert!(matches!(orchestrator.state(), CheckoutState::Idle));

    let second = orchestrator.submit(&mut form, "").await;
    assert!(matches!(second, CheckoutState::Succeeded { .. }));
    // Two creation calls: the retry never reuses the failed attempt's handle.
    assert_eq!(backend.create_calls(), 2);
}

#[tokio::test]
async fn test_submit_after_success_is_refused() {
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(payment_order(59_999)));
    backend.script_verify(Ok(VerifiedOrder {
        order_id: OrderId::new("ord_internal_1"),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());
    let store = MemoryCartStore::with_cart(configured_cart());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let mut form = filled_form();

    orchestrator.submit(&mut form, "").await;
    assert!(matches!(
        orchestrator.state(),
        CheckoutState::Succeeded { .. }
    ));

    // A second submit must not create another payment order.
    orchestrator.submit(&mut form, "").await;
    assert_eq!(backend.create_calls(), 1);
}
