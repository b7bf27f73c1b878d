//! The durable cart slot across "page navigations".
//!
//! A navigation is modeled as dropping every in-memory handle and re-opening
//! the store from the same path, the way the checkout page re-reads the slot
//! written by the product page.

#![allow(clippy::unwrap_used)]

use lumen_checkout::backend::{BackendError, VerifiedOrder};
use lumen_checkout::cart::{CartStore, FileCartStore};
use lumen_checkout::orchestrator::{CheckoutState, Orchestrator};
use lumen_checkout::CheckoutError;
use lumen_core::OrderId;
use lumen_integration_tests::{
    ScriptedBackend, ScriptedGateway, completion_callback, configured_cart, display, filled_form,
};

#[test]
fn test_cart_survives_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lumen-cart.json");

    // Product page: configure and save.
    {
        let store = FileCartStore::new(&path);
        store.save(&configured_cart()).unwrap();
    }

    // Checkout page: a brand-new store handle reads the same cart.
    let store = FileCartStore::new(&path);
    let cart = store.load().unwrap().unwrap();
    assert_eq!(cart, configured_cart());
}

#[test]
fn test_persisted_slot_is_camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lumen-cart.json");

    let store = FileCartStore::new(&path);
    store.save(&configured_cart()).unwrap();

    // The slot document stays readable by the storefront's existing tooling.
    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let item = &doc["items"][0];
    assert_eq!(item["productId"], "lumen-smart-glasses");
    assert_eq!(item["variantId"], "standard");
    assert_eq!(item["unitPrice"]["amount"], 59_999.0);
    assert_eq!(doc["currency"], "INR");
}

#[tokio::test]
async fn test_corrupt_slot_redirects_to_product_selection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lumen-cart.json");
    std::fs::write(&path, b"\xff\xfe not a cart").unwrap();

    let backend = ScriptedBackend::new();
    let gateway = ScriptedGateway::new();
    let store = FileCartStore::new(&path);

    // The corrupt slot presents as an empty cart; checkout never crashes.
    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    let state = orchestrator.submit(&mut filled_form(), "").await;
    assert!(matches!(
        state,
        CheckoutState::Failed(CheckoutError::EmptyCart)
    ));
    assert_eq!(backend.create_calls(), 0);
}

#[tokio::test]
async fn test_file_slot_cleared_only_after_verified_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lumen-cart.json");
    let store = FileCartStore::new(&path);
    store.save(&configured_cart()).unwrap();

    // First attempt: verification fails; the slot must survive.
    let backend = ScriptedBackend::new();
    backend.script_create(Ok(lumen_integration_tests::payment_order(59_999)));
    backend.script_verify(Err(BackendError::Api {
        status: 400,
        message: "Invalid payment signature".to_owned(),
    }));
    let gateway = ScriptedGateway::new();
    gateway.script(completion_callback());

    let mut orchestrator = Orchestrator::new(&backend, &gateway, &store, display());
    orchestrator.submit(&mut filled_form(), "").await;
    assert!(store.load().unwrap().is_some());

    // Second attempt: verified success consumes the slot.
    backend.script_create(Ok(lumen_integration_tests::payment_order(59_999)));
    backend.script_verify(Ok(VerifiedOrder {
        order_id: OrderId::new("ord_internal_2"),
    }));
    gateway.script(completion_callback());

    orchestrator.reset();
    let state = orchestrator.submit(&mut filled_form(), "").await;
    assert!(
        matches!(state, CheckoutState::Succeeded { order_id } if order_id.as_str() == "ord_internal_2")
    );
    assert!(store.load().unwrap().is_none());
}
