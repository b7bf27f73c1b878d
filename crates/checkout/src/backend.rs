//! HTTP client for the remote order backend.
//!
//! The backend is the system of record: it prices the order server-side,
//! creates the gateway order, and performs authoritative signature
//! verification of gateway callbacks. This module only constructs requests
//! to it and validates its responses.

use lumen_core::{CurrencyCode, Email, GatewayOrderId, GatewayPaymentId, Money, OrderId, Phone, PinCode};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cart::Cart;
use crate::config::CheckoutConfig;

/// Path for order creation, relative to the backend base URL.
const CREATE_ORDER_PATH: &str = "api/payments/razorpay/create-order";

/// Path for payment verification, relative to the backend base URL.
const VERIFY_PATH: &str = "api/payments/razorpay/verify";

/// Errors that can occur when talking to the order backend.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    /// HTTP transport failed (network, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or a generic fallback.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Shopper contact details.
#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    /// Validated email address.
    pub email: Email,
    /// Validated phone number, as entered.
    pub phone: Phone,
}

/// Shopper shipping address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub country: String,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    /// Validated 6-digit PIN code.
    pub pin: PinCode,
}

/// Order-creation request body.
///
/// Carries the full cart snapshot and the raw coupon code; the backend
/// recomputes all prices server-side and ignores any client-side totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub cart: Cart,
    pub contact: Contact,
    pub shipping_address: ShippingAddress,
    pub coupon_code: String,
}

/// Backend response to order creation: the payment-order handle for one
/// checkout attempt.
///
/// Discarded on any failure; a retry creates a brand-new order rather than
/// reusing a stale handle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    /// Backend-assigned internal order id.
    pub order_id: OrderId,
    /// Gateway order handle.
    #[serde(rename = "razorpayOrderId")]
    pub gateway_order_id: GatewayOrderId,
    /// Amount in the currency's **major** unit; must be converted to minor
    /// units before invoking the gateway.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Order currency.
    pub currency: CurrencyCode,
    /// Gateway public key id; safe to expose client-side.
    pub key_id: String,
}

impl PaymentOrder {
    /// The order amount as [`Money`] in major units.
    #[must_use]
    pub const fn amount_money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}

/// Verification request body, forwarding a gateway completion callback for
/// authoritative signature verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentRequest {
    #[serde(rename = "razorpayOrderId")]
    pub gateway_order_id: GatewayOrderId,
    #[serde(rename = "razorpayPaymentId")]
    pub gateway_payment_id: GatewayPaymentId,
    #[serde(rename = "razorpaySignature")]
    pub gateway_signature: String,
    #[serde(rename = "internalOrderId")]
    pub internal_order_id: OrderId,
}

/// Backend confirmation of a verified payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedOrder {
    /// Backend-assigned order id to surface to the shopper.
    pub order_id: OrderId,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

/// The order backend's request/response contract.
///
/// The HTTP implementation is [`HttpOrderBackend`]; tests substitute mocks.
pub trait OrderBackend {
    /// Create a payment order for the cart.
    ///
    /// Safe to retry from the caller's perspective: on failure no charge has
    /// occurred and no handle is retained.
    fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> impl Future<Output = Result<PaymentOrder, BackendError>> + Send;

    /// Verify a gateway completion callback's signature.
    ///
    /// This is the sole source of truth for payment success.
    fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> impl Future<Output = Result<VerifiedOrder, BackendError>> + Send;
}

/// `reqwest`-based order backend client.
#[derive(Debug, Clone)]
pub struct HttpOrderBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpOrderBackend {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the HTTP client fails to build.
    pub fn new(config: &CheckoutConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Parse(format!("invalid endpoint {path}: {e}")))
    }

    async fn post_json<Req: Serialize + Sync, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, BackendError> {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .ok()
                .and_then(|body| body.detail.or(body.message))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned()
                });
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

impl OrderBackend for HttpOrderBackend {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<PaymentOrder, BackendError> {
        tracing::debug!(coupon = %request.coupon_code, "Creating payment order");
        self.post_json(CREATE_ORDER_PATH, request).await
    }

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<VerifiedOrder, BackendError> {
        tracing::debug!(
            gateway_order_id = %request.gateway_order_id,
            internal_order_id = %request.internal_order_id,
            "Verifying payment signature"
        );
        self.post_json(VERIFY_PATH, request).await
    }
}
