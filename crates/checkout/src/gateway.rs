//! Seam for the external payment gateway's client flow.
//!
//! The gateway UI is out-of-process (a modal the shopper interacts with);
//! the orchestrator only constructs its invocation and listens for one of
//! two outcomes: a completion callback or a dismissal/failure. A completion
//! callback is **never** trusted at face value - it must pass backend
//! signature verification before the sale is real.

use lumen_core::{CurrencyCode, Email, GatewayOrderId, GatewayPaymentId, Phone};

/// Contact fields prefilled into the gateway's payment form.
#[derive(Debug, Clone)]
pub struct GatewayPrefill {
    /// Shopper's full name.
    pub name: String,
    /// Validated email.
    pub email: Email,
    /// Validated phone, as entered.
    pub contact: Phone,
}

/// Branding shown in the gateway modal.
#[derive(Debug, Clone)]
pub struct GatewayDisplay {
    /// Merchant display name.
    pub name: String,
    /// One-line order description.
    pub description: String,
    /// Optional theme color (hex string).
    pub theme_color: Option<String>,
}

/// One gateway invocation: everything the gateway client needs to collect
/// payment for a created order.
#[derive(Debug, Clone)]
pub struct GatewayCheckout {
    /// Gateway public key id from the payment order.
    pub key_id: String,
    /// Amount in the currency's **minor** unit (paise). The backend returns
    /// major units; conversion happens before this struct is built.
    pub amount_minor: i64,
    /// Order currency.
    pub currency: CurrencyCode,
    /// The gateway order handle being paid.
    pub gateway_order_id: GatewayOrderId,
    /// Modal branding.
    pub display: GatewayDisplay,
    /// Prefilled contact fields.
    pub prefill: GatewayPrefill,
}

/// A gateway completion callback: payment id, order id, and signature.
///
/// Forwarded verbatim to the order backend for signature verification.
#[derive(Debug, Clone)]
pub struct GatewayCallback {
    pub gateway_order_id: GatewayOrderId,
    pub gateway_payment_id: GatewayPaymentId,
    pub signature: String,
}

/// Terminal outcome of one gateway invocation.
#[derive(Debug, Clone)]
pub enum GatewayOutcome {
    /// The gateway reported completion. Money may have been captured;
    /// verification decides whether the sale is real.
    Completed(GatewayCallback),
    /// The shopper closed the modal before completing. No charge occurred;
    /// safely retryable.
    Dismissed,
    /// The gateway reported failure before completion. No charge occurred;
    /// safely retryable.
    Failed {
        /// Gateway-reported reason, if any.
        message: String,
    },
}

/// The payment gateway's client flow.
///
/// The host application supplies the real implementation (opening the
/// gateway's modal and resuming on its callbacks); tests supply scripted
/// outcomes. `collect` resolves only when the flow has terminated - there is
/// no client-imposed timeout while the modal is open, which mirrors the
/// gateway SDK's own behavior.
pub trait PaymentGateway {
    /// Run the gateway flow for one checkout and resolve with its outcome.
    fn collect(&self, checkout: &GatewayCheckout) -> impl Future<Output = GatewayOutcome> + Send;
}
