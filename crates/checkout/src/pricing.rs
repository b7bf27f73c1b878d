//! Pure pricing math: unit prices, line totals, coupons, and the derived
//! order summary.
//!
//! Nothing here performs I/O or holds mutable state. Apart from an unknown
//! variant id, pricing cannot fail; it only produces degenerate-but-valid
//! results (zero discount, minimum quantity).

use lumen_core::{Money, VariantId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::cart::CartLineItem;
use crate::catalog::Product;

/// Errors from price lookups.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The variant id is not in the catalog.
    #[error("unknown product variant: {0}")]
    UnknownVariant(VariantId),
}

/// Price of one unit of the given variant: base price plus the variant delta.
///
/// # Errors
///
/// Returns [`PricingError::UnknownVariant`] for an unrecognized id.
pub fn unit_price(product: &Product, variant_id: &VariantId) -> Result<Money, PricingError> {
    let variant = product.variant(variant_id)?;
    Ok(Money::new(
        product.base_price.amount + variant.price_delta.amount,
        product.base_price.currency,
    ))
}

/// Total for `quantity` units of the given variant.
///
/// Quantity is clamped to at least 1, never rejected.
///
/// # Errors
///
/// Returns [`PricingError::UnknownVariant`] for an unrecognized id.
pub fn line_total(
    product: &Product,
    variant_id: &VariantId,
    quantity: u32,
) -> Result<Money, PricingError> {
    Ok(unit_price(product, variant_id)?.times(quantity.max(1)))
}

/// Compare-at (struck-through) price for the given variant.
///
/// # Errors
///
/// Returns [`PricingError::UnknownVariant`] for an unrecognized id.
pub fn compare_at_price(product: &Product, variant_id: &VariantId) -> Result<Money, PricingError> {
    Ok(product.variant(variant_id)?.compare_at_price)
}

/// A coupon rule from the static table.
#[derive(Debug, Clone, Copy)]
enum CouponRule {
    /// Percentage off the subtotal, e.g. `0.10` for 10%.
    PercentOff(Decimal),
    /// Flat amount off, clamped at the subtotal.
    FlatOff(i64),
}

/// Static coupon table. Codes are matched after trim + uppercase.
fn coupon_rule(normalized: &str) -> Option<CouponRule> {
    match normalized {
        "LAUNCH2025" => Some(CouponRule::PercentOff(Decimal::new(10, 2))),
        "PREORDER5000" => Some(CouponRule::FlatOff(5_000)),
        _ => None,
    }
}

/// Result of applying a coupon code to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponOutcome {
    /// Discount amount; zero for unknown or empty codes.
    pub discount: Money,
    /// Subtotal minus discount; never negative.
    pub final_total: Money,
}

/// Apply a coupon code to a subtotal.
///
/// Unknown codes are a no-op (zero discount), never an error: the UI must
/// never block submission on an invalid code, it simply charges full price.
/// Percentage discounts round to the nearest whole currency unit; flat
/// discounts clamp at the subtotal so the total never goes negative.
#[must_use]
pub fn apply_coupon(subtotal: Money, coupon_code: &str) -> CouponOutcome {
    let normalized = coupon_code.trim().to_uppercase();

    let discount_amount = match coupon_rule(&normalized) {
        Some(CouponRule::PercentOff(rate)) => (subtotal.amount * rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        Some(CouponRule::FlatOff(amount)) => Decimal::from(amount).min(subtotal.amount),
        None => Decimal::ZERO,
    };

    let discount = Money::new(discount_amount, subtotal.currency);
    CouponOutcome {
        discount,
        final_total: Money::new(subtotal.amount - discount_amount, subtotal.currency),
    }
}

/// Derived order summary, recomputed on every evaluation and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Snapshotted unit price times quantity.
    pub subtotal: Money,
    /// Shipping is free for pre-orders.
    pub shipping: Money,
    /// Coupon discount, zero when no code applies.
    pub discount: Money,
    /// `subtotal + shipping - discount`.
    pub total: Money,
    /// Savings against the compare-at price, clamped at zero.
    pub total_savings: Money,
}

impl PricingBreakdown {
    /// Compute the summary for a cart line item and a raw coupon code.
    ///
    /// Uses the prices snapshotted into the line item, not the live catalog,
    /// so an in-flight cart is unaffected by catalog price changes.
    #[must_use]
    pub fn compute(item: &CartLineItem, coupon_code: &str) -> Self {
        let currency = item.unit_price.currency;
        let subtotal = item.unit_price.times(item.quantity);
        let shipping = Money::zero(currency);
        let CouponOutcome {
            discount,
            final_total,
        } = apply_coupon(subtotal, coupon_code);

        let total = Money::new(final_total.amount + shipping.amount, currency);
        let compare_at_line = item.compare_at_price.times(item.quantity);
        let savings = (compare_at_line.amount - total.amount).max(Decimal::ZERO);

        Self {
            subtotal,
            shipping,
            discount,
            total,
            total_savings: Money::new(savings, currency),
        }
    }
}
