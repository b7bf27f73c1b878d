//! Static product catalog for the pre-order storefront.
//!
//! One product, defined at build time. Prices live here and nowhere else;
//! the cart snapshots them at configuration time (see [`crate::cart`]) and
//! the order backend re-derives them server-side as the canonical source.

use lumen_core::{Money, ProductId, VariantId};

use crate::pricing::PricingError;

/// A purchasable configuration of the product with its own price delta.
#[derive(Debug, Clone)]
pub struct ProductVariant {
    /// Stable variant identifier.
    pub id: VariantId,
    /// Display label (e.g., "Prescription").
    pub label: String,
    /// Short helper line shown under the variant toggle.
    pub helper_text: String,
    /// Added to the product base price.
    pub price_delta: Money,
    /// Struck-through reference price for this variant.
    pub compare_at_price: Money,
}

/// The pre-order product with its variants.
#[derive(Debug, Clone)]
pub struct Product {
    /// Stable product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// One-line description passed to the gateway's checkout display.
    pub description: String,
    /// Price of the base variant.
    pub base_price: Money,
    /// Primary product image path.
    pub image: String,
    /// Upper bound for a single line item's quantity.
    pub max_quantity: u32,
    /// All purchasable variants. Non-empty by construction.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// The Lumen Smart Glasses pre-order catalog entry.
    #[must_use]
    pub fn lumen_smart_glasses() -> Self {
        Self {
            id: ProductId::new("lumen-smart-glasses"),
            name: "Lumen Smart Glasses".to_owned(),
            description: "Lumen Smart Glasses pre-order".to_owned(),
            base_price: Money::from_major(59_999),
            image: "/lumen/hero.webp".to_owned(),
            max_quantity: 5,
            variants: vec![
                ProductVariant {
                    id: VariantId::new("standard"),
                    label: "Standard".to_owned(),
                    helper_text: "Clear lenses, ready to wear out of the box.".to_owned(),
                    price_delta: Money::from_major(0),
                    compare_at_price: Money::from_major(69_999),
                },
                ProductVariant {
                    id: VariantId::new("prescription"),
                    label: "Prescription".to_owned(),
                    helper_text: "We'll contact you by email after checkout to collect \
                                  your prescription details securely."
                        .to_owned(),
                    price_delta: Money::from_major(5_000),
                    compare_at_price: Money::from_major(74_999),
                },
            ],
        }
    }

    /// Look up a variant by id.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownVariant`] for an unrecognized id.
    /// There is deliberately no fallback variant: silently pricing an
    /// unknown selection risks mischarging the shopper.
    pub fn variant(&self, variant_id: &VariantId) -> Result<&ProductVariant, PricingError> {
        self.variants
            .iter()
            .find(|v| &v.id == variant_id)
            .ok_or_else(|| PricingError::UnknownVariant(variant_id.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_two_variants() {
        let product = Product::lumen_smart_glasses();
        assert_eq!(product.variants.len(), 2);
        assert!(product.variant(&VariantId::new("standard")).is_ok());
        assert!(product.variant(&VariantId::new("prescription")).is_ok());
    }

    #[test]
    fn test_unknown_variant_is_an_error_not_a_fallback() {
        let product = Product::lumen_smart_glasses();
        let err = product.variant(&VariantId::new("bifocal")).unwrap_err();
        assert!(matches!(err, PricingError::UnknownVariant(id) if id.as_str() == "bifocal"));
    }

    #[test]
    fn test_prescription_delta() {
        let product = Product::lumen_smart_glasses();
        let variant = product.variant(&VariantId::new("prescription")).unwrap();
        assert_eq!(variant.price_delta, Money::from_major(5_000));
        assert_eq!(variant.compare_at_price, Money::from_major(74_999));
    }
}
