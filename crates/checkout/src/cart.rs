//! Priced cart snapshot and the durable single-slot cart store.
//!
//! The cart freezes its prices at configuration time. Catalog price changes
//! never retroactively alter an in-flight cart; the line item carries its own
//! `unit_price` and `compare_at_price` until checkout completes or the cart
//! is cleared.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lumen_core::{CurrencyCode, Money, ProductId, VariantId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::pricing::PricingError;

/// One priced, quantity-bearing selection awaiting checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Catalog product id.
    pub product_id: ProductId,
    /// Product display name at configuration time.
    pub name: String,
    /// Selected variant id.
    pub variant_id: VariantId,
    /// Variant display label at configuration time.
    pub variant_label: String,
    /// Units ordered; within `[1, max_quantity]` by construction.
    pub quantity: u32,
    /// Price snapshot: `base_price + variant.price_delta` at configuration
    /// time, not re-derived later.
    pub unit_price: Money,
    /// Compare-at snapshot for the savings line.
    pub compare_at_price: Money,
    /// Product image path for the order summary.
    pub image: Option<String>,
}

impl CartLineItem {
    /// Configure a line item from the catalog, snapshotting prices.
    ///
    /// Quantity is clamped into `[1, product.max_quantity]`, never rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownVariant`] for an unrecognized variant.
    pub fn configure(
        product: &Product,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Result<Self, PricingError> {
        let variant = product.variant(variant_id)?;
        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            variant_id: variant.id.clone(),
            variant_label: variant.label.clone(),
            quantity: quantity.clamp(1, product.max_quantity),
            unit_price: Money::new(
                product.base_price.amount + variant.price_delta.amount,
                product.base_price.currency,
            ),
            compare_at_price: variant.compare_at_price,
            image: Some(product.image.clone()),
        })
    }
}

/// The in-progress cart.
///
/// Modeled as a list of items for forward compatibility; the storefront
/// currently operates on a single line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items awaiting checkout.
    pub items: Vec<CartLineItem>,
    /// Cart currency; all line-item prices share it.
    pub currency: CurrencyCode,
}

impl Cart {
    /// Create a single-item cart in the item's currency.
    #[must_use]
    pub fn single(item: CartLineItem) -> Self {
        let currency = item.unit_price.currency;
        Self {
            items: vec![item],
            currency,
        }
    }

    /// The first (and currently only) line item.
    #[must_use]
    pub fn line_item(&self) -> Option<&CartLineItem> {
        self.items.first()
    }

    /// True when there is nothing to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Errors from the cart store.
///
/// Corrupt stored data is deliberately **not** an error: `load` discards it
/// and reports an empty slot, so a damaged local file never blocks checkout.
#[derive(thiserror::Error, Debug)]
pub enum CartStoreError {
    /// Filesystem read/write failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The cart could not be serialized for saving.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A durable single-slot cart store.
///
/// Lifecycle: empty, then configured via `save`, surviving a full page
/// navigation (or process restart), and consumed via `clear` only after a
/// verified successful payment. An abandoned cart stays configured
/// indefinitely; there is no TTL.
pub trait CartStore {
    /// Load the stored cart, if any.
    ///
    /// Corrupt or unparseable data is treated as an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Io`] for filesystem failures other than a
    /// missing slot.
    fn load(&self) -> Result<Option<Cart>, CartStoreError>;

    /// Persist the cart, overwriting any previous slot contents.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] if serialization or the write fails.
    fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;

    /// Empty the slot. Clearing an already-empty slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Io`] for filesystem failures.
    fn clear(&self) -> Result<(), CartStoreError>;
}

/// File-backed cart store: one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Create a store backed by the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Result<Option<Cart>, CartStoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(cart) => Ok(Some(cart)),
            Err(err) => {
                // A corrupt slot must never block the shopper; the recovery
                // is to send them back to product selection.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Discarding unparseable cart slot"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let json = serde_json::to_string(cart)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Cart saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CartStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory cart store for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slot: Mutex<Option<Cart>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with a cart.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            slot: Mutex::new(Some(cart)),
        }
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<Cart>, CartStoreError> {
        Ok(self.slot.lock().map_or(None, |slot| slot.clone()))
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(cart.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CartStoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

impl<S: CartStore + ?Sized> CartStore for &S {
    fn load(&self) -> Result<Option<Cart>, CartStoreError> {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        (**self).save(cart)
    }

    fn clear(&self) -> Result<(), CartStoreError> {
        (**self).clear()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn configured_cart() -> Cart {
        let product = Product::lumen_smart_glasses();
        let item =
            CartLineItem::configure(&product, &VariantId::new("prescription"), 2).unwrap();
        Cart::single(item)
    }

    #[test]
    fn test_configure_snapshots_prices() {
        let product = Product::lumen_smart_glasses();
        let item = CartLineItem::configure(&product, &VariantId::new("prescription"), 1).unwrap();
        assert_eq!(item.unit_price, Money::from_major(64_999));
        assert_eq!(item.compare_at_price, Money::from_major(74_999));
        assert_eq!(item.variant_label, "Prescription");
    }

    #[test]
    fn test_configure_clamps_quantity() {
        let product = Product::lumen_smart_glasses();
        let zero = CartLineItem::configure(&product, &VariantId::new("standard"), 0).unwrap();
        assert_eq!(zero.quantity, 1);
        let over = CartLineItem::configure(&product, &VariantId::new("standard"), 99).unwrap();
        assert_eq!(over.quantity, product.max_quantity);
    }

    #[test]
    fn test_configure_unknown_variant_errors() {
        let product = Product::lumen_smart_glasses();
        assert!(CartLineItem::configure(&product, &VariantId::new("nope"), 1).is_err());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path().join("cart.json"));

        assert!(store.load().unwrap().is_none());

        let cart = configured_cart();
        store.save(&cart).unwrap();
        assert_eq!(store.load().unwrap(), Some(cart));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_discards_corrupt_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, b"{not json at all").unwrap();

        let store = FileCartStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_discards_non_utf8_slot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

        // Undecodable bytes are as corrupt as bad JSON: empty slot, no error.
        let store = FileCartStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCartStore::new(dir.path().join("cart.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCartStore::new();
        assert!(store.load().unwrap().is_none());

        let cart = configured_cart();
        store.save(&cart).unwrap();
        assert_eq!(store.load().unwrap(), Some(cart));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_cart_json_shape_is_camel_case() {
        let cart = configured_cart();
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"unitPrice\""));
        assert!(json.contains("\"variantLabel\""));
        assert!(json.contains("\"compareAtPrice\""));
    }
}
