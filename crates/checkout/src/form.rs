//! Shopper contact and address form with field-level validation.
//!
//! Errors are per-field, never global: editing a field clears only that
//! field's error, so the shopper is never shown a stale error for a field
//! they have not touched since the last edit.

use std::collections::BTreeMap;

use lumen_core::{Email, Phone, PinCode};
use serde::Serialize;

use crate::backend::{Contact, ShippingAddress};

/// Identifies one form field; keys the per-field error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Email,
    Phone,
    FirstName,
    LastName,
    Address1,
    Address2,
    City,
    State,
    Pin,
    Country,
}

/// Shopper-entered contact and address fields.
///
/// Raw strings are kept as typed; validation parses them into the typed
/// values from `lumen-core` on demand. `address2` and the two booleans are
/// never validated.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    email: String,
    phone: String,
    first_name: String,
    last_name: String,
    address1: String,
    address2: String,
    city: String,
    state: String,
    pin: String,
    country: String,
    email_updates: bool,
    use_shipping_as_billing: bool,
    errors: BTreeMap<Field, String>,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            address1: String::new(),
            address2: String::new(),
            city: String::new(),
            state: String::new(),
            pin: String::new(),
            country: "India".to_owned(),
            email_updates: false,
            use_shipping_as_billing: true,
            errors: BTreeMap::new(),
        }
    }
}

impl CheckoutForm {
    /// An empty form with defaults (country "India", billing = shipping).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field from the shopper's input, clearing only that field's
    /// error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Address1 => self.address1 = value,
            Field::Address2 => self.address2 = value,
            Field::City => self.city = value,
            Field::State => self.state = value,
            Field::Pin => self.pin = value,
            Field::Country => self.country = value,
        }
        self.errors.remove(&field);
    }

    /// Opt in or out of marketing email updates. Never validated.
    pub const fn set_email_updates(&mut self, value: bool) {
        self.email_updates = value;
    }

    /// Whether the billing address mirrors the shipping address. Never
    /// validated.
    pub const fn set_use_shipping_as_billing(&mut self, value: bool) {
        self.use_shipping_as_billing = value;
    }

    /// Current marketing opt-in.
    #[must_use]
    pub const fn email_updates(&self) -> bool {
        self.email_updates
    }

    /// Current billing-address choice.
    #[must_use]
    pub const fn use_shipping_as_billing(&self) -> bool {
        self.use_shipping_as_billing
    }

    /// Run every field rule, repopulating the error map.
    ///
    /// Returns true when all required fields pass.
    pub fn validate_all(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        if Email::parse(&self.email).is_err() {
            errors.insert(Field::Email, "Enter a valid email address.".to_owned());
        }
        if Phone::parse(&self.phone).is_err() {
            errors.insert(Field::Phone, "Enter a valid mobile number.".to_owned());
        }
        if self.first_name.trim().is_empty() {
            errors.insert(Field::FirstName, "First name is required.".to_owned());
        }
        if self.last_name.trim().is_empty() {
            errors.insert(Field::LastName, "Last name is required.".to_owned());
        }
        if self.address1.trim().is_empty() {
            errors.insert(Field::Address1, "Address is required.".to_owned());
        }
        if self.city.trim().is_empty() {
            errors.insert(Field::City, "City is required.".to_owned());
        }
        if self.state.trim().is_empty() {
            errors.insert(Field::State, "State is required.".to_owned());
        }
        if PinCode::parse(&self.pin).is_err() {
            errors.insert(Field::Pin, "Enter a valid 6-digit PIN code.".to_owned());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Current per-field errors.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    /// True iff a cart line item exists, the error map is empty, and no
    /// submission is already in flight.
    #[must_use]
    pub fn can_submit(&self, cart_present: bool, in_flight: bool) -> bool {
        cart_present && self.errors.is_empty() && !in_flight
    }

    /// Produce the validated contact and shipping-address wire values.
    ///
    /// Runs [`validate_all`](Self::validate_all) first; returns `None` (with
    /// the error map populated) unless every required field passes.
    pub fn validated(&mut self) -> Option<(Contact, ShippingAddress)> {
        if !self.validate_all() {
            return None;
        }

        // Parses cannot fail after validate_all succeeded.
        let email = Email::parse(&self.email).ok()?;
        let phone = Phone::parse(&self.phone).ok()?;
        let pin = PinCode::parse(&self.pin).ok()?;

        let contact = Contact {
            email,
            phone,
        };
        let address2 = self.address2.trim();
        let shipping = ShippingAddress {
            country: self.country.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            address1: self.address1.trim().to_owned(),
            address2: if address2.is_empty() {
                None
            } else {
                Some(address2.to_owned())
            },
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            pin,
        };
        Some((contact, shipping))
    }
}
