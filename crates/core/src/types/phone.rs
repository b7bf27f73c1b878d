//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than a leading `+`, digits,
    /// spaces, hyphens, and parentheses.
    #[error("phone number contains invalid characters")]
    InvalidCharacters,
    /// The digit count is outside the accepted range.
    #[error("phone number must contain {min} to {max} digits")]
    DigitCount {
        /// Minimum digits.
        min: usize,
        /// Maximum digits.
        max: usize,
    },
}

/// A shopper phone number.
///
/// Accepts international formatting: an optional leading `+`, then a digit,
/// then more digits with spaces, hyphens, and parentheses as separators.
/// Validation normalizes by stripping non-digits and requires the digit
/// count to land in [`Phone::MIN_DIGITS`]..=[`Phone::MAX_DIGITS`].
///
/// The raw string is preserved as entered; the gateway prefill and the order
/// backend both receive it verbatim.
///
/// ## Examples
///
/// ```
/// use lumen_core::Phone;
///
/// assert!(Phone::parse("+91 98765 43210").is_ok());
/// assert!(Phone::parse("022 4000-1234").is_ok());
///
/// assert!(Phone::parse("12345").is_err());           // too few digits
/// assert!(Phone::parse("abcdefghij").is_err());      // not a number
/// assert!(Phone::parse("(022) 4000-1234").is_err()); // must start with a digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits after normalization.
    pub const MIN_DIGITS: usize = 10;
    /// Maximum number of digits after normalization (E.164 limit).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters outside
    /// the accepted formatting set, or normalizes to fewer than 10 or more
    /// than 15 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        // Optional leading +, then a digit, then digits with cosmetic
        // separators only.
        let rest = s.strip_prefix('+').unwrap_or(s);
        let well_formed = rest.starts_with(|c: char| c.is_ascii_digit())
            && rest
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
        if !well_formed {
            return Err(PhoneError::InvalidCharacters);
        }

        let digit_count = s.chars().filter(char::is_ascii_digit).count();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digit_count) {
            return Err(PhoneError::DigitCount {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the normalized digit string (non-digits stripped).
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_phones() {
        assert!(Phone::parse("+91 98765 43210").is_ok());
        assert!(Phone::parse("9876543210").is_ok());
        assert!(Phone::parse("022 4000-1234 56").is_ok());
        assert!(Phone::parse("+1-800-555-0100").is_ok());
    }

    #[test]
    fn test_parse_requires_leading_digit() {
        assert!(matches!(
            Phone::parse("(022) 4000-123456"),
            Err(PhoneError::InvalidCharacters)
        ));
        assert!(matches!(
            Phone::parse("+-9876543210"),
            Err(PhoneError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_parse_too_few_digits() {
        assert!(matches!(
            Phone::parse("12345"),
            Err(PhoneError::DigitCount { .. })
        ));
    }

    #[test]
    fn test_parse_too_many_digits() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::DigitCount { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(matches!(
            Phone::parse("abcdefghij"),
            Err(PhoneError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_parse_rejects_interior_plus() {
        assert!(matches!(
            Phone::parse("98+76543210"),
            Err(PhoneError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_digits_strips_formatting() {
        let phone = Phone::parse("+91 98765-43210").unwrap();
        assert_eq!(phone.digits(), "919876543210");
    }

    #[test]
    fn test_raw_string_preserved() {
        let phone = Phone::parse("+91 98765 43210").unwrap();
        assert_eq!(phone.as_str(), "+91 98765 43210");
    }
}
