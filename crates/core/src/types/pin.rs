//! Indian postal PIN code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PinCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PinCodeError {
    /// The input string is empty.
    #[error("PIN code cannot be empty")]
    Empty,
    /// The input is not exactly six digits.
    #[error("PIN code must be exactly 6 digits")]
    WrongLength,
    /// The first digit is zero (no Indian postal zone starts with 0).
    #[error("PIN code cannot start with 0")]
    LeadingZero,
    /// The input contains non-digit characters.
    #[error("PIN code must contain only digits")]
    NonDigit,
}

/// An Indian postal PIN code: exactly six digits, first digit non-zero.
///
/// Input is trimmed before validation so copy-pasted values with stray
/// whitespace still parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PinCode(String);

impl PinCode {
    /// Required number of digits.
    pub const LENGTH: usize = 6;

    /// Parse a `PinCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, is not exactly six
    /// characters, contains a non-digit, or starts with `0`.
    pub fn parse(s: &str) -> Result<Self, PinCodeError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(PinCodeError::Empty);
        }

        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PinCodeError::NonDigit);
        }

        if trimmed.len() != Self::LENGTH {
            return Err(PinCodeError::WrongLength);
        }

        if trimmed.starts_with('0') {
            return Err(PinCodeError::LeadingZero);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the PIN code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PinCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PinCode {
    type Err = PinCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PinCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
