//! Status enums for checkout entities.

use serde::{Deserialize, Serialize};

/// Terminal status of a checkout attempt.
///
/// Drives the result presenter; never persisted beyond display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Backend-verified payment success.
    Success,
    /// Any terminal failure (validation, creation, gateway, verification).
    Error,
}

impl PaymentStatus {
    /// True for the success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::Success).expect("serialize");
        assert_eq!(json, "\"success\"");
    }

    #[test]
    fn test_is_success() {
        assert!(PaymentStatus::Success.is_success());
        assert!(!PaymentStatus::Error.is_success());
    }
}
