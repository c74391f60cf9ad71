//! Basic Types
//!
//! Naming conventions:
//! - `_id` suffix: Primary key identifiers
//! - Money values are integer minor units (paise); rates are basis points
//!
//! Identifiers are string newtypes so the different entity keys are not
//! interchangeable at compile time.

use crate::error::{ChitError, ChitResult};
use serde::{Deserialize, Serialize};

// ============================================================
// ID Types (newtype pattern, non-interchangeable)
// ============================================================

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// End-user identifier (owned by the auth collaborator)
    UserId
);
string_id!(
    /// Scheme identifier
    SchemeId
);
string_id!(
    /// Card (subscription instrument) identifier
    CardId
);
string_id!(
    /// Payment record identifier
    PaymentId
);
string_id!(
    /// Commission entry identifier
    EntryId
);
string_id!(
    /// Winner record identifier
    WinnerId
);

// ============================================================
// Money (integer minor units)
// ============================================================

/// Monetary amount in integer minor units (paise).
///
/// Fixed-point by construction: there is no fractional representation, so
/// repeated small credits cannot accumulate rounding drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create from minor units (paise)
    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Raw minor units
    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition
    pub fn checked_add(self, other: Money) -> ChitResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| ChitError::InvalidAmount {
                reason: format!("amount overflow adding {} to {}", other, self),
            })
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Money) -> ChitResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| ChitError::InvalidAmount {
                reason: format!("amount underflow subtracting {} from {}", other, self),
            })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// ============================================================
// Basis Points
// ============================================================

/// Rate expressed in basis points (1 bps = 0.01%)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(pub u32);

impl BasisPoints {
    pub const SCALE: i128 = 10_000;

    pub fn new(bps: u32) -> Self {
        Self(bps)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Apply this rate to an amount, truncating toward zero.
    ///
    /// The intermediate product is computed in i128 so `amount * bps` cannot
    /// overflow for any representable `Money`.
    pub fn apply_to(&self, amount: Money) -> Money {
        let product = amount.0 as i128 * self.0 as i128 / Self::SCALE;
        Money(product as i64)
    }
}

impl std::fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_minor(100_000).to_string(), "1000.00");
        assert_eq!(Money::from_minor(150).to_string(), "1.50");
        assert_eq!(Money::from_minor(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_money_checked_add_overflow() {
        let max = Money::from_minor(i64::MAX);
        assert!(max.checked_add(Money::from_minor(1)).is_err());
        assert_eq!(
            Money::from_minor(100).checked_add(Money::from_minor(50)).unwrap(),
            Money::from_minor(150)
        );
    }

    #[test]
    fn test_basis_points_apply() {
        // 5% of 1000.00 = 50.00
        let rate = BasisPoints::new(500);
        assert_eq!(rate.apply_to(Money::from_minor(100_000)), Money::from_minor(5_000));
        // 2% of 1000.00 = 20.00
        let rate = BasisPoints::new(200);
        assert_eq!(rate.apply_to(Money::from_minor(100_000)), Money::from_minor(2_000));
    }

    #[test]
    fn test_basis_points_truncate() {
        // 1bps of 0.99 truncates to zero
        let rate = BasisPoints::new(1);
        assert_eq!(rate.apply_to(Money::from_minor(99)), Money::ZERO);
    }

    #[test]
    fn test_card_id_creation() {
        let id = CardId::new("card_0001");
        assert_eq!(id.as_str(), "card_0001");
        assert_eq!(id.to_string(), "card_0001");
    }
}
