//! Value objects for the order domain.

use std::str::FromStr;

use common::IdParseError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OrderError;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s.trim())
                    .map(Self)
                    .map_err(|e| IdParseError {
                        kind: $kind,
                        reason: e.to_string(),
                    })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_identifier!(
    /// Identifier of a product, issued by the catalogue.
    ProductId,
    "product"
);

uuid_identifier!(
    /// Reference to an `Account` aggregate.
    ///
    /// Orders hold this identity only, never the account itself.
    AccountId,
    "account"
);

/// Monetary amount with exact decimal precision.
///
/// Serialized as a decimal string (`"10.00"`) so no float ever touches a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from a whole number of cents (e.g., 1000 = $10.00).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Price of `quantity` units at this unit price.
    pub fn checked_mul_quantity(&self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(Decimal::from(quantity)).map(Money)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.abs();
        if abs.scale() < 2 {
            write!(f, "{sign}${abs:.2}")
        } else {
            write!(f, "{sign}${abs}")
        }
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

// Operators panic on overflow, as `Decimal`'s do. Order arithmetic goes
// through the `checked_*` methods.
impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Largest quantity a single order line can carry.
pub const MAX_QUANTITY: i64 = u32::MAX as i64;

/// One product on an order: how many, at what unit price.
///
/// Immutable once built. A line with zero quantity cannot exist; the order
/// represents it by not having the line at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOrderLine")]
pub struct OrderLine {
    product_id: ProductId,
    quantity: u32,
    unit_price: Money,
    line_total: Money,
}

impl OrderLine {
    /// Builds a line, rejecting non-positive quantities, negative prices and
    /// totals that cannot be represented.
    pub fn new(product_id: ProductId, quantity: i64, unit_price: Money) -> Result<Self, OrderError> {
        if quantity <= 0 || quantity > MAX_QUANTITY {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        if unit_price.is_negative() {
            return Err(OrderError::NegativeUnitPrice { price: unit_price });
        }

        let quantity = quantity as u32;
        let line_total = unit_price
            .checked_mul_quantity(quantity)
            .ok_or(OrderError::AmountOverflow)?;

        Ok(Self {
            product_id,
            quantity,
            unit_price,
            line_total,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price × quantity`.
    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

#[derive(Deserialize)]
struct RawOrderLine {
    product_id: ProductId,
    quantity: i64,
    unit_price: Money,
}

impl TryFrom<RawOrderLine> for OrderLine {
    type Error = OrderError;

    fn try_from(raw: RawOrderLine) -> Result<Self, Self::Error> {
        OrderLine::new(raw.product_id, raw.quantity, raw.unit_price)
    }
}
