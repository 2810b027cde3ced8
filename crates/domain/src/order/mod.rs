//! Order aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod snapshot;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use commands::OrderCommand;
pub use events::{
    AccountAssignedData, DiscountUpdatedData, OrderEvent, OrderLineRemovedData,
    OrderLineUpdatedData, OrderShippedData,
};
pub use snapshot::OrderSnapshot;
pub use state::OrderState;
pub use value_objects::{AccountId, MAX_QUANTITY, Money, OrderLine, ProductId};

use common::Version;
use thiserror::Error;

use crate::error::ErrorKind;

/// Errors that can occur during order operations.
///
/// Every error is raised before the order is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("Invalid quantity: {quantity} (must be between 1 and {max})", max = MAX_QUANTITY)]
    InvalidQuantity { quantity: i64 },

    #[error("Invalid unit price: {price} (must not be negative)")]
    NegativeUnitPrice { price: Money },

    #[error("Invalid discount: {discount} (must not be negative)")]
    NegativeDiscount { discount: Money },

    /// A line or order total does not fit in a decimal.
    #[error("Amount overflow while pricing the order")]
    AmountOverflow,

    /// Two lines for the same product in a restored snapshot.
    #[error("Duplicate order line for product {product_id}")]
    DuplicateLine { product_id: ProductId },

    #[error("Cannot {action}: order is already shipped")]
    AlreadyShipped { action: &'static str },

    #[error("Cannot ship an order with no lines")]
    NoLines,

    /// A restored snapshot claims to be shipped but has no lines.
    #[error("Shipped order has no lines")]
    ShippedWithoutLines,

    /// The order is at the last representable version and cannot change again.
    #[error("Order version {version} cannot advance")]
    VersionExhausted { version: Version },
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidQuantity { .. }
            | OrderError::NegativeUnitPrice { .. }
            | OrderError::NegativeDiscount { .. }
            | OrderError::AmountOverflow
            | OrderError::DuplicateLine { .. } => ErrorKind::InvalidArgument,
            OrderError::AlreadyShipped { .. }
            | OrderError::NoLines
            | OrderError::ShippedWithoutLines
            | OrderError::VersionExhausted { .. } => ErrorKind::InvalidState,
        }
    }
}
