//! Order domain.
//!
//! This crate provides:
//! - `AggregateRoot` and `DomainEvent` traits
//! - The `Order` aggregate, which guards its own invariants on every change
//! - Value objects (`Money`, `OrderLine`, identifiers), lifecycle state,
//!   commands and the events an order records

pub mod aggregate;
pub mod error;
pub mod order;

pub use aggregate::{AggregateRoot, DomainEvent};
pub use error::ErrorKind;
pub use order::{
    AccountAssignedData, AccountId, DiscountUpdatedData, MAX_QUANTITY, Money, Order,
    OrderCommand, OrderError, OrderEvent, OrderLine, OrderLineRemovedData, OrderLineUpdatedData,
    OrderShippedData, OrderSnapshot, OrderState, ProductId,
};
