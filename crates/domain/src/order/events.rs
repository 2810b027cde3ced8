//! Order domain events.
//!
//! The aggregate only records these; draining and dispatching them is up to
//! whoever loaded the order.

use chrono::{DateTime, Utc};
use common::{AggregateId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{AccountId, Money, OrderLine, ProductId};

/// Events that can occur on an order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// A line was added or replaced.
    OrderLineUpdated(OrderLineUpdatedData),

    /// A line was removed by setting its quantity to zero.
    OrderLineRemoved(OrderLineRemovedData),

    /// The discount changed.
    DiscountUpdated(DiscountUpdatedData),

    /// The order was linked to an account.
    AccountAssigned(AccountAssignedData),

    /// The order shipped.
    OrderShipped(OrderShippedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderLineUpdated(_) => "OrderLineUpdated",
            OrderEvent::OrderLineRemoved(_) => "OrderLineRemoved",
            OrderEvent::DiscountUpdated(_) => "DiscountUpdated",
            OrderEvent::AccountAssigned(_) => "AccountAssigned",
            OrderEvent::OrderShipped(_) => "OrderShipped",
        }
    }
}

impl OrderEvent {
    /// Order the event belongs to.
    pub fn order_id(&self) -> AggregateId {
        match self {
            OrderEvent::OrderLineUpdated(e) => e.order_id,
            OrderEvent::OrderLineRemoved(e) => e.order_id,
            OrderEvent::DiscountUpdated(e) => e.order_id,
            OrderEvent::AccountAssigned(e) => e.order_id,
            OrderEvent::OrderShipped(e) => e.order_id,
        }
    }

    /// Aggregate version produced by the change.
    pub fn version(&self) -> Version {
        match self {
            OrderEvent::OrderLineUpdated(e) => e.version,
            OrderEvent::OrderLineRemoved(e) => e.version,
            OrderEvent::DiscountUpdated(e) => e.version,
            OrderEvent::AccountAssigned(e) => e.version,
            OrderEvent::OrderShipped(e) => e.version,
        }
    }
}

/// Data for OrderLineUpdated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineUpdatedData {
    pub order_id: AggregateId,
    pub version: Version,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,

    /// Order total after the change.
    pub total_amount: Money,
}

/// Data for OrderLineRemoved event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRemovedData {
    pub order_id: AggregateId,
    pub version: Version,
    pub product_id: ProductId,
    pub total_amount: Money,
}

/// Data for DiscountUpdated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountUpdatedData {
    pub order_id: AggregateId,
    pub version: Version,
    pub discount: Money,
    pub total_amount: Money,
}

/// Data for AccountAssigned event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAssignedData {
    pub order_id: AggregateId,
    pub version: Version,
    pub account_id: AccountId,
}

/// Data for OrderShipped event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShippedData {
    pub order_id: AggregateId,
    pub version: Version,

    /// When the order shipped.
    pub shipped_at: DateTime<Utc>,

    /// Final amount charged.
    pub total_amount: Money,

    /// Number of lines shipped.
    pub line_count: usize,
}

// Convenience constructors for events
impl OrderEvent {
    pub fn order_line_updated(
        order_id: AggregateId,
        version: Version,
        line: &OrderLine,
        total_amount: Money,
    ) -> Self {
        OrderEvent::OrderLineUpdated(OrderLineUpdatedData {
            order_id,
            version,
            product_id: line.product_id(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            total_amount,
        })
    }

    pub fn order_line_removed(
        order_id: AggregateId,
        version: Version,
        product_id: ProductId,
        total_amount: Money,
    ) -> Self {
        OrderEvent::OrderLineRemoved(OrderLineRemovedData {
            order_id,
            version,
            product_id,
            total_amount,
        })
    }

    pub fn discount_updated(
        order_id: AggregateId,
        version: Version,
        discount: Money,
        total_amount: Money,
    ) -> Self {
        OrderEvent::DiscountUpdated(DiscountUpdatedData {
            order_id,
            version,
            discount,
            total_amount,
        })
    }

    pub fn account_assigned(order_id: AggregateId, version: Version, account_id: AccountId) -> Self {
        OrderEvent::AccountAssigned(AccountAssignedData {
            order_id,
            version,
            account_id,
        })
    }

    pub fn order_shipped(
        order_id: AggregateId,
        version: Version,
        total_amount: Money,
        line_count: usize,
    ) -> Self {
        OrderEvent::OrderShipped(OrderShippedData {
            order_id,
            version,
            shipped_at: Utc::now(),
            total_amount,
            line_count,
        })
    }
}
