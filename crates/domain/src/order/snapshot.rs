//! Serializable form of an order.

use common::{AggregateId, Version};
use serde::{Deserialize, Serialize};

use super::{AccountId, Money, OrderLine, OrderState};

/// Plain-data copy of an [`Order`](super::Order), used to persist and reload it.
///
/// A snapshot is not checked on its own; [`Order::restore`](super::Order::restore)
/// validates it and recomputes `total_amount`, which is stored here for readers
/// of the serialized form only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: AggregateId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,

    #[serde(default)]
    pub state: OrderState,

    #[serde(default)]
    pub order_lines: Vec<OrderLine>,

    #[serde(default)]
    pub discount: Money,

    #[serde(default)]
    pub total_amount: Money,

    #[serde(default)]
    pub version: Version,
}
