//! Order commands.
//!
//! A command is an intention to change an order. It carries the same inputs
//! as the matching method on [`Order`](super::Order) so that changes can be
//! scripted, queued or logged as data.

use serde::{Deserialize, Serialize};

use super::{AccountId, Money, ProductId};

/// A change requested against a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderCommand {
    /// Add, replace or (with quantity 0) remove a line.
    UpdateOrderLine {
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    },

    UpdateDiscount { discount: Money },

    UpdateAccount { account_id: AccountId },

    Ship,
}

impl OrderCommand {
    pub fn update_order_line(product_id: ProductId, quantity: i64, unit_price: Money) -> Self {
        OrderCommand::UpdateOrderLine {
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn update_discount(discount: Money) -> Self {
        OrderCommand::UpdateDiscount { discount }
    }

    pub fn update_account(account_id: AccountId) -> Self {
        OrderCommand::UpdateAccount { account_id }
    }

    /// Short name used in logs and metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::UpdateOrderLine { .. } => "update_order_line",
            OrderCommand::UpdateDiscount { .. } => "update_discount",
            OrderCommand::UpdateAccount { .. } => "update_account",
            OrderCommand::Ship => "ship",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        let product_id = ProductId::new();
        assert_eq!(
            OrderCommand::update_order_line(product_id, 1, Money::zero()).name(),
            "update_order_line"
        );
        assert_eq!(OrderCommand::update_discount(Money::zero()).name(), "update_discount");
        assert_eq!(OrderCommand::update_account(AccountId::new()).name(), "update_account");
        assert_eq!(OrderCommand::Ship.name(), "ship");
    }

    #[test]
    fn test_commands_parse_from_tagged_json() {
        let product_id = ProductId::new();
        let json = format!(
            r#"[
                {{"type":"update_order_line","product_id":"{product_id}","quantity":2,"unit_price":"10.00"}},
                {{"type":"update_discount","discount":"5.00"}},
                {{"type":"ship"}}
            ]"#
        );

        let commands: Vec<OrderCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            commands,
            vec![
                OrderCommand::update_order_line(product_id, 2, Money::from_cents(1000)),
                OrderCommand::update_discount(Money::from_cents(500)),
                OrderCommand::Ship,
            ]
        );
    }

    #[test]
    fn test_negative_quantity_survives_parsing() {
        let product_id = ProductId::new();
        let json = format!(
            r#"{{"type":"update_order_line","product_id":"{product_id}","quantity":-3,"unit_price":"1"}}"#
        );
        let command: OrderCommand = serde_json::from_str(&json).unwrap();
        assert!(matches!(command, OrderCommand::UpdateOrderLine { quantity: -3, .. }));
    }
}
