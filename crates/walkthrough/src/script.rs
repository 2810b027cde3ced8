//! Command scripts and their replay against a single order.

use std::path::Path;

use common::AggregateId;
use domain::{
    AggregateRoot, ErrorKind, Money, Order, OrderCommand, OrderEvent, OrderSnapshot, ProductId,
};
use serde::{Deserialize, Serialize};

use crate::error::WalkthroughError;

/// A sequence of commands to apply to one order.
///
/// ```json
/// {
///   "order_id": "6f1c...",
///   "commands": [
///     { "type": "update_order_line", "product_id": "...", "quantity": 2, "unit_price": "10.00" },
///     { "type": "ship" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Order to create; a fresh id is generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<AggregateId>,
    pub commands: Vec<OrderCommand>,
}

impl Script {
    pub fn new(commands: Vec<OrderCommand>) -> Self {
        Self {
            order_id: None,
            commands,
        }
    }

    /// Parses a script from JSON text.
    pub fn parse(json: &str) -> Result<Self, WalkthroughError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WalkthroughError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WalkthroughError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json)
    }

    /// Add a line, raise its quantity, discount, ship, then try to change the shipped order.
    pub fn builtin() -> Self {
        let p1 = ProductId::new();
        let p2 = ProductId::new();
        Self::new(vec![
            OrderCommand::update_order_line(p1, 2, Money::from_cents(1000)),
            OrderCommand::update_order_line(p1, 3, Money::from_cents(1000)),
            OrderCommand::update_discount(Money::from_cents(500)),
            OrderCommand::Ship,
            OrderCommand::update_order_line(p2, 1, Money::from_cents(500)),
        ])
    }
}

/// Result of one command in a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub command: &'static str,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Order total after the step.
    pub total_amount: Money,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<StepOutcome>,
    pub events: Vec<OrderEvent>,
    pub order: OrderSnapshot,
}

impl Report {
    pub fn accepted(&self) -> usize {
        self.steps.iter().filter(|step| step.accepted).count()
    }

    pub fn rejected(&self) -> usize {
        self.steps.len() - self.accepted()
    }
}

/// Applies every command in order. Rejected commands are recorded and skipped.
#[tracing::instrument(skip(script), fields(commands = script.commands.len()))]
pub fn run(script: Script) -> Report {
    let mut order = Order::create(script.order_id.unwrap_or_default());
    let mut steps = Vec::with_capacity(script.commands.len());
    let mut events = Vec::new();

    for (index, command) in script.commands.into_iter().enumerate() {
        let name = command.name();
        let outcome = order.execute(command);
        events.extend(order.take_events());

        let step = match outcome {
            Ok(()) => {
                tracing::info!(step = index, command = name, total = %order.total_amount(), "command accepted");
                StepOutcome {
                    index,
                    command: name,
                    accepted: true,
                    error_kind: None,
                    error: None,
                    total_amount: order.total_amount(),
                }
            }
            Err(err) => {
                tracing::warn!(step = index, command = name, kind = %err.kind(), error = %err, "command rejected");
                StepOutcome {
                    index,
                    command: name,
                    accepted: false,
                    error_kind: Some(err.kind()),
                    error: Some(err.to_string()),
                    total_amount: order.total_amount(),
                }
            }
        };
        steps.push(step);
    }

    tracing::info!(
        order_id = %order.id(),
        state = %order.state(),
        version = %AggregateRoot::version(&order),
        total = %order.total_amount(),
        "walkthrough finished"
    );

    Report {
        steps,
        events,
        order: order.snapshot(),
    }
}
