//! Order aggregate implementation.

use common::{AggregateId, Version};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateRoot;

use super::{
    AccountId, Money, OrderCommand, OrderError, OrderEvent, OrderLine, OrderSnapshot, OrderState,
    ProductId,
};

/// Order aggregate root.
///
/// Owns the order's lines, discount, account reference and shipping state,
/// and is the only way to change any of them. Invariants held after every
/// call, successful or not:
///
/// - at most one line per product, in insertion order
/// - every line has a positive quantity
/// - `total_amount == Σ(unit_price × quantity) − discount`
/// - `discount >= 0`
/// - a shipped order has at least one line and never changes again
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "OrderSnapshot", try_from = "OrderSnapshot")]
pub struct Order {
    id: AggregateId,

    /// Identity of the owning account; the account itself lives elsewhere.
    account_id: Option<AccountId>,

    state: OrderState,

    order_lines: Vec<OrderLine>,

    discount: Money,

    /// Recomputed from scratch by every change, together with `total_amount`.
    subtotal: Money,

    total_amount: Money,

    version: Version,

    pending_events: Vec<OrderEvent>,
}

impl AggregateRoot for Order {
    type Event = OrderEvent;
    type Error = OrderError;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> AggregateId {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn take_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> AggregateId {
        self.id
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn is_shipped(&self) -> bool {
        self.state == OrderState::Shipped
    }

    /// Lines in the order they were first added. Read-only.
    pub fn order_lines(&self) -> &[OrderLine] {
        &self.order_lines
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&OrderLine> {
        self.order_lines
            .iter()
            .find(|line| line.product_id() == *product_id)
    }

    pub fn line_count(&self) -> usize {
        self.order_lines.len()
    }

    pub fn has_lines(&self) -> bool {
        !self.order_lines.is_empty()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.order_lines
            .iter()
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Sum of line totals before the discount.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Subtotal minus discount. May be negative when the discount is larger
    /// than the subtotal.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Events recorded since the last [`take_events`](AggregateRoot::take_events).
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.pending_events
    }
}

// Command methods
impl Order {
    /// Creates an empty, open order with the given identity.
    pub fn create(id: AggregateId) -> Self {
        metrics::counter!("orders_created_total").increment(1);
        tracing::debug!(order_id = %id, "order created");

        Self {
            id,
            account_id: None,
            state: OrderState::Open,
            order_lines: Vec::new(),
            discount: Money::zero(),
            subtotal: Money::zero(),
            total_amount: Money::zero(),
            version: Version::initial(),
            pending_events: Vec::new(),
        }
    }

    /// Sets the line for `product_id` to `quantity` units at `unit_price`.
    ///
    /// A quantity of zero removes the line; removing a product that is not on
    /// the order is a no-op. An existing line is replaced where it stands, a new
    /// one is appended.
    #[tracing::instrument(skip(self), fields(order_id = %self.id))]
    pub fn update_order_line(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    ) -> Result<(), OrderError> {
        self.ensure_modifiable("update order line").map_err(rejected)?;

        if quantity == 0 {
            return self.remove_order_line(product_id);
        }

        let line = OrderLine::new(product_id, quantity, unit_price).map_err(rejected)?;

        let mut order_lines = self.order_lines.clone();
        match order_lines
            .iter()
            .position(|existing| existing.product_id() == product_id)
        {
            Some(index) => order_lines[index] = line.clone(),
            None => order_lines.push(line.clone()),
        }
        let (subtotal, total_amount) =
            calculate_totals(&order_lines, self.discount).map_err(rejected)?;
        let version = self.next_version().map_err(rejected)?;

        self.order_lines = order_lines;
        self.subtotal = subtotal;
        self.total_amount = total_amount;
        self.version = version;
        self.pending_events.push(OrderEvent::order_line_updated(
            self.id,
            self.version,
            &line,
            total_amount,
        ));

        metrics::counter!("order_lines_updated_total").increment(1);
        tracing::debug!(
            %product_id,
            quantity = line.quantity(),
            unit_price = %line.unit_price(),
            total_amount = %total_amount,
            "order line updated"
        );
        Ok(())
    }

    fn remove_order_line(&mut self, product_id: ProductId) -> Result<(), OrderError> {
        let Some(index) = self
            .order_lines
            .iter()
            .position(|line| line.product_id() == product_id)
        else {
            (self.subtotal, self.total_amount) =
                calculate_totals(&self.order_lines, self.discount).map_err(rejected)?;
            tracing::debug!(%product_id, "no line to remove");
            return Ok(());
        };

        let mut order_lines = self.order_lines.clone();
        order_lines.remove(index);
        let (subtotal, total_amount) =
            calculate_totals(&order_lines, self.discount).map_err(rejected)?;
        let version = self.next_version().map_err(rejected)?;

        self.order_lines = order_lines;
        self.subtotal = subtotal;
        self.total_amount = total_amount;
        self.version = version;
        self.pending_events.push(OrderEvent::order_line_removed(
            self.id,
            self.version,
            product_id,
            total_amount,
        ));

        metrics::counter!("order_lines_removed_total").increment(1);
        tracing::debug!(%product_id, total_amount = %total_amount, "order line removed");
        Ok(())
    }

    /// Replaces the discount applied to the order.
    #[tracing::instrument(skip(self), fields(order_id = %self.id))]
    pub fn update_discount(&mut self, discount: Money) -> Result<(), OrderError> {
        if discount.is_negative() {
            return Err(rejected(OrderError::NegativeDiscount { discount }));
        }
        self.ensure_modifiable("update discount").map_err(rejected)?;

        let (subtotal, total_amount) =
            calculate_totals(&self.order_lines, discount).map_err(rejected)?;
        let version = self.next_version().map_err(rejected)?;

        self.discount = discount;
        self.subtotal = subtotal;
        self.total_amount = total_amount;
        self.version = version;
        self.pending_events.push(OrderEvent::discount_updated(
            self.id,
            self.version,
            discount,
            total_amount,
        ));

        tracing::debug!(%discount, total_amount = %total_amount, "discount updated");
        Ok(())
    }

    /// Links the order to an account by identity.
    #[tracing::instrument(skip(self), fields(order_id = %self.id))]
    pub fn update_account(&mut self, account_id: AccountId) -> Result<(), OrderError> {
        self.ensure_modifiable("update account").map_err(rejected)?;
        let version = self.next_version().map_err(rejected)?;

        self.account_id = Some(account_id);
        self.version = version;
        self.pending_events.push(OrderEvent::account_assigned(
            self.id,
            self.version,
            account_id,
        ));

        tracing::debug!(%account_id, "account assigned");
        Ok(())
    }

    /// Ships the order. Only an open order with at least one line can ship,
    /// and only once.
    #[tracing::instrument(skip(self), fields(order_id = %self.id))]
    pub fn ship(&mut self) -> Result<(), OrderError> {
        if !self.state.can_ship() {
            return Err(rejected(OrderError::AlreadyShipped { action: "ship" }));
        }
        if !self.has_lines() {
            return Err(rejected(OrderError::NoLines));
        }
        let version = self.next_version().map_err(rejected)?;

        self.state = OrderState::Shipped;
        self.version = version;
        self.pending_events.push(OrderEvent::order_shipped(
            self.id,
            self.version,
            self.total_amount,
            self.order_lines.len(),
        ));

        metrics::counter!("orders_shipped_total").increment(1);
        tracing::info!(
            total_amount = %self.total_amount,
            line_count = self.order_lines.len(),
            "order shipped"
        );
        Ok(())
    }

    /// Runs a command through the matching method.
    pub fn execute(&mut self, command: OrderCommand) -> Result<(), OrderError> {
        match command {
            OrderCommand::UpdateOrderLine {
                product_id,
                quantity,
                unit_price,
            } => self.update_order_line(product_id, quantity, unit_price),
            OrderCommand::UpdateDiscount { discount } => self.update_discount(discount),
            OrderCommand::UpdateAccount { account_id } => self.update_account(account_id),
            OrderCommand::Ship => self.ship(),
        }
    }

    fn next_version(&self) -> Result<Version, OrderError> {
        self.version
            .checked_next()
            .ok_or(OrderError::VersionExhausted {
                version: self.version,
            })
    }

    fn ensure_modifiable(&self, action: &'static str) -> Result<(), OrderError> {
        if self.state.can_modify() {
            Ok(())
        } else {
            Err(OrderError::AlreadyShipped { action })
        }
    }
}

// Snapshot conversion
impl Order {
    /// Serializable copy of the order's state. Pending events are not included.
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.id,
            account_id: self.account_id,
            state: self.state,
            order_lines: self.order_lines.clone(),
            discount: self.discount,
            total_amount: self.total_amount,
            version: self.version,
        }
    }

    /// Rebuilds an order from a snapshot, checking every invariant again.
    ///
    /// The stored total is ignored and recomputed from the lines and discount.
    pub fn restore(snapshot: OrderSnapshot) -> Result<Self, OrderError> {
        let OrderSnapshot {
            id,
            account_id,
            state,
            order_lines,
            discount,
            version,
            ..
        } = snapshot;

        if discount.is_negative() {
            return Err(OrderError::NegativeDiscount { discount });
        }
        for (index, line) in order_lines.iter().enumerate() {
            if order_lines[..index]
                .iter()
                .any(|earlier| earlier.product_id() == line.product_id())
            {
                return Err(OrderError::DuplicateLine {
                    product_id: line.product_id(),
                });
            }
        }
        if state == OrderState::Shipped && order_lines.is_empty() {
            return Err(OrderError::ShippedWithoutLines);
        }
        let (subtotal, total_amount) = calculate_totals(&order_lines, discount)?;

        Ok(Self {
            id,
            account_id,
            state,
            order_lines,
            discount,
            subtotal,
            total_amount,
            version,
            pending_events: Vec::new(),
        })
    }
}

impl From<Order> for OrderSnapshot {
    fn from(order: Order) -> Self {
        OrderSnapshot {
            id: order.id,
            account_id: order.account_id,
            state: order.state,
            order_lines: order.order_lines,
            discount: order.discount,
            total_amount: order.total_amount,
            version: order.version,
        }
    }
}

impl TryFrom<OrderSnapshot> for Order {
    type Error = OrderError;

    fn try_from(snapshot: OrderSnapshot) -> Result<Self, Self::Error> {
        Order::restore(snapshot)
    }
}

/// `(Σ(line_total), Σ(line_total) − discount)`, recomputed from scratch.
fn calculate_totals(
    order_lines: &[OrderLine],
    discount: Money,
) -> Result<(Money, Money), OrderError> {
    let subtotal = order_lines
        .iter()
        .try_fold(Money::zero(), |acc, line| acc.checked_add(line.line_total()))
        .ok_or(OrderError::AmountOverflow)?;
    let total_amount = subtotal
        .checked_sub(discount)
        .ok_or(OrderError::AmountOverflow)?;
    Ok((subtotal, total_amount))
}

fn rejected(error: OrderError) -> OrderError {
    metrics::counter!("order_commands_rejected_total", "kind" => error.kind().as_str())
        .increment(1);
    tracing::debug!(%error, kind = %error.kind(), "order change rejected");
    error
}
