//! Order lifecycle state.

use serde::{Deserialize, Serialize};

/// The state of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Open ──ship()──► Shipped
/// ```
///
/// The transition is one-way. A shipped order is frozen: its lines, discount
/// and account reference can no longer change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    /// Lines, discount and account may still be edited.
    #[default]
    Open,

    /// Order has left the warehouse (terminal state).
    Shipped,
}

impl OrderState {
    /// Returns true if lines, discount or account can be changed in this state.
    pub fn can_modify(&self) -> bool {
        matches!(self, OrderState::Open)
    }

    /// Returns true if the order may transition to `Shipped` from this state.
    ///
    /// Whether it has any lines is checked by the aggregate.
    pub fn can_ship(&self) -> bool {
        matches!(self, OrderState::Open)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Shipped)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Open => "Open",
            OrderState::Shipped => "Shipped",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
