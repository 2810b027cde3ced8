//! Error classification shared by the domain.

use serde::Serialize;

/// Broad category of a rejected change.
///
/// Both are caller contract violations detected before anything is mutated;
/// retrying the same request will fail the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An input value broke a local precondition (bad quantity, negative discount).
    InvalidArgument,

    /// The request conflicts with the aggregate's lifecycle (already shipped, nothing to ship).
    InvalidState,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InvalidState => "invalid_state",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
