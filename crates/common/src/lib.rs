//! Identity and revision primitives shared across the workspace.

pub mod types;
pub mod version;

pub use types::{AggregateId, IdParseError};
pub use version::Version;
