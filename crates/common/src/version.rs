use serde::{Deserialize, Serialize};

/// Revision counter of an aggregate.
///
/// Starts at 0 for a freshly constructed aggregate and advances by one for
/// each accepted state change. Repositories compare it to detect lost updates;
/// the aggregate itself never looks at it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Version of an aggregate no change has been applied to.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Panics at `u64::MAX`; use [`checked_next`](Self::checked_next) when the
    /// version comes from outside.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The following version, or `None` once the counter is exhausted.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}
