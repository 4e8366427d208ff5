//! Prototype identity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identity of a spawnable kind, e.g. `"exp-small"`.
///
/// Instances created for the same key are interchangeable and share one
/// pool.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeKey(String);

impl PrototypeKey {
    /// Creates a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty key, which tuning validation rejects.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PrototypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrototypeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PrototypeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PrototypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
