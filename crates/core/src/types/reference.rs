//! Customer-facing order reference.

use serde::{Deserialize, Serialize};

/// Opaque unique order identifier assigned by the external store.
///
/// The client never generates one; it only echoes references back for
/// tracking and status updates. No structure is assumed beyond "non-empty
/// string".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct OrderReference(String);

impl OrderReference {
    /// Wrap a reference received from the store or typed by a customer.
    ///
    /// Surrounding whitespace is trimmed; the value is otherwise untouched.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self(value.trim().to_owned())
    }

    /// The reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the reference is blank (nothing to look up).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OrderReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrderReference {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
