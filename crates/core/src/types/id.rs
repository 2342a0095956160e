//! Product identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
///
/// Product IDs are opaque strings assigned by the catalog backend. A cart holds
/// at most one line item per `ProductId`.
///
/// ```
/// use gomarket_core::ProductId;
///
/// let id = ProductId::from("sku-1234");
/// assert_eq!(id.as_str(), "sku-1234");
/// assert_eq!(id.to_string(), "sku-1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ProductId::from("1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1\"");

        let parsed: ProductId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed, ProductId::from("abc"));
    }

    #[test]
    fn test_conversions() {
        let id = ProductId::new(String::from("p-9"));
        assert_eq!(id.as_ref(), "p-9");
        assert_eq!(String::from(id.clone()), "p-9");
        assert_eq!(id.into_inner(), "p-9");
    }
}
