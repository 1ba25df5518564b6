use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Number of hex characters in a product identifier.
pub const PRODUCT_ID_LEN: usize = 24;

/// Error returned when a string is not a well-formed product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product identifier: {0:?}")]
pub struct InvalidProductId(pub String);

/// Store-assigned identifier of a catalog product.
///
/// Always 24 lowercase hex characters (12 bytes). Parsing accepts either
/// case and normalizes to lowercase, so two spellings of the same id compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Generates a fresh random product identifier.
    pub fn generate() -> Self {
        let bytes = Uuid::new_v4();
        let hex: String = bytes.as_bytes()[..PRODUCT_ID_LEN / 2]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(hex)
    }

    /// Parses a product identifier from its textual form.
    pub fn parse(s: &str) -> Result<Self, InvalidProductId> {
        if s.len() == PRODUCT_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidProductId(s.to_string()))
        }
    }

    /// Returns true if `s` would parse as a product identifier.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = InvalidProductId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
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

/// Identifier handed out for a confirmed order.
///
/// Orders are never persisted, so there is no uniqueness registry; a random
/// UUID v4 is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates a new random order ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
