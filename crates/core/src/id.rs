//! Product identifier.
//!
//! Ids come from untyped sources (CSV cells, JSON path segments, database rows
//! whose `id` column may be text or integer), so identity is the string form.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product, compared as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive an id from a JSON value: strings are taken verbatim (trimmed),
    /// numbers use their decimal form. Anything else has no identity.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_input("product id must not be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        assert_eq!(ProductId::from_json(&json!(42)), ProductId::from_json(&json!("42")));
    }

    #[test]
    fn null_and_blank_ids_have_no_identity() {
        assert_eq!(ProductId::from_json(&json!(null)), None);
        assert_eq!(ProductId::from_json(&json!("  ")), None);
        assert!("".parse::<ProductId>().is_err());
    }
}
