//! Open-ended product record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::ProductId;

/// Field holding the product identity.
pub const ID_FIELD: &str = "id";

/// Field mutated by stock updates.
pub const STOCK_FIELD: &str = "stock";

/// A product as a string-keyed map of JSON values.
///
/// The field set is whatever the source defines; only `id` and `stock` have
/// meaning to the catalog. Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRecord(Map<String, Value>);

impl ProductRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from a JSON value; non-objects are rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<ProductId> {
        self.0.get(ID_FIELD).and_then(ProductId::from_json)
    }

    pub fn has_id(&self, id: &ProductId) -> bool {
        self.id().as_ref() == Some(id)
    }

    pub fn stock(&self) -> Option<&Value> {
        self.0.get(STOCK_FIELD)
    }

    pub fn set_stock(&mut self, stock: Value) {
        self.0.insert(STOCK_FIELD.to_string(), stock);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ProductRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
