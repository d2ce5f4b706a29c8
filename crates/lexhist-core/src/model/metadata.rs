use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque extension map carried by amendments
///
/// Ingestion may attach fields this subsystem does not interpret
/// (source URLs, parser versions, ...). They are kept in key order so
/// serialized output is stable across runs and cache tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Metadata {
    data: BTreeMap<String, Value>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Parse a stored JSON object; anything that is not an object yields an empty map
    ///
    /// # Errors
    ///
    /// Propagates JSON syntax errors.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => Ok(Self {
                data: map.into_iter().collect(),
            }),
            _ => Ok(Self::new()),
        }
    }
}

impl From<BTreeMap<String, Value>> for Metadata {
    fn from(data: BTreeMap<String, Value>) -> Self {
        Self { data }
    }
}
