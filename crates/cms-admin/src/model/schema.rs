//! Opaque structural schemas.
//!
//! Schemas are produced and interpreted by an external form/validation
//! system. This crate only carries them around as JSON objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An object schema (e.g. a JSON schema with `type: "object"`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaObject(pub Map<String, Value>);

/// A string schema, used where a single scalar field is described.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaString(pub Map<String, Value>);

impl SchemaObject {
    /// Creates an empty schema object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, returning `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the raw schema entry for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl SchemaString {
    /// Wraps a JSON value, returning `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }
}
