//! Flat records - the unit of storage for every collection.
//!
//! A [`Record`] is an insertion-ordered mapping of field name to string
//! value. Typed entities move in and out of records through serde, so the
//! field order of an encoded record follows struct declaration order.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::StoreError;

/// Trait for types persisted as flat records.
pub trait Model: Serialize + DeserializeOwned + Clone {
    /// The backing collection name for this type (one text file per
    /// collection).
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this record.
    fn id(&self) -> &str;
}

/// A flat, insertion-ordered mapping of field name to string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Set a field. An existing key is overwritten in place; a new key is
    /// appended.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|(k, _)| k == key) {
            field.1 = value.to_string();
        } else {
            self.fields.push((key.to_string(), value.to_string()));
        }
    }

    /// Get a field value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten a model into a record. Scalar fields are stored in their
    /// string form.
    pub fn from_model<M: Model>(model: &M) -> Result<Record, StoreError> {
        let value =
            serde_json::to_value(model).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(StoreError::Malformed(format!(
                    "expected a flat record, got {}",
                    other
                )))
            }
        };

        let mut record = Record::new();
        for (key, value) in &object {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            record.set(key, &text);
        }
        Ok(record)
    }

    /// Rebuild a model from a record. Unknown keys are ignored and missing
    /// keys fall back to the field defaults, so hand-edited backing files
    /// with extra or absent fields still load.
    pub fn to_model<M: Model>(&self) -> Result<M, StoreError> {
        let mut object = serde_json::Map::new();
        for (key, value) in self.iter() {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }
        serde_json::from_value(Value::Object(object))
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}
