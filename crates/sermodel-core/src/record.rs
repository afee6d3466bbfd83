//! Stored rows.

use std::collections::BTreeMap;

use crate::model::ModelMeta;
use crate::value::Value;

/// Field values keyed by declared field name.
pub type FieldValues = BTreeMap<&'static str, Value>;

/// A row persisted by a [`Store`](crate::Store).
///
/// Unlike compile-time structs, a `Record` carries its model metadata and keeps
/// values in a map, which lets the serializer walk any model generically.
///
/// # Example
///
/// ```
/// use sermodel_core::{FieldInfo, FieldValues, ModelMeta, Record, Value};
///
/// static TAG: ModelMeta = ModelMeta {
///     name: "tag",
///     table_name: "tags",
///     primary_key: "id",
///     fields: &[FieldInfo::auto("id"), FieldInfo::text("label")],
/// };
///
/// let mut values = FieldValues::new();
/// values.insert("label", Value::from("rust"));
/// let record = Record::new(&TAG, 1, values);
///
/// assert_eq!(record.get("label").and_then(Value::as_str), Some("rust"));
/// assert_eq!(record.get("id"), Some(&Value::BigInt(1)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: &'static ModelMeta,
    key: i64,
    values: FieldValues,
}

impl Record {
    /// Create a record; the primary key field is filled from `key`.
    pub fn new(model: &'static ModelMeta, key: i64, mut values: FieldValues) -> Self {
        values.insert(model.primary_key, Value::BigInt(key));
        Self { model, key, values }
    }

    pub fn model(&self) -> &'static ModelMeta {
        self.model
    }

    /// The generated primary key.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Get the stored value of a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Get the stored value of a field, treating a missing value as `Null`.
    pub fn value_or_null(&self, field: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.values.get(field).unwrap_or(NULL)
    }

    /// The key stored in a forward relation field, if set.
    pub fn foreign_key(&self, field: &str) -> Option<i64> {
        self.values.get(field).and_then(Value::as_i64)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Check if a field has a value set.
    pub fn has(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }
}
