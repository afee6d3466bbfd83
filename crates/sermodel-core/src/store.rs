//! Persistence contract consumed by the serializer.

use crate::error::Result;
use crate::model::ModelMeta;
use crate::record::{FieldValues, Record};

/// Row storage used to create object graphs and to resolve relations while rendering.
///
/// The serializer never manages transactions itself; callers that need
/// all-or-nothing nested creation wrap the call in their store's transaction API.
pub trait Store {
    /// Insert a single row with the given field values and return it with its
    /// generated key populated.
    fn create_row(&mut self, model: &'static ModelMeta, values: FieldValues) -> Result<Record>;

    /// Look up a row by primary key.
    fn get(&self, model: &'static ModelMeta, key: i64) -> Option<&Record>;

    /// Rows of `model` whose forward key `field` equals `key`, in creation order.
    fn find_related(&self, model: &'static ModelMeta, field: &str, key: i64) -> Vec<&Record>;
}
