//! Model-level entry points: serialize a record, deserialize a payload.

use serde_json::Value as JsonValue;
use sermodel_core::{ModelMeta, Record, Result, Store};

use crate::builder::build;
use crate::filter::SerializableModelFilter;
use crate::json::dump_and_load;

/// Serialize `record` and every related object the filter lets through.
///
/// The root path name defaults to the model name when the filter has none.
#[tracing::instrument(level = "debug", skip_all, fields(model = record.model().name, key = record.key()))]
pub fn serialize<S: Store + ?Sized>(
    record: &Record,
    store: &S,
    filter: &SerializableModelFilter,
) -> Result<JsonValue> {
    let model = record.model();
    let definition = build(model, &filter.scope_for(model.name))?;
    let rendered = definition.render(record, store)?;
    dump_and_load(&rendered)
}

/// Validate `data` and create the object graph it describes.
///
/// Only relations present in `data` are considered. Validation problems are
/// reported as [`Error::Validation`](sermodel_core::Error::Validation) before
/// anything is written; a store failure during creation leaves earlier rows in
/// place unless the caller wraps this in a transaction.
#[tracing::instrument(level = "debug", skip_all, fields(model = model.name))]
pub fn deserialize<S: Store + ?Sized>(
    model: &'static ModelMeta,
    store: &mut S,
    data: &JsonValue,
    filter: &SerializableModelFilter,
) -> Result<Record> {
    let scope = filter.scope_for(model.name).with_pending_data(data.clone());
    let definition = build(model, &scope)?;
    let validated = definition.validate(data)?;
    let record = definition.create(store, &validated)?;
    tracing::info!(model = model.name, key = record.key(), "Deserialized object graph");
    Ok(record)
}

/// Method syntax for [`serialize`] on stored records.
pub trait SerializableModel {
    fn serialize<S: Store + ?Sized>(&self, store: &S, filter: &SerializableModelFilter) -> Result<JsonValue>;
}

impl SerializableModel for Record {
    fn serialize<S: Store + ?Sized>(&self, store: &S, filter: &SerializableModelFilter) -> Result<JsonValue> {
        serialize(self, store, filter)
    }
}

/// Method syntax for [`deserialize`] on model metadata.
pub trait DeserializableModel {
    fn deserialize<S: Store + ?Sized>(
        &'static self,
        store: &mut S,
        data: &JsonValue,
        filter: &SerializableModelFilter,
    ) -> Result<Record>;
}

impl DeserializableModel for ModelMeta {
    fn deserialize<S: Store + ?Sized>(
        &'static self,
        store: &mut S,
        data: &JsonValue,
        filter: &SerializableModelFilter,
    ) -> Result<Record> {
        deserialize(self, store, data, filter)
    }
}
