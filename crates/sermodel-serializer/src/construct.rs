//! Nested object-graph creation from validated input.
//!
//! Rows are written in dependency order: targets of forward relations first
//! (their keys are stored on the base row), then the base row, then the children
//! of reverse relations with their back reference pointing at the base row.
//!
//! Nothing here opens a transaction. A failure part way leaves the rows already
//! written in place; wrap the call in the store's transaction API when the graph
//! must be all-or-nothing.

use sermodel_core::{
    Direction, Error, FieldValues, ModelMeta, Record, RelationshipInfo, Result, Store, Value,
};

use crate::classify;
use crate::validation::{Validated, ValidatedData};

/// Create the object graph described by `data`, rooted at `model`.
pub fn create<S: Store + ?Sized>(
    store: &mut S,
    model: &'static ModelMeta,
    data: &ValidatedData,
) -> Result<Record> {
    create_with(store, model, data, FieldValues::new())
}

/// Like [`create`], with extra column values for the base row.
///
/// Used for the back reference when creating the children of a reverse
/// relation. These values take precedence over anything in `data`.
pub fn create_with<S: Store + ?Sized>(
    store: &mut S,
    model: &'static ModelMeta,
    data: &ValidatedData,
    parent: FieldValues,
) -> Result<Record> {
    classify::check_namespaces(model)?;
    let (mut values, relations) = partition(model, data)?;

    for &(name, info, payload) in &relations {
        if info.direction != Direction::Forward || parent.contains_key(name) {
            continue;
        }
        let key = match payload {
            Validated::One(child) => Value::BigInt(create(store, info.related_model(), child)?.key()),
            Validated::Null => Value::Null,
            _ => return Err(mismatch(model, name)),
        };
        values.insert(name, key);
    }

    values.extend(parent);
    let base = store.create_row(model, values)?;
    tracing::trace!(model = model.name, key = base.key(), "Created base row");

    for &(name, info, payload) in &relations {
        if info.direction != Direction::Reverse {
            continue;
        }
        let elements: Vec<&ValidatedData> = match (info.is_multi(), payload) {
            (true, Validated::Many(items)) => items.iter().collect(),
            (false, Validated::One(item)) => vec![item],
            (_, Validated::Null) => Vec::new(),
            _ => return Err(mismatch(model, name)),
        };
        let back = classify::related_back_reference(model, name)?;
        for element in elements {
            let mut back_reference = FieldValues::new();
            back_reference.insert(back, Value::BigInt(base.key()));
            create_with(store, info.related_model(), element, back_reference)?;
        }
    }

    Ok(base)
}

type RelationPayload<'d> = (&'static str, &'static RelationshipInfo, &'d Validated);

/// Split input into base-row columns and relation payloads in declaration order.
fn partition<'d>(
    model: &'static ModelMeta,
    data: &'d ValidatedData,
) -> Result<(FieldValues, Vec<RelationPayload<'d>>)> {
    let mut values = FieldValues::new();
    let mut relations = Vec::new();

    for (name, payload) in data.iter() {
        if classify::is_attribute(model, name) {
            let Validated::Attribute(value) = payload else {
                return Err(mismatch(model, name));
            };
            values.insert(name, value.clone());
        } else if classify::is_relation(model, name) {
            relations.push((name, classify::relation(model, name)?, payload));
        } else {
            tracing::trace!(model = model.name, field = name, "Ignoring unknown input key");
        }
    }

    relations.sort_by_key(|(name, _, _)| model.fields.iter().position(|f| f.name == *name));
    Ok((values, relations))
}

fn mismatch(model: &ModelMeta, name: &str) -> Error {
    Error::Config(format!(
        "payload for {}.{} does not match the declared field",
        model.name, name
    ))
}
