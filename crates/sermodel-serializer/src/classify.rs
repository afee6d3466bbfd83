//! Field classification over model metadata.
//!
//! Splits a model's declared fields into attributes (scalar or structured values)
//! and relations the engine can traverse, and answers cardinality and
//! back-reference questions about a relation.

use std::collections::HashSet;

use sermodel_core::{Direction, Error, FieldKind, ModelMeta, RelationshipInfo, Result};

/// Attribute names in declaration order. The generated key is not an attribute.
pub fn attribute_names(model: &ModelMeta) -> Vec<&'static str> {
    model
        .fields
        .iter()
        .filter(|f| f.kind.is_attribute())
        .map(|f| f.name)
        .collect()
}

/// Traversable relation names in declaration order.
///
/// Many-to-many relations and other shapes the engine cannot create are left out.
pub fn relation_names(model: &ModelMeta) -> Vec<&'static str> {
    model
        .fields
        .iter()
        .filter(|f| f.relationship().is_some_and(RelationshipInfo::is_recognized))
        .map(|f| f.name)
        .collect()
}

#[must_use]
pub fn is_attribute(model: &ModelMeta, name: &str) -> bool {
    model.field(name).is_some_and(|f| f.kind.is_attribute())
}

#[must_use]
pub fn is_relation(model: &ModelMeta, name: &str) -> bool {
    model.field(name).is_some_and(|f| f.kind.is_relation())
}

/// Relationship metadata for `name`, which must be a relation field.
pub fn relation(model: &'static ModelMeta, name: &str) -> Result<&'static RelationshipInfo> {
    match model.field(name) {
        Some(field) => match &field.kind {
            FieldKind::Relation(info) => Ok(info),
            _ => Err(unsupported(model, name, "field is not a relation")),
        },
        None => Err(unsupported(model, name, "no such field")),
    }
}

/// True when the relation yields a sequence of related objects.
pub fn is_multi(model: &'static ModelMeta, name: &str) -> Result<bool> {
    relation(model, name).map(RelationshipInfo::is_multi)
}

/// The model on the other side of the relation.
pub fn related_model(model: &'static ModelMeta, name: &str) -> Result<&'static ModelMeta> {
    relation(model, name).map(RelationshipInfo::related_model)
}

/// Name of the field on the related model that refers back to `model`.
///
/// For a reverse relation this is the key-holding field of the related model,
/// which must exist and be a forward relation. For a forward relation it is the
/// declared reverse accessor.
pub fn related_back_reference(model: &'static ModelMeta, name: &str) -> Result<&'static str> {
    let info = relation(model, name)?;
    if !info.is_recognized() {
        return Err(unsupported(model, name, "relation shape is not supported"));
    }
    let Some(back) = info.back_populates else {
        return Err(unsupported(model, name, "relation declares no back reference"));
    };
    if info.direction == Direction::Reverse {
        let holds_key = info
            .related_model()
            .field(back)
            .and_then(|f| f.relationship())
            .is_some_and(|r| r.direction == Direction::Forward);
        if !holds_key {
            return Err(unsupported(
                model,
                name,
                "back reference is not a key field on the related model",
            ));
        }
    }
    Ok(back)
}

/// Reject models whose attribute and relation namespaces overlap.
pub fn check_namespaces(model: &ModelMeta) -> Result<()> {
    model.check()?;
    let attributes: HashSet<_> = attribute_names(model).into_iter().collect();
    if let Some(name) = relation_names(model)
        .into_iter()
        .find(|n| attributes.contains(n))
    {
        return Err(Error::Config(format!(
            "model {} uses {} as both attribute and relation",
            model.name, name
        )));
    }
    Ok(())
}

fn unsupported(model: &'static ModelMeta, name: &str, reason: &'static str) -> Error {
    Error::UnsupportedRelation {
        model: model.name,
        field: name.to_string(),
        reason,
    }
}
