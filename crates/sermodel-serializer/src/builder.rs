//! Recursive construction of serializer definitions.

use sermodel_core::{ModelMeta, Result};

use crate::classify;
use crate::definition::{FieldOverride, NestedSerializer, SerializerDefinition};
use crate::filter::TraversalScope;

/// Build the definition for `model` at the position described by `scope`.
///
/// Fails only when `model` itself is declared inconsistently. A relation whose
/// definition cannot be built is recorded as [`NestedSerializer::Omitted`] and
/// left out of the field list; the rest of the definition is unaffected.
#[tracing::instrument(level = "debug", skip(model, scope), fields(model = model.name, path = %scope.path_string()))]
pub fn build(model: &'static ModelMeta, scope: &TraversalScope<'_>) -> Result<SerializerDefinition> {
    classify::check_namespaces(model)?;
    let mut definition = SerializerDefinition::new(model, scope.path_string());

    for name in scope.apply_property_filter(&classify::attribute_names(model)) {
        definition.push_field(name);
        if model.field(name).is_some_and(|f| f.kind.is_structured()) {
            definition.set_override(name, FieldOverride::ParsedJson);
        }
    }

    for name in scope.apply_relation_filter(&classify::relation_names(model)) {
        let nested = build_relation(model, name, scope);
        if !nested.is_omitted() {
            definition.push_field(name);
        }
        definition.set_nested(name, nested);
    }

    tracing::debug!(
        fields = definition.fields().len(),
        depth = scope.current_depth(),
        "Built serializer definition"
    );
    Ok(definition)
}

fn build_relation(model: &'static ModelMeta, name: &'static str, scope: &TraversalScope<'_>) -> NestedSerializer {
    let mut child_scope = scope.step_into(name);
    if let Ok(back) = classify::related_back_reference(model, name) {
        child_scope = child_scope.with_back_reference(back);
    }
    let built = classify::relation(model, name).and_then(|info| {
        let definition = build(info.related_model(), &child_scope)?;
        Ok(NestedSerializer::Built {
            many: info.is_multi(),
            definition: Box::new(definition),
        })
    });
    match built {
        Ok(nested) => nested,
        Err(e) => {
            tracing::warn!(
                model = model.name,
                relation = name,
                path = %child_scope.path_string(),
                error = %e,
                "Could not build related serializer, omitting relation"
            );
            NestedSerializer::Omitted {
                reason: e.to_string(),
            }
        }
    }
}
