//! Input validation against a definition.
//!
//! Validation collects every problem in the payload before failing, so callers
//! get one [`ValidationError`] with a path per offending field, for example
//! `endpoints[1].endpoint_name`.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use sermodel_core::{
    FieldInfo, FieldKind, ValidationError, ValidationErrorKind, Value, matches_pattern,
};

use crate::definition::SerializerDefinition;

/// Validated value of one exposed field.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    Attribute(Value),
    /// Payload for a single relation.
    One(ValidatedData),
    /// Payloads for a multi relation, in input order.
    Many(Vec<ValidatedData>),
    /// A single relation explicitly set to `null`.
    Null,
}

/// Validated input for one object, keyed by field name.
///
/// Only fields present in the input appear; defaults are filled at creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedData {
    entries: BTreeMap<&'static str, Validated>,
}

impl ValidatedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: Validated) {
        self.entries.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Validated> {
        self.entries.get(name)
    }

    /// The validated attribute value under `name`.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name) {
            Some(Validated::Attribute(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Validated)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate `data` for every field the definition exposes.
///
/// Keys the definition does not expose are ignored.
pub fn validate(
    definition: &SerializerDefinition,
    data: &JsonValue,
) -> Result<ValidatedData, ValidationError> {
    let mut errors = ValidationError::new(definition.model().name);
    let validated = validate_object(definition, data, "", &mut errors);
    if errors.is_empty() {
        Ok(validated)
    } else {
        tracing::debug!(
            model = definition.model().name,
            problems = errors.len(),
            "Input failed validation"
        );
        Err(errors)
    }
}

fn validate_object(
    definition: &SerializerDefinition,
    data: &JsonValue,
    prefix: &str,
    errors: &mut ValidationError,
) -> ValidatedData {
    let mut out = ValidatedData::new();
    let Some(map) = data.as_object() else {
        errors.push(
            prefix,
            ValidationErrorKind::Shape,
            format!("Expected an object, got {}.", json_type(data)),
        );
        return out;
    };

    for &name in definition.fields() {
        let path = join(prefix, name);
        let input = map.get(name);

        if let Some(nested) = definition.nested(name) {
            if let (Some(input), Some(child)) = (input, nested.definition()) {
                if let Some(value) = validate_relation(child, nested.is_many(), input, &path, errors) {
                    out.insert(name, value);
                }
            }
            continue;
        }

        let Some(field) = definition.model().field(name) else {
            continue;
        };
        match input {
            None if field.is_required() => {
                errors.push(path, ValidationErrorKind::Required, "This field is required.");
            }
            None => {}
            Some(json) => {
                if let Some(value) = validate_attribute(field, json, &path, errors) {
                    out.insert(name, Validated::Attribute(value));
                }
            }
        }
    }
    out
}

fn validate_relation(
    child: &SerializerDefinition,
    many: bool,
    input: &JsonValue,
    path: &str,
    errors: &mut ValidationError,
) -> Option<Validated> {
    if input.is_null() {
        if many {
            errors.push(path, ValidationErrorKind::Null, "This field may not be null.");
            return None;
        }
        return Some(Validated::Null);
    }
    if !many {
        return Some(Validated::One(validate_object(child, input, path, errors)));
    }
    let Some(items) = input.as_array() else {
        errors.push(
            path,
            ValidationErrorKind::Type,
            format!("Expected a list of items but got type \"{}\".", json_type(input)),
        );
        return None;
    };
    let validated = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_object(child, item, &format!("{path}[{i}]"), errors))
        .collect();
    Some(Validated::Many(validated))
}

fn validate_attribute(
    field: &FieldInfo,
    json: &JsonValue,
    path: &str,
    errors: &mut ValidationError,
) -> Option<Value> {
    if json.is_null() {
        if field.nullable {
            return Some(Value::Null);
        }
        errors.push(path, ValidationErrorKind::Null, "This field may not be null.");
        return None;
    }

    let Some(value) = field.coerce_json(json) else {
        errors.push(
            path,
            ValidationErrorKind::Type,
            format!("Not a valid {}.", field.kind.type_name()),
        );
        return None;
    };

    if let (FieldKind::Text, Value::Text(text)) = (&field.kind, &value) {
        let before = errors.len();
        check_text(field, text, path, errors);
        if errors.len() > before {
            return None;
        }
    }
    Some(value)
}

fn check_text(field: &FieldInfo, text: &str, path: &str, errors: &mut ValidationError) {
    if !field.choices.is_empty() && !field.choices.contains(&text) {
        errors.push(
            path,
            ValidationErrorKind::Choice,
            format!("\"{text}\" is not a valid choice."),
        );
    }
    if let Some(max) = field.max_length {
        if text.chars().count() > max {
            errors.push(
                path,
                ValidationErrorKind::MaxLength,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
    }
    if let Some(pattern) = field.pattern {
        if !matches_pattern(text, pattern) {
            errors.push(
                path,
                ValidationErrorKind::Pattern,
                "This value does not match the required pattern.",
            );
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "str",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}
