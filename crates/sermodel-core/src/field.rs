//! Field definitions.

use crate::error::{Error, Result};
use crate::relationship::RelationshipInfo;
use crate::value::Value;

/// The declared type of a model field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Generated identifier. Never serialized, never accepted as input.
    Auto,
    /// Unbounded text.
    Text,
    /// 64-bit integer.
    Integer,
    /// Double-precision float.
    Float,
    /// Boolean flag.
    Boolean,
    /// Structured JSON document.
    Json,
    /// Reference to (or from) another model.
    Relation(RelationshipInfo),
}

impl FieldKind {
    /// True for the plain scalar and structured-value kinds.
    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Integer
                | FieldKind::Float
                | FieldKind::Boolean
                | FieldKind::Json
        )
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self, FieldKind::Relation(_))
    }

    /// True for attributes whose value is a structured document.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, FieldKind::Json)
    }

    /// Short type name for log and error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Auto => "auto",
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::Json => "json",
            FieldKind::Relation(_) => "relation",
        }
    }
}

/// Metadata about a model field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    /// Field name, also the key used in serialized payloads.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Whether `null` is an acceptable value.
    pub nullable: bool,
    /// Whether the store rejects a second row with the same value.
    pub unique: bool,
    /// JSON representation of the default value, used when input omits the field.
    pub default_json: Option<&'static str>,
    /// Allowed values for enumeration-backed text fields. Empty means unrestricted.
    pub choices: &'static [&'static str],
    /// Maximum text length in characters.
    pub max_length: Option<usize>,
    /// Regex the text value must match.
    pub pattern: Option<&'static str>,
    /// Human readable description.
    pub description: Option<&'static str>,
}

impl FieldInfo {
    /// Create a new field info with minimal required data.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            unique: false,
            default_json: None,
            choices: &[],
            max_length: None,
            pattern: None,
            description: None,
        }
    }

    pub const fn auto(name: &'static str) -> Self {
        Self::new(name, FieldKind::Auto)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub const fn json(name: &'static str) -> Self {
        Self::new(name, FieldKind::Json)
    }

    /// A relation field. One-to-one forward keys are unique by construction.
    pub const fn relation(name: &'static str, info: RelationshipInfo) -> Self {
        let field = Self::new(name, FieldKind::Relation(info));
        match (info.kind, info.direction) {
            (
                crate::relationship::RelationshipKind::OneToOne,
                crate::relationship::Direction::Forward,
            ) => field.unique(true),
            _ => field,
        }
    }

    /// Set nullable flag.
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set unique flag.
    pub const fn unique(mut self, value: bool) -> Self {
        self.unique = value;
        self
    }

    /// Set the default value as a JSON literal, e.g. `"\"GET\""` or `"0"`.
    pub const fn default_json(mut self, value: &'static str) -> Self {
        self.default_json = Some(value);
        self
    }

    /// Restrict a text field to a fixed set of values.
    pub const fn choices(mut self, values: &'static [&'static str]) -> Self {
        self.choices = values;
        self
    }

    /// Set maximum text length.
    pub const fn max_length(mut self, value: usize) -> Self {
        self.max_length = Some(value);
        self
    }

    /// Require text values to match a regex.
    pub const fn pattern(mut self, value: &'static str) -> Self {
        self.pattern = Some(value);
        self
    }

    pub const fn description(mut self, value: &'static str) -> Self {
        self.description = Some(value);
        self
    }

    /// Relationship metadata, if this is a relation field.
    #[must_use]
    pub const fn relationship(&self) -> Option<&RelationshipInfo> {
        match &self.kind {
            FieldKind::Relation(info) => Some(info),
            _ => None,
        }
    }

    /// True when input must supply this field.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.kind.is_attribute() && !self.nullable && self.default_json.is_none()
    }

    /// The value stored when input omits this field.
    ///
    /// Uses `default_json` when declared. Otherwise nullable fields default to
    /// `Null` and non-nullable text to the empty string; other kinds have no
    /// implicit default.
    pub fn default_value(&self) -> Result<Option<Value>> {
        if let Some(raw) = self.default_json {
            let json: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
                Error::Config(format!("invalid default for field {}: {}", self.name, e))
            })?;
            return self.coerce_json(&json).map(Some).ok_or_else(|| {
                Error::Config(format!(
                    "default for field {} is not a valid {}",
                    self.name,
                    self.kind.type_name()
                ))
            });
        }
        if self.nullable {
            return Ok(Some(Value::Null));
        }
        Ok(match self.kind {
            FieldKind::Text => Some(Value::Text(String::new())),
            _ => None,
        })
    }

    /// Convert a JSON input value into the stored representation for this field.
    ///
    /// Returns `None` when the JSON type does not fit the field kind. `null`
    /// always converts to `Value::Null`; nullability is checked by the caller.
    #[must_use]
    pub fn coerce_json(&self, json: &serde_json::Value) -> Option<Value> {
        if json.is_null() {
            return Some(Value::Null);
        }
        match self.kind {
            FieldKind::Text => json.as_str().map(|s| Value::Text(s.to_string())),
            FieldKind::Integer => json.as_i64().map(Value::BigInt),
            FieldKind::Float => json.as_f64().map(Value::Double),
            FieldKind::Boolean => json.as_bool().map(Value::Bool),
            FieldKind::Json => Some(Value::Json(json.clone())),
            FieldKind::Auto | FieldKind::Relation(_) => None,
        }
    }
}
