//! Model metadata.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::field::{FieldInfo, FieldKind};
use crate::validate::validate_pattern;

/// Static description of a model: its name and declared fields.
///
/// Models are declared as `static` items and never mutated:
///
/// ```
/// use sermodel_core::{FieldInfo, ModelMeta};
///
/// static TAG: ModelMeta = ModelMeta {
///     name: "tag",
///     table_name: "tags",
///     primary_key: "id",
///     fields: &[FieldInfo::auto("id"), FieldInfo::text("label")],
/// };
///
/// assert_eq!(TAG.field("label").unwrap().name, "label");
/// ```
pub struct ModelMeta {
    /// Model name in snake case, also the default root path name.
    pub name: &'static str,
    /// Backing table name.
    pub table_name: &'static str,
    /// Name of the generated identifier field.
    pub primary_key: &'static str,
    /// Declared fields in declaration order.
    pub fields: &'static [FieldInfo],
}

impl ModelMeta {
    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all declared fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }

    /// Check the declaration for inconsistencies the engine cannot resolve.
    ///
    /// A name declared twice would serve as both an attribute and a relation (or
    /// shadow itself), so it is rejected rather than silently dropping data.
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(Error::Config(format!(
                    "model {} declares field {} more than once",
                    self.name, field.name
                )));
            }
            if let Some(pattern) = field.pattern {
                if let Some(msg) = validate_pattern(pattern) {
                    return Err(Error::Config(format!(
                        "model {} field {}: {}",
                        self.name, field.name, msg
                    )));
                }
            }
        }
        match self.field(self.primary_key) {
            Some(FieldInfo {
                kind: FieldKind::Auto,
                ..
            }) => Ok(()),
            _ => Err(Error::Config(format!(
                "model {} has no generated primary key field {}",
                self.name, self.primary_key
            ))),
        }
    }
}

impl PartialEq for ModelMeta {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.name == other.name
    }
}

impl Eq for ModelMeta {}

impl fmt::Debug for ModelMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelMeta")
            .field("name", &self.name)
            .field("table_name", &self.table_name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static VALID: ModelMeta = ModelMeta {
        name: "endpoint",
        table_name: "endpoints",
        primary_key: "id",
        fields: &[
            FieldInfo::auto("id"),
            FieldInfo::text("endpoint_name"),
            FieldInfo::text("endpoint_url").pattern(r"^https?://"),
        ],
    };

    static DUPLICATE: ModelMeta = ModelMeta {
        name: "broken",
        table_name: "broken",
        primary_key: "id",
        fields: &[
            FieldInfo::auto("id"),
            FieldInfo::text("label"),
            FieldInfo::json("label"),
        ],
    };

    static BAD_PATTERN: ModelMeta = ModelMeta {
        name: "bad_pattern",
        table_name: "bad_pattern",
        primary_key: "id",
        fields: &[FieldInfo::auto("id"), FieldInfo::text("code").pattern("[unclosed")],
    };

    static NO_KEY: ModelMeta = ModelMeta {
        name: "no_key",
        table_name: "no_key",
        primary_key: "id",
        fields: &[FieldInfo::text("id")],
    };

    #[test]
    fn test_field_lookup() {
        assert!(VALID.field("endpoint_name").is_some());
        assert!(VALID.field("missing").is_none());
        assert_eq!(
            VALID.field_names().collect::<Vec<_>>(),
            vec!["id", "endpoint_name", "endpoint_url"]
        );
    }

    #[test]
    fn test_check_accepts_valid_model() {
        assert!(VALID.check().is_ok());
    }

    #[test]
    fn test_check_rejects_duplicate_names() {
        let err = DUPLICATE.check().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_check_rejects_invalid_pattern() {
        assert!(matches!(BAD_PATTERN.check(), Err(Error::Config(_))));
    }

    #[test]
    fn test_check_requires_generated_key() {
        assert!(matches!(NO_KEY.check(), Err(Error::Config(_))));
    }

    #[test]
    fn test_equality_by_name() {
        assert_eq!(VALID, VALID);
        assert_ne!(VALID, DUPLICATE);
    }
}
