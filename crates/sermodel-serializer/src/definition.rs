//! Serializer definitions.
//!
//! A [`SerializerDefinition`] is a plain value describing which fields of a model
//! are exposed and how each relation nests. It carries no behaviour of its own:
//! [`render`](crate::render::render), [`validate`](crate::validation::validate)
//! and [`create`](crate::construct::create) interpret it.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use sermodel_core::{ModelMeta, Record, Result, Store, ValidationError};

use crate::render::Rendered;
use crate::validation::ValidatedData;

/// Per-field rendering/validation override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOverride {
    /// Structured attribute exposed as a parsed JSON document, also when it was
    /// stored as text. Input accepts any JSON value.
    ParsedJson,
}

/// How a relation appears in a definition.
#[derive(Debug, Clone)]
pub enum NestedSerializer {
    /// Nested definition for the related model.
    Built {
        many: bool,
        definition: Box<SerializerDefinition>,
    },
    /// The related definition could not be built; the relation is not exposed.
    Omitted { reason: String },
}

impl NestedSerializer {
    pub fn definition(&self) -> Option<&SerializerDefinition> {
        match self {
            Self::Built { definition, .. } => Some(definition),
            Self::Omitted { .. } => None,
        }
    }

    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Built { many: true, .. })
    }

    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted { .. })
    }
}

/// Exposed fields of one model at one position of a traversal.
#[derive(Debug, Clone)]
pub struct SerializerDefinition {
    model: &'static ModelMeta,
    path: String,
    fields: Vec<&'static str>,
    nested: BTreeMap<&'static str, NestedSerializer>,
    overrides: BTreeMap<&'static str, FieldOverride>,
}

impl SerializerDefinition {
    pub(crate) fn new(model: &'static ModelMeta, path: String) -> Self {
        Self {
            model,
            path,
            fields: Vec::new(),
            nested: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    pub(crate) fn push_field(&mut self, name: &'static str) {
        if !self.fields.contains(&name) {
            self.fields.push(name);
        }
    }

    pub(crate) fn set_nested(&mut self, name: &'static str, nested: NestedSerializer) {
        self.nested.insert(name, nested);
    }

    pub(crate) fn set_override(&mut self, name: &'static str, value: FieldOverride) {
        self.overrides.insert(name, value);
    }

    pub fn model(&self) -> &'static ModelMeta {
        self.model
    }

    /// Traversal path this definition was built for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Exposed field names: attributes first, then relations.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    /// Nested entry for `name`, built or omitted.
    pub fn nested(&self, name: &str) -> Option<&NestedSerializer> {
        self.nested.get(name)
    }

    /// Built child definition for the relation `name`.
    pub fn child(&self, name: &str) -> Option<&SerializerDefinition> {
        self.nested(name).and_then(NestedSerializer::definition)
    }

    /// Relations that could not be built, with the reason.
    pub fn omitted(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.nested.iter().filter_map(|(name, nested)| match nested {
            NestedSerializer::Omitted { reason } => Some((*name, reason.as_str())),
            NestedSerializer::Built { .. } => None,
        })
    }

    pub fn override_for(&self, name: &str) -> Option<FieldOverride> {
        self.overrides.get(name).copied()
    }

    /// Exposed attribute names.
    pub fn attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .copied()
            .filter(|name| !self.nested.contains_key(name))
    }

    /// Number of nesting levels below this definition.
    pub fn depth(&self) -> usize {
        self.nested
            .values()
            .filter_map(NestedSerializer::definition)
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn render<S: Store + ?Sized>(&self, record: &Record, store: &S) -> Result<Rendered> {
        crate::render::render(self, record, store)
    }

    pub fn validate(&self, data: &JsonValue) -> std::result::Result<ValidatedData, ValidationError> {
        crate::validation::validate(self, data)
    }

    /// Persist validated input as a new object graph rooted at this model.
    pub fn create<S: Store + ?Sized>(&self, store: &mut S, data: &ValidatedData) -> Result<Record> {
        crate::construct::create(store, self.model, data)
    }
}
