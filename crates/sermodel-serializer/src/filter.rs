//! Traversal filter: which fields survive at which path and depth.
//!
//! [`SerializableModelFilter`] is the caller-facing configuration. It is never
//! mutated during a build; instead every build walks a [`TraversalScope`], a value
//! describing the current path from the root object. Stepping into a relation
//! yields a new scope, so the path is restored automatically when a recursive
//! build returns, on success and on error alike.
//!
//! Depth and exclusion are independent:
//!
//! - an excluded label is hidden everywhere, attribute or relation, at any depth;
//! - relations are only yielded while `current_depth < max_depth`, attributes at
//!   every depth. `max_depth == 0` means "this object's own fields only".
//!
//! A scope also withholds the back reference to the parent object, so a child
//! never renders the object it was reached from.

use std::collections::BTreeSet;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use sermodel_core::{Error, Result};

/// Serialization/deserialization filter configuration.
///
/// ```
/// use sermodel_serializer::SerializableModelFilter;
///
/// let filter = SerializableModelFilter::new(2, ["oauth_config"], "data_provider");
/// assert!(filter.is_excluded("oauth_config"));
/// assert_eq!(filter.scope().current_path_name(), "data_provider");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerializableModelFilter {
    /// Number of relation hops to follow from the root object.
    pub max_depth: usize,
    /// Field names hidden at every depth.
    pub exclude_labels: BTreeSet<String>,
    /// Name of the root object on the traversal path. Empty means "use the model name".
    pub start_object_name: String,
}

impl SerializableModelFilter {
    pub fn new<I, S>(max_depth: usize, exclude_labels: I, start_object_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max_depth,
            exclude_labels: exclude_labels.into_iter().map(Into::into).collect(),
            start_object_name: start_object_name.into(),
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Hide `label` at every depth.
    #[must_use]
    pub fn exclude(mut self, label: impl Into<String>) -> Self {
        self.exclude_labels.insert(label.into());
        self
    }

    #[must_use]
    pub fn with_start_object_name(mut self, name: impl Into<String>) -> Self {
        self.start_object_name = name.into();
        self
    }

    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude_labels.contains(name)
    }

    /// Root scope named after `start_object_name`.
    #[must_use]
    pub fn scope(&self) -> TraversalScope<'_> {
        TraversalScope::new(self, self.start_object_name.clone())
    }

    /// Root scope, falling back to `model_name` when no start name is configured.
    #[must_use]
    pub fn scope_for(&self, model_name: &str) -> TraversalScope<'_> {
        if self.start_object_name.is_empty() {
            tracing::debug!(
                model = model_name,
                "Using model name as starting path name"
            );
            TraversalScope::new(self, model_name)
        } else {
            self.scope()
        }
    }
}

#[derive(Debug, Clone)]
struct Frame {
    name: String,
    /// Field on this object that refers back to the parent object.
    back_reference: Option<String>,
    /// Slice of the input payload relevant to this path (deserialization only).
    /// Shared with every scope stepped from this one.
    pending: Option<Rc<JsonValue>>,
}

/// One position on a traversal path, bound to its filter.
#[derive(Debug, Clone)]
pub struct TraversalScope<'f> {
    filter: &'f SerializableModelFilter,
    /// Root frame first. Never empty.
    frames: Vec<Frame>,
}

impl<'f> TraversalScope<'f> {
    pub fn new(filter: &'f SerializableModelFilter, root_name: impl Into<String>) -> Self {
        Self {
            filter,
            frames: vec![Frame {
                name: root_name.into(),
                back_reference: None,
                pending: None,
            }],
        }
    }

    /// Record the field through which the current object refers to its parent.
    #[must_use]
    pub fn with_back_reference(mut self, name: impl Into<String>) -> Self {
        if let Some(frame) = self.frames.last_mut() {
            frame.back_reference = Some(name.into());
        }
        self
    }

    /// True if `name` leads from the current object back to its parent.
    pub fn is_back_reference(&self, name: &str) -> bool {
        self.frames
            .last()
            .and_then(|f| f.back_reference.as_deref())
            .is_some_and(|back| back == name)
    }

    /// Attach the input payload for the current path.
    #[must_use]
    pub fn with_pending_data(mut self, data: JsonValue) -> Self {
        if let Some(frame) = self.frames.last_mut() {
            frame.pending = Some(Rc::new(data));
        }
        self
    }

    pub fn filter(&self) -> &'f SerializableModelFilter {
        self.filter
    }

    /// Name of the object at the current position.
    pub fn current_path_name(&self) -> &str {
        self.frames.last().map_or("", |f| f.name.as_str())
    }

    /// Number of relation hops from the root.
    pub fn current_depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Dotted path from the root, e.g. `data_provider.endpoints.data_fetches`.
    pub fn path_string(&self) -> String {
        self.frames
            .iter()
            .map(|f| f.name.as_str())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn pending_data(&self) -> Option<&JsonValue> {
        self.frames.last().and_then(|f| f.pending.as_deref())
    }

    /// Scope for the relation `name`, one level deeper.
    #[must_use]
    pub fn step_into(&self, name: &str) -> Self {
        let pending = self.resolve_pending_data(name).map(Rc::new);
        let mut frames = self.frames.clone();
        frames.push(Frame {
            name: name.to_string(),
            back_reference: None,
            pending,
        });
        Self {
            filter: self.filter,
            frames,
        }
    }

    /// Scope of the parent object. Fails at the root.
    pub fn step_out(&self) -> Result<Self> {
        if self.frames.len() <= 1 {
            return Err(Error::State(format!(
                "cannot step out of root scope {:?}",
                self.current_path_name()
            )));
        }
        let mut frames = self.frames.clone();
        frames.pop();
        Ok(Self {
            filter: self.filter,
            frames,
        })
    }

    /// Relation names that should be followed from the current position.
    ///
    /// Empty at the depth ceiling. Excluded names are dropped, as is the back
    /// reference to the parent. While deserializing only relations present in the
    /// pending input survive.
    pub fn apply_relation_filter<'n>(&self, names: &[&'n str]) -> Vec<&'n str> {
        if self.current_depth() >= self.filter.max_depth {
            return Vec::new();
        }
        names
            .iter()
            .copied()
            .filter(|name| !self.filter.is_excluded(name))
            .filter(|name| !self.is_back_reference(name))
            .filter(|name| self.pending_mentions(name))
            .collect()
    }

    /// Attribute names that should be exposed at the current position.
    pub fn apply_property_filter<'n>(&self, names: &[&'n str]) -> Vec<&'n str> {
        names
            .iter()
            .copied()
            .filter(|name| !self.filter.is_excluded(name))
            .collect()
    }

    /// The slice of the pending input addressed by `name`.
    ///
    /// For a mapping this is the value under `name`. For a list of mappings (the
    /// payload of a many-relation) it is the list of every element's value under
    /// `name`, with nested lists flattened.
    pub fn resolve_pending_data(&self, name: &str) -> Option<JsonValue> {
        match self.pending_data()? {
            JsonValue::Object(map) => map.get(name).cloned(),
            JsonValue::Array(items) => {
                let mut slice = Vec::new();
                for item in items {
                    match item.get(name) {
                        Some(JsonValue::Array(values)) => slice.extend(values.iter().cloned()),
                        Some(JsonValue::Null) | None => {}
                        Some(value) => slice.push(value.clone()),
                    }
                }
                Some(JsonValue::Array(slice))
            }
            _ => None,
        }
    }

    fn pending_mentions(&self, name: &str) -> bool {
        match self.pending_data() {
            None => true,
            Some(JsonValue::Object(map)) => map.contains_key(name),
            Some(JsonValue::Array(items)) => items.iter().any(|item| item.get(name).is_some()),
            Some(_) => false,
        }
    }
}
