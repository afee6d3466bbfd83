//! Relationship metadata for sermodel.
//!
//! Relationships are declared as static metadata on each `ModelMeta`. The related
//! model is referenced through a function pointer so that models may refer to each
//! other cyclically (a provider has endpoints, an endpoint points back at its
//! provider) without any runtime registry.

use crate::model::ModelMeta;

/// The cardinality of a relationship, seen from the declaring model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelationshipKind {
    /// One-to-one: a `DataProvider` has one `OauthConfig`.
    OneToOne,
    /// Many-to-one: many `Endpoint`s belong to one `DataProvider`.
    #[default]
    ManyToOne,
    /// One-to-many: one `DataProvider` has many `Endpoint`s.
    OneToMany,
    /// Many-to-many via a link table. Declarable, but not traversed by the serializer.
    ManyToMany,
}

/// Which side of the relationship stores the key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// The declaring model stores the related row's key in this field.
    #[default]
    Forward,
    /// The related model stores a key pointing at the declaring model.
    Reverse,
}

/// Metadata about a relationship between models.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipInfo {
    /// Kind of relationship.
    pub kind: RelationshipKind,

    /// Side holding the key.
    pub direction: Direction,

    /// The related model.
    pub related: fn() -> &'static ModelMeta,

    /// The field on the related model that points back.
    ///
    /// For reverse relations this is the key-holding field on the related model
    /// (e.g. `"data_provider"` on `Endpoint` when accessed from `DataProvider`).
    /// For forward relations it is the reverse accessor on the related model.
    pub back_populates: Option<&'static str>,
}

impl RelationshipInfo {
    /// Create a new relationship with required fields.
    #[must_use]
    pub const fn new(
        kind: RelationshipKind,
        direction: Direction,
        related: fn() -> &'static ModelMeta,
    ) -> Self {
        Self {
            kind,
            direction,
            related,
            back_populates: None,
        }
    }

    /// Forward one-to-one: this model holds a unique key to `related`.
    #[must_use]
    pub const fn one_to_one(related: fn() -> &'static ModelMeta) -> Self {
        Self::new(RelationshipKind::OneToOne, Direction::Forward, related)
    }

    /// Reverse one-to-one: `related` holds a unique key, stored in `key_field`, to this model.
    #[must_use]
    pub const fn one_to_one_reverse(
        related: fn() -> &'static ModelMeta,
        key_field: &'static str,
    ) -> Self {
        Self::new(RelationshipKind::OneToOne, Direction::Reverse, related).back_populates(key_field)
    }

    /// Forward many-to-one: this model holds a key to `related`.
    #[must_use]
    pub const fn many_to_one(related: fn() -> &'static ModelMeta) -> Self {
        Self::new(RelationshipKind::ManyToOne, Direction::Forward, related)
    }

    /// Reverse one-to-many: rows of `related` hold a key, stored in `key_field`, to this model.
    #[must_use]
    pub const fn one_to_many(related: fn() -> &'static ModelMeta, key_field: &'static str) -> Self {
        Self::new(RelationshipKind::OneToMany, Direction::Reverse, related).back_populates(key_field)
    }

    /// Many-to-many through a link table.
    #[must_use]
    pub const fn many_to_many(related: fn() -> &'static ModelMeta) -> Self {
        Self::new(RelationshipKind::ManyToMany, Direction::Forward, related)
    }

    /// Set the back-populates field name.
    #[must_use]
    pub const fn back_populates(mut self, field: &'static str) -> Self {
        self.back_populates = Some(field);
        self
    }

    /// The related model's metadata.
    #[must_use]
    pub fn related_model(&self) -> &'static ModelMeta {
        (self.related)()
    }

    /// True when the relation yields a sequence of related rows.
    #[must_use]
    pub const fn is_multi(&self) -> bool {
        matches!(
            self.kind,
            RelationshipKind::OneToMany | RelationshipKind::ManyToMany
        )
    }

    /// True for the kind/direction combinations the engine can traverse and create.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        matches!(
            (self.kind, self.direction),
            (RelationshipKind::OneToOne, _)
                | (RelationshipKind::ManyToOne, Direction::Forward)
                | (RelationshipKind::OneToMany, Direction::Reverse)
        )
    }
}
