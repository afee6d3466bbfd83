//! Generic, filter-driven (de)serialization for ORM model graphs.
//!
//! `sermodel` is the facade crate. It re-exports the model metadata contract from
//! `sermodel-core`, the serializer engine from `sermodel-serializer`, and the
//! in-memory `Session` store from `sermodel-session`.
//!
//! # Quick Start
//!
//! ```
//! use sermodel::prelude::*;
//!
//! static TEAM: ModelMeta = ModelMeta {
//!     name: "team",
//!     table_name: "teams",
//!     primary_key: "id",
//!     fields: &[
//!         FieldInfo::auto("id"),
//!         FieldInfo::text("name"),
//!         FieldInfo::relation("heroes", RelationshipInfo::one_to_many(hero, "team")),
//!     ],
//! };
//!
//! static HERO: ModelMeta = ModelMeta {
//!     name: "hero",
//!     table_name: "heroes",
//!     primary_key: "id",
//!     fields: &[
//!         FieldInfo::auto("id"),
//!         FieldInfo::text("name"),
//!         FieldInfo::relation("team", RelationshipInfo::many_to_one(team).back_populates("heroes")),
//!     ],
//! };
//!
//! fn team() -> &'static ModelMeta { &TEAM }
//! fn hero() -> &'static ModelMeta { &HERO }
//!
//! let mut session = Session::new();
//! let filter = SerializableModelFilter::default().with_max_depth(1);
//! let payload = json!({"name": "Avengers", "heroes": [{"name": "Thor"}]});
//!
//! let team = TEAM.deserialize(&mut session, &payload, &filter)?;
//! assert_eq!(team.serialize(&session, &filter)?, payload);
//! # Ok::<(), sermodel::Error>(())
//! ```
//!
//! # Transactions
//!
//! Nested creation writes rows one at a time. Wrap `deserialize` in
//! [`Session::atomic`] when a failure must leave no partial graph behind.

pub use sermodel_core::{
    Direction, Error, FieldInfo, FieldKind, FieldValidationError, FieldValues, ModelMeta, Record,
    RelationshipInfo, RelationshipKind, Result, Store, ValidationError, ValidationErrorKind, Value,
};
pub use sermodel_serializer::{
    DeserializableModel, FieldOverride, NestedSerializer, Rendered, SerializableModel,
    SerializableModelFilter, SerializerDefinition, TraversalScope, Validated, ValidatedData, build,
    classify, create, create_with, deserialize, dump_and_load, render, serialize, validate,
};
pub use sermodel_session::{ObjectKey, Session, SessionConfig};

pub use serde_json::{Value as JsonValue, json};

/// Everything needed to declare models and (de)serialize them.
pub mod prelude {
    pub use crate::{
        DeserializableModel, Error, FieldInfo, JsonValue, ModelMeta, Record, RelationshipInfo,
        Result, SerializableModel, SerializableModelFilter, Session, SessionConfig, Store, Value,
        json,
    };
}
