//! Core types and traits for sermodel.
//!
//! `sermodel-core` is the **foundation layer** of the workspace. It defines the
//! model metadata contract and the data types every other crate builds on.
//!
//! # Role In The Architecture
//!
//! - **Metadata contract**: `ModelMeta`, `FieldInfo` and `RelationshipInfo` describe
//!   a model's declared fields, their kinds and, for relations, the related model
//!   and the field that points back.
//! - **Data model**: `Value` and `Record` represent stored rows and their field values.
//! - **Persistence contract**: `Store` is the seam the object-graph constructor and the
//!   renderer use to create and look up rows.
//!
//! # Who Uses This Crate
//!
//! - `sermodel-serializer` classifies fields, builds serializer definitions and
//!   drives nested creation against these types.
//! - `sermodel-session` implements `Store` with an in-memory unit of work.
//!
//! Most applications should use the `sermodel` facade; reach for `sermodel-core`
//! directly when declaring models or writing an alternative store.

pub mod error;
pub mod field;
pub mod model;
pub mod record;
pub mod relationship;
pub mod store;
pub mod validate;
pub mod value;

pub use error::{Error, FieldValidationError, Result, ValidationError, ValidationErrorKind};
pub use field::{FieldInfo, FieldKind};
pub use model::ModelMeta;
pub use record::{FieldValues, Record};
pub use relationship::{Direction, RelationshipInfo, RelationshipKind};
pub use store::Store;
pub use validate::{matches_pattern, validate_pattern};
pub use value::Value;
