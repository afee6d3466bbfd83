//! Filter-driven nested serializers for sermodel.
//!
//! `sermodel-serializer` turns model metadata into serializer definitions at
//! runtime, one per traversal, shaped by a [`SerializableModelFilter`]:
//!
//! - [`filter`] tracks the traversal path and decides which fields survive;
//! - [`classify`] splits a model's fields into attributes and relations;
//! - [`builder`] recursively builds a [`SerializerDefinition`];
//! - [`render`] and [`validation`] interpret a definition for output and input;
//! - [`construct`] creates the validated object graph through a [`Store`];
//! - [`mixin`] ties these together as `serialize`/`deserialize`.
//!
//! # Example
//!
//! ```ignore
//! use sermodel_serializer::{SerializableModelFilter, serialize};
//!
//! let filter = SerializableModelFilter::new(2, ["oauth_config"], "data_provider");
//! let json = serialize(&provider, &session, &filter)?;
//! ```
//!
//! [`Store`]: sermodel_core::Store

pub mod builder;
pub mod classify;
pub mod construct;
pub mod definition;
pub mod filter;
pub mod json;
pub mod mixin;
pub mod render;
pub mod validation;

#[cfg(test)]
mod testing;

pub use builder::build;
pub use construct::{create, create_with};
pub use definition::{FieldOverride, NestedSerializer, SerializerDefinition};
pub use filter::{SerializableModelFilter, TraversalScope};
pub use json::dump_and_load;
pub use mixin::{DeserializableModel, SerializableModel, deserialize, serialize};
pub use render::{Rendered, render};
pub use validation::{Validated, ValidatedData, validate};
