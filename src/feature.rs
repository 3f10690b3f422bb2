//! Feature model: typed attribute values, schemas, envelopes and geometry
//! primitives.
//!
//! This module provides:
//! - `Value`, the tagged attribute value a feature carries per field
//! - `Schema` and `Field`, the ordered attribute descriptors of a dataset
//! - `Envelope`, the axis-aligned bounding rectangle used for pruning
//! - Thin wrappers over the `geo` crate for envelope and intersection tests

pub mod envelope;
pub mod geometry;
pub mod record;
pub mod schema;
pub mod value;

pub use envelope::Envelope;
pub use geometry::{geometry_envelope, geometry_intersects, parse_wkt, to_wkt, GeometryError};
pub use record::Feature;
pub use schema::{Field, FieldType, GeometryKind, Schema, SchemaError};
pub use value::Value;
