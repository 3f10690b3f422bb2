//! Data source error types.

use crate::feature::{FieldType, GeometryError, SchemaError};
use thiserror::Error;

/// Errors raised while reading or writing feature rows.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] bincode::Error),

    #[error("Invalid dump file: {0}")]
    Format(String),

    #[error("Row {id} has {actual} values but the schema has {expected} fields")]
    RowShape {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row {id}: value for field {field} is not of type {expected}")]
    TypeMismatch {
        id: String,
        field: String,
        expected: FieldType,
    },

    #[error("Duplicate feature id: {0}")]
    DuplicateId(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;
