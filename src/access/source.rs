//! The feature source interface.

use crate::access::error::{SourceError, SourceResult};
use crate::feature::{Envelope, Schema, Value};

/// One undecoded row: identifier plus values positional to the schema
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub id: String,
    pub values: Vec<Value>,
}

impl RawRow {
    pub fn new(id: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            id: id.into(),
            values,
        }
    }
}

/// Lazy, single-pass stream of rows. Dropping it releases whatever the
/// source acquired to produce it.
pub type RowStream<'a> = Box<dyn Iterator<Item = SourceResult<RawRow>> + 'a>;

/// A dataset the engine can query.
///
/// `rows` may be called any number of times; each call starts an independent
/// pass in the source's native order, which must be stable while the source
/// is unchanged.
pub trait FeatureSource {
    /// Dataset name
    fn name(&self) -> &str;

    /// Attribute descriptors, fixed for the lifetime of the source
    fn schema(&self) -> SourceResult<Schema>;

    /// Extent of all geometries
    fn bounds(&self) -> SourceResult<Envelope>;

    /// Start a new pass over the rows
    fn rows(&self) -> SourceResult<RowStream<'_>>;

    /// Number of rows, when known without scanning
    fn row_count(&self) -> Option<usize> {
        None
    }
}

impl<S: FeatureSource + ?Sized> FeatureSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn schema(&self) -> SourceResult<Schema> {
        (**self).schema()
    }

    fn bounds(&self) -> SourceResult<Envelope> {
        (**self).bounds()
    }

    fn rows(&self) -> SourceResult<RowStream<'_>> {
        (**self).rows()
    }

    fn row_count(&self) -> Option<usize> {
        (**self).row_count()
    }
}

/// Check a row against the schema: arity and per-field value types.
pub(crate) fn check_row(schema: &Schema, id: &str, values: &[Value]) -> SourceResult<()> {
    if values.len() != schema.len() {
        return Err(SourceError::RowShape {
            id: id.to_string(),
            expected: schema.len(),
            actual: values.len(),
        });
    }

    for (field, value) in schema.fields().iter().zip(values) {
        if !value.is_compatible_with(field.field_type) {
            return Err(SourceError::TypeMismatch {
                id: id.to_string(),
                field: field.name.clone(),
                expected: field.field_type,
            });
        }
    }

    Ok(())
}
