use crate::feature::envelope::Envelope;
use crate::feature::schema::Schema;
use crate::feature::value::Value;
use geo_types::Geometry;
use std::sync::Arc;

/// One record of a dataset: identifier, attribute values and geometry.
///
/// Values are positional, aligned with the schema fields; the geometry is the
/// value stored at the schema's geometry position.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: String,
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Feature {
    /// Create a feature. The caller guarantees `values` matches the schema.
    pub(crate) fn new(id: String, schema: Arc<Schema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), schema.len());
        Self { id, schema, values }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up an attribute (or the geometry) by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Name/value pairs in schema order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }

    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.values[self.schema.geometry_index()].as_geometry()
    }

    /// Bounding envelope of the geometry, empty when the geometry is null
    pub fn envelope(&self) -> Envelope {
        self.geometry().map(Envelope::of).unwrap_or_default()
    }
}
