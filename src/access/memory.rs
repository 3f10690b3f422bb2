//! In-memory feature source.

use crate::access::error::{SourceError, SourceResult};
use crate::access::source::{check_row, FeatureSource, RawRow, RowStream};
use crate::feature::{Envelope, Schema, Value};
use std::collections::HashSet;

/// Rows kept in insertion order; that order is the scan order.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    schema: Schema,
    rows: Vec<RawRow>,
    ids: HashSet<String>,
    bounds: Envelope,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
            ids: HashSet::new(),
            bounds: Envelope::empty(),
        }
    }

    /// Append a row after validating it against the schema
    pub fn insert(&mut self, id: impl Into<String>, values: Vec<Value>) -> SourceResult<()> {
        let id = id.into();
        check_row(&self.schema, &id, &values)?;
        if self.ids.contains(&id) {
            return Err(SourceError::DuplicateId(id));
        }

        if let Some(geom) = values[self.schema.geometry_index()].as_geometry() {
            self.bounds.expand_to_include(&Envelope::of(geom));
        }

        self.ids.insert(id.clone());
        self.rows.push(RawRow { id, values });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FeatureSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> SourceResult<Schema> {
        Ok(self.schema.clone())
    }

    fn bounds(&self) -> SourceResult<Envelope> {
        Ok(self.bounds)
    }

    fn rows(&self) -> SourceResult<RowStream<'_>> {
        Ok(Box::new(self.rows.iter().cloned().map(Ok)))
    }

    fn row_count(&self) -> Option<usize> {
        Some(self.rows.len())
    }
}
