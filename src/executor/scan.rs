//! Scan executor implementation.
//!
//! Pulls raw rows from a feature source, rejects rows whose geometry envelope
//! fails the bounds pruner, and materialises the rest as features.

use crate::access::{BoundsPruner, FeatureSource, RowStream, SourceError};
use crate::executor::Executor;
use crate::feature::{Feature, Schema};
use crate::query::{QueryError, QueryResult};
use log::trace;
use std::sync::Arc;

/// Executor that streams features out of a source
pub struct ScanExecutor<'a> {
    source: &'a dyn FeatureSource,
    schema: Arc<Schema>,
    pruner: BoundsPruner,
    /// Open row stream, present between `init()` and exhaustion
    rows: Option<RowStream<'a>>,
    /// Rows read from the source so far
    scanned: usize,
    /// Rows rejected by the pruner
    pruned: usize,
    initialized: bool,
}

impl<'a> ScanExecutor<'a> {
    pub fn new(source: &'a dyn FeatureSource, schema: Arc<Schema>, pruner: BoundsPruner) -> Self {
        Self {
            source,
            schema,
            pruner,
            rows: None,
            scanned: 0,
            pruned: 0,
            initialized: false,
        }
    }

    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn pruned(&self) -> usize {
        self.pruned
    }
}

impl Executor for ScanExecutor<'_> {
    fn init(&mut self) -> QueryResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.rows = Some(self.source.rows()?);
        self.scanned = 0;
        self.pruned = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Feature>> {
        if !self.initialized {
            return Err(QueryError::NotInitialized);
        }

        loop {
            let rows = match self.rows.as_mut() {
                Some(rows) => rows,
                None => return Ok(None),
            };

            let row = match rows.next() {
                Some(row) => row?,
                None => {
                    // Release the stream as soon as it is drained
                    self.rows = None;
                    trace!(
                        "Scan of {} done: {} rows, {} pruned",
                        self.source.name(),
                        self.scanned,
                        self.pruned
                    );
                    return Ok(None);
                }
            };
            self.scanned += 1;

            if row.values.len() != self.schema.len() {
                return Err(SourceError::RowShape {
                    id: row.id,
                    expected: self.schema.len(),
                    actual: row.values.len(),
                }
                .into());
            }

            let geometry = row.values[self.schema.geometry_index()].as_geometry();
            if !self.pruner.accepts(geometry) {
                self.pruned += 1;
                continue;
            }

            return Ok(Some(Feature::new(row.id, Arc::clone(&self.schema), row.values)));
        }
    }

    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}
