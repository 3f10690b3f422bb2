//! Query entry points over a feature source.

use crate::access::FeatureSource;
use crate::cursor::Cursor;
use crate::executor;
use crate::feature::{Envelope, Schema};
use crate::planner::{Planner, QueryPlan};
use crate::query::{Query, QueryResult};
use log::debug;
use std::sync::Arc;

/// A queryable dataset.
///
/// Schema and bounds are read from the source once, at `open`, and cached.
pub struct VectorDataset<S> {
    source: S,
    schema: Arc<Schema>,
    bounds: Envelope,
}

impl<S: FeatureSource> VectorDataset<S> {
    pub fn open(source: S) -> QueryResult<Self> {
        let schema = Arc::new(source.schema()?);
        let bounds = source.bounds()?;
        debug!(
            "Opened dataset {} ({} fields, bounds {})",
            source.name(),
            schema.len(),
            bounds
        );
        Ok(Self {
            source,
            schema,
            bounds,
        })
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn bounds(&self) -> Envelope {
        self.bounds
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn plan(&self, query: &Query) -> QueryPlan {
        Planner::new(&self.schema, self.bounds).plan(query)
    }

    /// Number of features `cursor(query)` would yield
    pub fn count(&self, query: &Query) -> QueryResult<usize> {
        let plan = self.plan(query);
        if plan.is_full_scan() {
            if let Some(rows) = self.source.row_count() {
                let count = plan.paged_count(rows);
                debug!("Counted {} of {} rows without scanning", count, rows);
                return Ok(count);
            }
        }

        self.open_cursor(plan)?.size()
    }

    /// Open a cursor over the features matching `query`
    pub fn cursor(&self, query: &Query) -> QueryResult<Cursor<'_>> {
        self.open_cursor(self.plan(query))
    }

    fn open_cursor(&self, plan: QueryPlan) -> QueryResult<Cursor<'_>> {
        let executor = executor::build(plan, &self.source, Arc::clone(&self.schema));
        Cursor::open(executor)
    }
}
