//! Executor layer for query execution.
//!
//! This module implements the Volcano-style iterator model for executing
//! query plans. Each executor produces features one at a time via the
//! `next()` method, so nothing is read from the source ahead of demand.

use crate::access::FeatureSource;
use crate::feature::{Feature, Schema};
use crate::planner::QueryPlan;
use crate::query::QueryResult;
use std::sync::Arc;

pub mod filter;
pub mod limit;
pub mod scan;

// Re-export executors
pub use filter::FilterExecutor;
pub use limit::LimitExecutor;
pub use scan::ScanExecutor;

/// Trait for all query executors
pub trait Executor {
    /// Initialize the executor. This must be called before `next()`.
    fn init(&mut self) -> QueryResult<()>;

    /// Get the next feature from the executor.
    /// Returns None when there are no more features.
    fn next(&mut self) -> QueryResult<Option<Feature>>;

    /// Schema of the produced features
    fn schema(&self) -> &Arc<Schema>;
}

/// Build the executor tree for a plan: scan, then filter, then paging.
pub fn build<'a>(
    plan: QueryPlan,
    source: &'a dyn FeatureSource,
    schema: Arc<Schema>,
) -> Box<dyn Executor + 'a> {
    let mut root: Box<dyn Executor + 'a> = Box::new(ScanExecutor::new(source, schema, plan.pruner));

    if let Some(filter) = plan.filter {
        root = Box::new(FilterExecutor::new(root, filter));
    }

    if plan.limit.is_some() || plan.offset > 0 {
        root = Box::new(LimitExecutor::new(root, plan.limit, plan.offset));
    }

    root
}
