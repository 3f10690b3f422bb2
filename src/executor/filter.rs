//! Filter executor implementation.
//!
//! This executor filters features from a child executor based on a filter
//! expression. It implements the volcano-style iterator model, producing one
//! feature at a time that matches the predicate.

use crate::executor::Executor;
use crate::expression::evaluate;
use crate::feature::{Feature, Schema};
use crate::filter::Expression;
use crate::query::{QueryError, QueryResult};
use std::sync::Arc;

/// Executor that filters features based on an expression
pub struct FilterExecutor<'a> {
    /// Child executor that produces features
    child: Box<dyn Executor + 'a>,
    /// Filter expression that evaluates to boolean
    filter_expr: Expression,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl<'a> FilterExecutor<'a> {
    pub fn new(child: Box<dyn Executor + 'a>, filter_expr: Expression) -> Self {
        Self {
            child,
            filter_expr,
            initialized: false,
        }
    }
}

impl Executor for FilterExecutor<'_> {
    fn init(&mut self) -> QueryResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Feature>> {
        if !self.initialized {
            return Err(QueryError::NotInitialized);
        }

        // Keep pulling from child until we find a matching feature
        while let Some(feature) = self.child.next()? {
            if evaluate(&self.filter_expr, &feature) {
                return Ok(Some(feature));
            }
        }

        Ok(None)
    }

    fn schema(&self) -> &Arc<Schema> {
        self.child.schema()
    }
}
