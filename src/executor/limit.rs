//! Limit executor implementation.
//!
//! This executor limits the number of features returned from a child executor.
//! It supports both LIMIT and OFFSET functionality for pagination. Once the
//! limit is reached the child is not pulled again.

use crate::executor::Executor;
use crate::feature::{Feature, Schema};
use crate::query::{QueryError, QueryResult};
use std::sync::Arc;

/// Executor that skips `offset` features and returns at most `limit`
pub struct LimitExecutor<'a> {
    /// Child executor that produces features
    child: Box<dyn Executor + 'a>,
    /// Maximum number of features to return; unbounded when None
    limit: Option<usize>,
    /// Number of features to skip before returning
    offset: usize,
    /// Number of features skipped so far
    skipped: usize,
    /// Number of features returned so far
    returned: usize,
    /// Whether the executor has been initialized
    initialized: bool,
}

impl<'a> LimitExecutor<'a> {
    /// Create a new limit executor
    ///
    /// # Arguments
    /// * `child` - The child executor that produces features
    /// * `limit` - The maximum number of features to return
    /// * `offset` - The number of features to skip before returning
    pub fn new(child: Box<dyn Executor + 'a>, limit: Option<usize>, offset: usize) -> Self {
        Self {
            child,
            limit,
            offset,
            skipped: 0,
            returned: 0,
            initialized: false,
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.map_or(false, |limit| self.returned >= limit)
    }
}

impl Executor for LimitExecutor<'_> {
    fn init(&mut self) -> QueryResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        self.skipped = 0;
        self.returned = 0;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Feature>> {
        if !self.initialized {
            return Err(QueryError::NotInitialized);
        }

        // No further reads once the limit is reached
        if self.limit_reached() {
            return Ok(None);
        }

        while self.skipped < self.offset {
            match self.child.next()? {
                Some(_) => self.skipped += 1,
                None => return Ok(None),
            }
        }

        match self.child.next()? {
            Some(feature) => {
                self.returned += 1;
                Ok(Some(feature))
            }
            None => Ok(None),
        }
    }

    fn schema(&self) -> &Arc<Schema> {
        self.child.schema()
    }
}
