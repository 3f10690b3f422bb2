//! Query description and query-level errors.

use crate::access::SourceError;
use crate::feature::Envelope;
use crate::filter::{self, Expression, ParseError};
use std::fmt;
use thiserror::Error;

/// Errors surfaced by `count` and cursor operations.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// `next()` called on an exhausted cursor
    #[error("No more elements")]
    NoMoreElements,

    #[error("Cursor is closed")]
    CursorClosed,

    #[error("Executor not initialized. Call init() first.")]
    NotInitialized,
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// What to read from a dataset.
///
/// Bounds and filter are independent constraints that must both hold.
/// Offset and limit apply afterwards, in source order.
///
/// ```ignore
/// let query = Query::new()
///     .bounds(Envelope::new(-106.6, 25.8, -93.5, 36.5))
///     .filter("P_MALE > P_FEMALE")?
///     .limit(10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    bounds: Option<Envelope>,
    filter: Option<Expression>,
    limit: Option<usize>,
    offset: usize,
}

impl Query {
    /// A query matching every feature
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, bounds: Envelope) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Parse and attach a filter. Malformed text fails here, not at iteration.
    pub fn filter(self, text: &str) -> Result<Self, ParseError> {
        Ok(self.filter_expr(filter::parse(text)?))
    }

    /// Attach an already built filter expression
    pub fn filter_expr(mut self, expr: Expression) -> Self {
        self.filter = Some(expr);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn get_bounds(&self) -> Option<&Envelope> {
        self.bounds.as_ref()
    }

    pub fn get_filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// The same query without offset and limit
    pub fn without_paging(&self) -> Self {
        Self {
            bounds: self.bounds,
            filter: self.filter.clone(),
            limit: None,
            offset: 0,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(bounds) = &self.bounds {
            parts.push(format!("bounds {}", bounds));
        }
        if let Some(filter) = &self.filter {
            parts.push(format!("filter {}", filter));
        }
        if self.offset > 0 {
            parts.push(format!("offset {}", self.offset));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit {}", limit));
        }

        if parts.is_empty() {
            write!(f, "all features")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let query = Query::new()
            .bounds(Envelope::new(0.0, 0.0, 1.0, 1.0))
            .filter("a > 1")
            .unwrap()
            .offset(5)
            .limit(10);

        assert_eq!(query.get_bounds(), Some(&Envelope::new(0.0, 0.0, 1.0, 1.0)));
        assert!(query.get_filter().is_some());
        assert_eq!(query.get_offset(), 5);
        assert_eq!(query.get_limit(), Some(10));

        let unpaged = query.without_paging();
        assert_eq!(unpaged.get_offset(), 0);
        assert_eq!(unpaged.get_limit(), None);
        assert_eq!(unpaged.get_filter(), query.get_filter());
    }

    #[test]
    fn test_filter_fails_eagerly() {
        let err = Query::new().filter("STATE_NAME = 'Texas").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
        assert!(Query::new().filter("a >").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Query::new().to_string(), "all features");
        let query = Query::new().filter("a = 1").unwrap().limit(3);
        assert_eq!(query.to_string(), "filter a = 1, limit 3");
    }
}
