//! Query planner: turns a `Query` into an executable `QueryPlan`.
//!
//! The planner performs predicate pushdown:
//! 1. Query bounds become an envelope check on raw rows. Bounds covering the
//!    whole dataset degrade to a "has geometry" check.
//! 2. INTERSECTS predicates on the geometry field imply an extent that rows
//!    must overlap, so they are pruned before the filter is evaluated.
//!
//! Filters themselves are never rewritten; the evaluator still runs on every
//! surviving row.

use crate::access::BoundsPruner;
use crate::feature::{Envelope, Schema};
use crate::filter::{Expression, LogicalOperator};
use crate::query::Query;
use log::debug;

/// Executable form of a query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub pruner: BoundsPruner,
    pub filter: Option<Expression>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl QueryPlan {
    /// True when every source row is a candidate
    pub fn is_full_scan(&self) -> bool {
        self.pruner.is_trivial() && self.filter.is_none()
    }

    /// Number of results for `candidates` matching rows after paging
    pub fn paged_count(&self, candidates: usize) -> usize {
        let after_offset = candidates.saturating_sub(self.offset);
        match self.limit {
            Some(limit) => after_offset.min(limit),
            None => after_offset,
        }
    }
}

/// Query planner bound to one dataset's schema and extent
pub struct Planner<'a> {
    schema: &'a Schema,
    extent: Envelope,
}

impl<'a> Planner<'a> {
    pub fn new(schema: &'a Schema, extent: Envelope) -> Self {
        Self { schema, extent }
    }

    pub fn plan(&self, query: &Query) -> QueryPlan {
        let mut envelopes = Vec::new();
        let mut require_geometry = false;

        if let Some(bounds) = query.get_bounds() {
            if bounds.contains(&self.extent) {
                debug!("Bounds {} cover dataset extent {}", bounds, self.extent);
                require_geometry = true;
            } else {
                envelopes.push(*bounds);
            }
        }

        if let Some(filter) = query.get_filter() {
            let implied = self.implied_extents(filter);
            if !implied.is_empty() {
                debug!("Filter implies extents {:?}", implied);
            }
            envelopes.extend(implied);
        }

        let plan = QueryPlan {
            pruner: BoundsPruner::new(envelopes, require_geometry),
            filter: query.get_filter().cloned(),
            offset: query.get_offset(),
            limit: query.get_limit(),
        };
        debug!("Planned query ({}): full scan = {}", query, plan.is_full_scan());
        plan
    }

    /// Envelopes every match of `expr` must overlap (a conjunction)
    fn implied_extents(&self, expr: &Expression) -> Vec<Envelope> {
        match expr {
            Expression::Spatial {
                attribute,
                geometry,
                ..
            } if *attribute == self.schema.geometry().name => vec![Envelope::of(geometry)],

            Expression::Logical {
                op: LogicalOperator::And,
                operands,
            } => operands
                .iter()
                .flat_map(|e| self.implied_extents(e))
                .collect(),

            Expression::Logical {
                op: LogicalOperator::Or,
                operands,
            } => {
                let mut union = Envelope::empty();
                for operand in operands {
                    match self.single_extent(operand) {
                        Some(extent) => union = union.union(&extent),
                        // One unconstrained branch lets anything through
                        None => return Vec::new(),
                    }
                }
                if operands.is_empty() {
                    Vec::new()
                } else {
                    vec![union]
                }
            }

            // NOT, comparisons and identifier sets say nothing about location
            _ => Vec::new(),
        }
    }

    /// Collapse the extents of `expr` into one envelope
    fn single_extent(&self, expr: &Expression) -> Option<Envelope> {
        self.implied_extents(expr)
            .into_iter()
            .reduce(|acc, e| acc.intersection(&e))
    }
}
