//! Expression evaluation implementation.

use crate::expression::compare::{compare, Scalar};
use crate::feature::geometry::geometry_intersects;
use crate::feature::Feature;
use crate::filter::{Expression, LogicalOperator, Operand, SpatialOperator};

/// Evaluator for filter expressions against a single feature
pub struct ExpressionEvaluator<'a> {
    /// The feature to evaluate against
    feature: &'a Feature,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn new(feature: &'a Feature) -> Self {
        Self { feature }
    }

    /// Evaluate an expression to a boolean
    pub fn evaluate(&self, expr: &Expression) -> bool {
        match expr {
            Expression::Comparison { left, op, right } => {
                match (self.resolve(left), self.resolve(right)) {
                    (Some(l), Some(r)) => compare(l, *op, r),
                    // NULL or unknown attribute on either side
                    _ => false,
                }
            }

            Expression::Logical { op, operands } => self.evaluate_logical(*op, operands),

            Expression::Spatial {
                op,
                attribute,
                geometry,
            } => match op {
                SpatialOperator::Intersects => self
                    .feature
                    .get(attribute)
                    .and_then(|v| v.as_geometry())
                    .map_or(false, |g| geometry_intersects(g, geometry)),
            },

            Expression::IdentifierSet(ids) => ids.contains(self.feature.id()),
        }
    }

    fn evaluate_logical(&self, op: LogicalOperator, operands: &[Expression]) -> bool {
        match op {
            LogicalOperator::And => operands.iter().all(|e| self.evaluate(e)),
            LogicalOperator::Or => operands.iter().any(|e| self.evaluate(e)),
            LogicalOperator::Not => !operands.iter().all(|e| self.evaluate(e)),
        }
    }

    /// Resolve an operand to a comparable scalar, `None` for NULL or absent
    fn resolve<'b>(&'b self, operand: &'b Operand) -> Option<Scalar<'b>> {
        match operand {
            Operand::Attribute(name) => self.feature.get(name).and_then(Scalar::from_value),
            Operand::Literal(lit) => Some(Scalar::from_literal(lit)),
        }
    }
}

/// Evaluate `expr` against `feature`
pub fn evaluate(expr: &Expression, feature: &Feature) -> bool {
    ExpressionEvaluator::new(feature).evaluate(expr)
}
