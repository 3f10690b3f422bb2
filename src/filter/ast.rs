// Filter AST definitions

use crate::feature::geometry::to_wkt;
use crate::feature::Value;
use crate::filter::token::Token;
use geo_types::Geometry;
use std::collections::BTreeSet;
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl ComparisonOperator {
    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterEqual => ">=",
        }
    }

    /// Whether the operator needs an ordering rather than plain equality
    pub fn is_relational(&self) -> bool {
        !matches!(self, ComparisonOperator::Equal | ComparisonOperator::NotEqual)
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }
}

/// Spatial predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialOperator {
    Intersects,
}

impl SpatialOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialOperator::Intersects => "INTERSECTS",
        }
    }
}

/// Literal constant in a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Integer(i) => Value::Integer(*i),
            Literal::Float(f) => Value::Float(*f),
            Literal::Text(s) => Value::Text(s.clone()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Attribute (or geometry) reference, resolved against the feature at evaluation time
    Attribute(String),
    Literal(Literal),
}

impl Operand {
    pub fn attribute(name: impl Into<String>) -> Self {
        Operand::Attribute(name.into())
    }

    pub fn integer(value: i64) -> Self {
        Operand::Literal(Literal::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Operand::Literal(Literal::Float(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Operand::Literal(Literal::Text(value.into()))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Attribute(name) => write_identifier(f, name),
            Operand::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

/// Filter expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `left op right`
    Comparison {
        left: Operand,
        op: ComparisonOperator,
        right: Operand,
    },

    /// AND / OR over any number of operands; NOT over exactly one
    Logical {
        op: LogicalOperator,
        operands: Vec<Expression>,
    },

    /// `INTERSECTS(attribute, geometry)`
    Spatial {
        op: SpatialOperator,
        attribute: String,
        geometry: Geometry<f64>,
    },

    /// `IN ('id', ...)` over feature identifiers
    IdentifierSet(BTreeSet<String>),
}

impl Expression {
    /// Create a comparison expression
    pub fn comparison(left: Operand, op: ComparisonOperator, right: Operand) -> Self {
        Expression::Comparison { left, op, right }
    }

    /// Create an AND expression; a single operand is returned as is
    pub fn and(mut operands: Vec<Expression>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        Expression::Logical {
            op: LogicalOperator::And,
            operands,
        }
    }

    /// Create an OR expression; a single operand is returned as is
    pub fn or(mut operands: Vec<Expression>) -> Self {
        if operands.len() == 1 {
            return operands.remove(0);
        }
        Expression::Logical {
            op: LogicalOperator::Or,
            operands,
        }
    }

    /// Create a NOT expression
    pub fn not(operand: Expression) -> Self {
        Expression::Logical {
            op: LogicalOperator::Not,
            operands: vec![operand],
        }
    }

    /// Create an INTERSECTS expression
    pub fn intersects(attribute: impl Into<String>, geometry: Geometry<f64>) -> Self {
        Expression::Spatial {
            op: SpatialOperator::Intersects,
            attribute: attribute.into(),
            geometry,
        }
    }

    /// Create an identifier set expression
    pub fn identifiers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression::IdentifierSet(ids.into_iter().map(Into::into).collect())
    }

    /// Attribute names referenced anywhere in the tree
    pub fn attributes(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_attributes(&mut names);
        names
    }

    fn collect_attributes<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expression::Comparison { left, right, .. } => {
                for operand in [left, right] {
                    if let Operand::Attribute(name) = operand {
                        names.insert(name.as_str());
                    }
                }
            }
            Expression::Logical { operands, .. } => {
                for operand in operands {
                    operand.collect_attributes(names);
                }
            }
            Expression::Spatial { attribute, .. } => {
                names.insert(attribute.as_str());
            }
            Expression::IdentifierSet(_) => {}
        }
    }

    fn is_disjunction(&self) -> bool {
        matches!(
            self,
            Expression::Logical {
                op: LogicalOperator::Or,
                ..
            }
        )
    }

    fn is_compound(&self) -> bool {
        matches!(
            self,
            Expression::Logical {
                op: LogicalOperator::And | LogicalOperator::Or,
                ..
            }
        )
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison { left, op, right } => {
                write!(f, "{} {} {}", left, op.as_str(), right)
            }
            Expression::Logical { op, operands } => match op {
                LogicalOperator::Not => {
                    // Multi-operand NOT negates the conjunction
                    let inner = match operands.as_slice() {
                        [single] => single.clone(),
                        _ => Expression::and(operands.clone()),
                    };
                    if inner.is_compound() {
                        write!(f, "NOT ({})", inner)
                    } else {
                        write!(f, "NOT {}", inner)
                    }
                }
                LogicalOperator::And | LogicalOperator::Or => {
                    if operands.is_empty() {
                        // Identity elements: empty AND holds, empty OR does not
                        let tautology = *op == LogicalOperator::And;
                        return write!(f, "1 {} 1", if tautology { "=" } else { "<>" });
                    }
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            write!(f, " {} ", op.as_str())?;
                        }
                        let wrap = match op {
                            LogicalOperator::And => operand.is_disjunction(),
                            _ => false,
                        };
                        if wrap {
                            write!(f, "({})", operand)?;
                        } else {
                            write!(f, "{}", operand)?;
                        }
                    }
                    Ok(())
                }
            },
            Expression::Spatial {
                op,
                attribute,
                geometry,
            } => {
                write!(f, "{}(", op.as_str())?;
                write_identifier(f, attribute)?;
                write!(f, ", {})", to_wkt(geometry))
            }
            // An empty set matches nothing
            Expression::IdentifierSet(ids) if ids.is_empty() => write!(f, "1 <> 1"),
            Expression::IdentifierSet(ids) => {
                write!(f, "IN (")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}'", id.replace('\'', "''"))?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Write an attribute name, quoting it when it would not lex as a bare identifier
fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let bare = chars
        .next()
        .map_or(false, |c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && Token::keyword_from_str(name).is_none();
    if bare {
        write!(f, "{}", name)
    } else {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        write!(f, "\"{}\"", escaped)
    }
}
