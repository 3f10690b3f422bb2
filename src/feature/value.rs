use crate::feature::geometry::to_wkt;
use crate::feature::schema::FieldType;
use geo_types::Geometry;
use std::fmt;

/// Attribute values carried by a feature
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Geometry(Geometry<f64>),
}

impl Value {
    /// Whether this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value can be stored in a field of the given type
    pub fn is_compatible_with(&self, field_type: FieldType) -> bool {
        match (self, field_type) {
            (Value::Null, _) => true, // NULL is compatible with any type
            (Value::Integer(_), FieldType::Integer) => true,
            (Value::Integer(_), FieldType::Float) => true,
            (Value::Float(_), FieldType::Float) => true,
            (Value::Text(_), FieldType::Text) => true,
            (Value::Geometry(geom), FieldType::Geometry(kind)) => kind.accepts(geom),
            _ => false,
        }
    }

    /// Numeric view of this value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&Geometry<f64>> {
        match self {
            Value::Geometry(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Geometry(g) => write!(f, "{}", to_wkt(g)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Geometry<f64>> for Value {
    fn from(value: Geometry<f64>) -> Self {
        Value::Geometry(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
