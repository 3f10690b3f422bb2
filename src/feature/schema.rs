//! Attribute descriptors for a dataset.

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Geometry type discriminator for the geometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum GeometryKind {
    Point = 0,
    LineString = 1,
    Polygon = 2,
    MultiPoint = 3,
    MultiLineString = 4,
    MultiPolygon = 5,
    GeometryCollection = 6,
    /// Any geometry type (mixed layers)
    Any = 7,
}

impl GeometryKind {
    /// Classify a geo-types Geometry.
    pub fn from_geometry(geom: &Geometry<f64>) -> Self {
        match geom {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) | Geometry::Line(_) => GeometryKind::LineString,
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                GeometryKind::Polygon
            }
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Whether a geometry may be stored in a field of this kind.
    ///
    /// Multi-kinds also accept their single counterpart, so a MultiPolygon
    /// layer can hold plain polygons.
    pub fn accepts(&self, geom: &Geometry<f64>) -> bool {
        let actual = GeometryKind::from_geometry(geom);
        match self {
            GeometryKind::Any => true,
            GeometryKind::MultiPoint => {
                matches!(actual, GeometryKind::MultiPoint | GeometryKind::Point)
            }
            GeometryKind::MultiLineString => matches!(
                actual,
                GeometryKind::MultiLineString | GeometryKind::LineString
            ),
            GeometryKind::MultiPolygon => {
                matches!(actual, GeometryKind::MultiPolygon | GeometryKind::Polygon)
            }
            kind => *kind == actual,
        }
    }
}

/// Value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Float,
    Text,
    Geometry(GeometryKind),
}

impl FieldType {
    pub fn is_geometry(&self) -> bool {
        matches!(self, FieldType::Geometry(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => write!(f, "Integer"),
            FieldType::Float => write!(f, "Float"),
            FieldType::Text => write!(f, "Text"),
            FieldType::Geometry(kind) => write!(f, "Geometry({:?})", kind),
        }
    }
}

/// A single attribute descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Errors raised while building a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Schema has no fields")]
    Empty,

    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Schema has no geometry field")]
    MissingGeometry,

    #[error("Schema has more than one geometry field: {first} and {second}")]
    MultipleGeometries { first: String, second: String },
}

/// Ordered attribute descriptors with exactly one geometry field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Field>", into = "Vec<Field>")]
pub struct Schema {
    fields: Vec<Field>,
    geometry_index: usize,
}

impl Schema {
    /// Build a schema, validating name uniqueness and the geometry field.
    pub fn new(fields: Vec<Field>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        let mut geometry_index = None;
        for (i, field) in fields.iter().enumerate() {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if field.field_type.is_geometry() {
                if let Some(first) = geometry_index {
                    let first: &Field = &fields[first];
                    return Err(SchemaError::MultipleGeometries {
                        first: first.name.clone(),
                        second: field.name.clone(),
                    });
                }
                geometry_index = Some(i);
            }
        }

        let geometry_index = geometry_index.ok_or(SchemaError::MissingGeometry)?;
        Ok(Self {
            fields,
            geometry_index,
        })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The designated geometry field
    pub fn geometry(&self) -> &Field {
        &self.fields[self.geometry_index]
    }

    pub fn geometry_index(&self) -> usize {
        self.geometry_index
    }

    /// Position of the named field
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl TryFrom<Vec<Field>> for Schema {
    type Error = SchemaError;

    fn try_from(fields: Vec<Field>) -> Result<Self, Self::Error> {
        Schema::new(fields)
    }
}

impl From<Schema> for Vec<Field> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}
