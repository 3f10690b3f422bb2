//! Geometry primitives backed by the `geo` crate.
//!
//! The query engine never implements topology itself; envelope computation,
//! intersection and WKT conversion are delegated here.

use crate::feature::envelope::Envelope;
use geo::{BoundingRect, Intersects};
use geo_types::Geometry;
use std::str::FromStr;
use thiserror::Error;
use wkt::ToWkt;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("WKT parse error: {0}")]
    WktParse(String),
}

/// Parse WKT string to geo-types Geometry.
pub fn parse_wkt(text: &str) -> Result<Geometry<f64>, GeometryError> {
    wkt::Wkt::from_str(text)
        .map_err(|e| GeometryError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| GeometryError::WktParse(format!("{:?}", e)))
        })
}

/// Render a geometry as WKT.
pub fn to_wkt(geom: &Geometry<f64>) -> String {
    geom.wkt_string()
}

/// Bounding envelope of a geometry; empty collections yield an empty envelope.
pub fn geometry_envelope(geom: &Geometry<f64>) -> Envelope {
    match geom.bounding_rect() {
        Some(rect) => Envelope::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y),
        None => Envelope::empty(),
    }
}

/// Topological intersection test (shared boundary counts).
pub fn geometry_intersects(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_polygon() {
        let geom = parse_wkt("POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))").unwrap();
        assert!(matches!(geom, Geometry::Polygon(_)));

        // Space between tag and rings, negative coordinates
        let geom = parse_wkt("POLYGON ((-106.6 25.8, -106.6 36.4, -93.5 36.4, -106.6 25.8))")
            .unwrap();
        assert!(matches!(geom, Geometry::Polygon(_)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_wkt("POLYGON((0 0, 1 0"),
            Err(GeometryError::WktParse(_))
        ));
        assert!(parse_wkt("CIRCLE(0 0, 1)").is_err());
    }

    #[test]
    fn test_wkt_roundtrip() {
        let geom = parse_wkt("LINESTRING(0 0, 2.5 -1)").unwrap();
        let reparsed = parse_wkt(&to_wkt(&geom)).unwrap();
        assert_eq!(geom, reparsed);
    }

    #[test]
    fn test_envelope_computation() {
        let geom = parse_wkt("POLYGON((0 0, 10 0, 10 20, 0 20, 0 0))").unwrap();
        assert_eq!(geometry_envelope(&geom), Envelope::new(0.0, 0.0, 10.0, 20.0));

        let point = parse_wkt("POINT(3 4)").unwrap();
        assert_eq!(geometry_envelope(&point), Envelope::new(3.0, 4.0, 3.0, 4.0));
    }

    #[test]
    fn test_intersects_is_topological() {
        // Triangle in the lower-left half of the unit square
        let triangle = parse_wkt("POLYGON((0 0, 10 0, 0 10, 0 0))").unwrap();
        // Box in the upper-right corner: envelopes overlap, shapes do not
        let corner = parse_wkt("POLYGON((8 8, 10 8, 10 10, 8 10, 8 8))").unwrap();
        assert!(geometry_envelope(&triangle).intersects(&geometry_envelope(&corner)));
        assert!(!geometry_intersects(&triangle, &corner));

        let inside = parse_wkt("POINT(1 1)").unwrap();
        assert!(geometry_intersects(&triangle, &inside));
        assert!(geometry_intersects(&inside, &triangle));
    }
}
