//! Axis-aligned bounding rectangles.

use geo_types::{coord, Geometry, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding box in dataset coordinates.
///
/// An envelope may be empty (covers nothing), which is represented with
/// inverted infinite bounds so that `expand_to_include` works from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Create an envelope from its corners. Swapped coordinates are normalized.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// The empty envelope
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Bounding envelope of a geometry (empty for empty geometries)
    pub fn of(geom: &Geometry<f64>) -> Self {
        super::geometry::geometry_envelope(geom)
    }

    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_y <= self.max_y)
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Check if this envelope overlaps another (touching counts).
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Check if this envelope fully contains another.
    pub fn contains(&self, other: &Envelope) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x <= other.min_x
            && self.max_x >= other.max_x
            && self.min_y <= other.min_y
            && self.max_y >= other.max_y
    }

    /// Grow this envelope to cover another.
    pub fn expand_to_include(&mut self, other: &Envelope) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Union of two envelopes
    pub fn union(&self, other: &Envelope) -> Envelope {
        let mut out = *self;
        out.expand_to_include(other);
        out
    }

    /// Overlap of two envelopes; empty when they are disjoint
    pub fn intersection(&self, other: &Envelope) -> Envelope {
        if !self.intersects(other) {
            return Envelope::empty();
        }
        Envelope {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    /// Rectangle polygon covering this envelope, `None` when empty.
    pub fn to_polygon(&self) -> Option<Polygon<f64>> {
        if self.is_empty() {
            return None;
        }
        let rect = Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        );
        Some(rect.to_polygon())
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "EMPTY")
        } else {
            write!(
                f,
                "[{}, {}, {}, {}]",
                self.min_x, self.min_y, self.max_x, self.max_y
            )
        }
    }
}
