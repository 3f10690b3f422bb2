//! Envelope pre-filter applied before full predicate evaluation.

use crate::feature::{Envelope, Feature};
use geo_types::Geometry;

/// Whether the feature's geometry envelope overlaps `envelope`.
///
/// A feature without geometry never overlaps.
pub fn overlaps(envelope: &Envelope, feature: &Feature) -> bool {
    geometry_overlaps(envelope, feature.geometry())
}

/// Envelope test on a raw geometry value
pub fn geometry_overlaps(envelope: &Envelope, geometry: Option<&Geometry<f64>>) -> bool {
    match geometry {
        Some(geom) => envelope.intersects(&Envelope::of(geom)),
        None => false,
    }
}

/// Conjunction of envelope checks a row must pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundsPruner {
    /// Every envelope must overlap the geometry's envelope
    envelopes: Vec<Envelope>,
    /// Reject rows whose geometry is NULL even without envelopes
    require_geometry: bool,
}

impl BoundsPruner {
    /// A pruner that accepts everything
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(envelopes: Vec<Envelope>, require_geometry: bool) -> Self {
        Self {
            envelopes,
            require_geometry,
        }
    }

    pub fn envelopes(&self) -> &[Envelope] {
        &self.envelopes
    }

    pub fn requires_geometry(&self) -> bool {
        self.require_geometry || !self.envelopes.is_empty()
    }

    /// True when no row can be rejected
    pub fn is_trivial(&self) -> bool {
        !self.requires_geometry()
    }

    /// Check a row's geometry value.
    ///
    /// Once any bounds apply, an empty geometry is rejected like a NULL one,
    /// since its envelope overlaps nothing.
    pub fn accepts(&self, geometry: Option<&Geometry<f64>>) -> bool {
        if !self.requires_geometry() {
            return true;
        }
        let geom = match geometry {
            Some(geom) => geom,
            None => return false,
        };

        let envelope = Envelope::of(geom);
        !envelope.is_empty() && self.envelopes.iter().all(|e| e.intersects(&envelope))
    }
}
