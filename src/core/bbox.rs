//! Axis-aligned bounding box arithmetic shared by the bbox builder,
//! the raster inspector, and the batch cutter.
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in whatever CRS the caller is working in
/// (meters for UTM, degrees for WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Box of the given width/height centered on (x, y).
    pub fn from_centroid(x: f64, y: f64, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            west: x - half_w,
            east: x + half_w,
            south: y - half_h,
            north: y + half_h,
        }
    }

    /// Envelope of an arbitrary corner list. Empty input has no envelope.
    pub fn from_corners(corners: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = corners.split_first()?;
        let mut bbox = Self::new(first.0, first.1, first.0, first.1);
        for &(x, y) in rest {
            bbox.west = bbox.west.min(x);
            bbox.east = bbox.east.max(x);
            bbox.south = bbox.south.min(y);
            bbox.north = bbox.north.max(y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    /// Corners in the order the exporters expect:
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.west, self.north),
            (self.east, self.north),
            (self.east, self.south),
            (self.west, self.south),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_box_is_symmetric() {
        let bbox = BoundingBox::from_centroid(500_000.0, 4_300_000.0, 1000.0, 600.0);
        assert_eq!(bbox.west, 499_500.0);
        assert_eq!(bbox.east, 500_500.0);
        assert_eq!(bbox.south, 4_299_700.0);
        assert_eq!(bbox.north, 4_300_300.0);
        let (cx, cy) = bbox.center();
        assert_eq!(cx, 500_000.0);
        assert_eq!(cy, 4_300_000.0);
        assert_eq!(bbox.width(), 1000.0);
        assert_eq!(bbox.height(), 600.0);
    }

    #[test]
    fn corners_are_tl_tr_br_bl() {
        let bbox = BoundingBox::new(0.0, 10.0, 20.0, 30.0);
        assert_eq!(
            bbox.corners(),
            [(0.0, 30.0), (20.0, 30.0), (20.0, 10.0), (0.0, 10.0)]
        );
    }

    #[test]
    fn envelope_from_unordered_corners() {
        let corners = [(3.0, -1.0), (-2.0, 4.0), (0.5, 0.5)];
        let bbox = BoundingBox::from_corners(&corners).unwrap();
        assert_eq!(bbox.west, -2.0);
        assert_eq!(bbox.east, 3.0);
        assert_eq!(bbox.south, -1.0);
        assert_eq!(bbox.north, 4.0);
        assert!(BoundingBox::from_corners(&[]).is_none());
    }
}
