//! Distance ruler: an editable polyline whose length is read in meters.

use crate::{
    core::{geo::LatLng, projection::EuclideanProjection},
    layers::vector::{LineStyle, Polyline},
    plugins::base::MapPlugin,
};
use geo::EuclideanLength;
use geo_types::LineString;
use std::sync::Mutex;

/// Text shown next to the last ruler point
#[derive(Debug, Clone, PartialEq)]
pub struct RulerReadout {
    pub meters: f64,
    pub anchor: LatLng,
    pub text: String,
}

pub struct Ruler {
    projection: EuclideanProjection,
    line: Mutex<Polyline>,
}

impl Ruler {
    pub fn new(projection: EuclideanProjection) -> Self {
        Self {
            projection,
            line: Mutex::new(Polyline::new(LineStyle::ruler())),
        }
    }

    /// Append a point; returns the updated readout.
    pub fn push(&self, point: LatLng) -> Option<RulerReadout> {
        self.edit(|line| line.push(point))
    }

    /// Move the point at `index`. Out-of-range indices are ignored.
    pub fn set_at(&self, index: usize, point: LatLng) -> Option<RulerReadout> {
        self.edit(|line| {
            if let Some(p) = line.points.get_mut(index) {
                *p = point;
            }
        })
    }

    pub fn remove_at(&self, index: usize) -> Option<RulerReadout> {
        self.edit(|line| {
            if index < line.points.len() {
                line.points.remove(index);
            }
        })
    }

    pub fn clear(&self) {
        if let Ok(mut line) = self.line.lock() {
            line.clear();
        }
    }

    pub fn polyline(&self) -> Polyline {
        self.line.lock().map(|line| line.clone()).unwrap_or_default()
    }

    /// Total length in meters, summed segment by segment in physical space.
    pub fn distance(&self) -> f64 {
        self.line
            .lock()
            .map(|line| self.length_of(&line))
            .unwrap_or(0.0)
    }

    /// `None` while the ruler has no length
    pub fn readout(&self) -> Option<RulerReadout> {
        let line = self.line.lock().ok()?;
        let meters = self.length_of(&line);
        if meters == 0.0 {
            return None;
        }
        Some(RulerReadout {
            meters,
            anchor: line.last()?,
            text: format!("Distance: {} meters", (meters * 100.0).round() / 100.0),
        })
    }

    fn edit(&self, f: impl FnOnce(&mut Polyline)) -> Option<RulerReadout> {
        if let Ok(mut line) = self.line.lock() {
            f(&mut line);
        }
        self.readout()
    }

    fn length_of(&self, line: &Polyline) -> f64 {
        if line.len() < 2 {
            return 0.0;
        }
        let physical: LineString<f64> = line
            .points
            .iter()
            .map(|p| {
                let q = self.projection.geo_to_physical(p);
                (q.x, q.y)
            })
            .collect::<Vec<_>>()
            .into();
        physical.euclidean_length()
    }
}

impl MapPlugin for Ruler {
    fn name(&self) -> &str {
        "ruler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::PhysicalPoint;

    fn ruler() -> (Ruler, EuclideanProjection) {
        let projection = EuclideanProjection::new(100.0).unwrap();
        (Ruler::new(projection.clone()), projection)
    }

    #[test]
    fn test_single_point_has_no_readout() {
        let (ruler, projection) = ruler();
        let readout = ruler.push(projection.physical_to_geo(&PhysicalPoint::new(10.0, 10.0)));
        assert!(readout.is_none());
        assert_eq!(ruler.distance(), 0.0);
    }

    #[test]
    fn test_length_sums_segments_in_meters() {
        let (ruler, projection) = ruler();
        let at = |x, y| projection.physical_to_geo(&PhysicalPoint::new(x, y));
        ruler.push(at(0.0, 0.0));
        ruler.push(at(3.0, 4.0));
        let readout = ruler.push(at(3.0, 10.0)).unwrap();

        assert!((readout.meters - 11.0).abs() < 1e-9);
        assert_eq!(readout.text, "Distance: 11 meters");
        assert_eq!(readout.anchor, at(3.0, 10.0));
    }

    #[test]
    fn test_edits_update_length() {
        let (ruler, projection) = ruler();
        let at = |x, y| projection.physical_to_geo(&PhysicalPoint::new(x, y));
        ruler.push(at(0.0, 0.0));
        ruler.push(at(1.0, 0.0));

        let moved = ruler.set_at(1, at(2.5, 0.0)).unwrap();
        assert_eq!(moved.text, "Distance: 2.5 meters");

        assert!(ruler.remove_at(0).is_none());
        ruler.clear();
        assert!(ruler.polyline().is_empty());
    }
}
