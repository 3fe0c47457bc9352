//! The robot as seen on the map: outline, trace and planned path.

use crate::{
    api::models::MotorPath,
    core::{
        geo::{PhysicalPoint, Pose},
        projection::EuclideanProjection,
    },
    layers::vector::{LineStyle, Polygon, PolygonStyle, Polyline},
};

/// Robot footprint in its own frame (meters, x forward)
#[derive(Debug, Clone, PartialEq)]
pub struct RobotOutline {
    pub rings: Vec<Vec<PhysicalPoint>>,
    pub style: PolygonStyle,
}

impl Default for RobotOutline {
    /// A 10 × 5 m body with an arrow head marking the front.
    fn default() -> Self {
        let p = PhysicalPoint::new;
        Self {
            rings: vec![
                vec![p(-5.0, -2.5), p(5.0, -2.5), p(5.0, 2.5), p(-5.0, 2.5)],
                vec![p(2.5, -2.5), p(5.0, 0.0), p(2.5, 2.5)],
            ],
            style: PolygonStyle::default(),
        }
    }
}

impl RobotOutline {
    /// Place the outline at `pose`, shift it by the map offset and project it
    /// for the widget.
    pub fn place(
        &self,
        pose: &Pose,
        offset: &PhysicalPoint,
        projection: &EuclideanProjection,
    ) -> Polygon {
        let rings = self
            .rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|local| projection.physical_to_geo(&pose.transform(local).offset_by(offset)))
                    .collect()
            })
            .collect();
        Polygon {
            rings,
            style: self.style.clone(),
        }
    }
}

/// Planned path as a widget polyline, waypoints shifted by the map offset.
pub fn path_polyline(
    path: &MotorPath,
    offset: &PhysicalPoint,
    projection: &EuclideanProjection,
) -> Polyline {
    let mut line = Polyline::new(LineStyle::path());
    for waypoint in path.waypoints() {
        line.push(projection.physical_to_geo(&waypoint.offset_by(offset)));
    }
    line
}
