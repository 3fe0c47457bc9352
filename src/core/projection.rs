//! Euclidean projection between the robot's physical world, tile pixels and
//! the map widget's lat/lng plane.
//!
//! The widget only understands [`LatLng`]. The SLAM world is a flat square of
//! `world_size` meters drawn onto one 256 px base tile, so the projection is a
//! pair of affine maps with no clamping anywhere.

use crate::{
    core::{
        constants::TILE_SIZE,
        geo::{LatLng, PhysicalPoint, Point},
    },
    ConsoleError, Result,
};

const EUCLIDEAN_RANGE: f64 = TILE_SIZE as f64;

#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanProjection {
    world_size: f64,
    pixel_origin: Point,
    pixels_per_lng_degree: f64,
    /// Vertical multiplication factor
    scale_lat: f64,
    /// Horizontal multiplication factor
    scale_lng: f64,
    offset_lat: f64,
    offset_lng: f64,
}

impl EuclideanProjection {
    /// Create a projection for a square world of `world_size` meters.
    pub fn new(world_size: f64) -> Result<Self> {
        if !(world_size.is_finite() && world_size > 0.0) {
            return Err(ConsoleError::Configuration(format!(
                "world size must be a positive number of meters, got {}",
                world_size
            )));
        }

        Ok(Self {
            world_size,
            pixel_origin: Point::new(EUCLIDEAN_RANGE / 2.0, EUCLIDEAN_RANGE / 2.0),
            pixels_per_lng_degree: EUCLIDEAN_RANGE / 360.0,
            scale_lat: 2.0,
            scale_lng: 1.0,
            offset_lat: 0.0,
            offset_lng: 0.0,
        })
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    /// Physical meters (y up) to tile pixels (y down).
    pub fn physical_to_tile(&self, p: &PhysicalPoint) -> Point {
        Point::new(
            p.x * EUCLIDEAN_RANGE / self.world_size,
            (self.world_size - p.y) * EUCLIDEAN_RANGE / self.world_size,
        )
    }

    pub fn tile_to_physical(&self, t: &Point) -> PhysicalPoint {
        PhysicalPoint::new(
            t.x * self.world_size / EUCLIDEAN_RANGE,
            self.world_size - t.y * self.world_size / EUCLIDEAN_RANGE,
        )
    }

    pub fn tile_to_geo(&self, t: &Point) -> LatLng {
        let origin = self.pixel_origin;
        let lng = ((t.x - origin.x) / self.pixels_per_lng_degree) / self.scale_lng - self.offset_lng;
        let lat = ((t.y - origin.y) / self.pixels_per_lng_degree) / self.scale_lat - self.offset_lat;
        LatLng::new(lat, lng)
    }

    pub fn geo_to_tile(&self, g: &LatLng) -> Point {
        let origin = self.pixel_origin;
        Point::new(
            origin.x + (g.lng + self.offset_lng) * self.scale_lng * self.pixels_per_lng_degree,
            origin.y + (g.lat + self.offset_lat) * self.scale_lat * self.pixels_per_lng_degree,
        )
    }

    pub fn physical_to_geo(&self, p: &PhysicalPoint) -> LatLng {
        self.tile_to_geo(&self.physical_to_tile(p))
    }

    pub fn geo_to_physical(&self, g: &LatLng) -> PhysicalPoint {
        self.tile_to_physical(&self.geo_to_tile(g))
    }

    /// Geo point of the world's center, where the map opens.
    pub fn world_center(&self) -> LatLng {
        let half = self.world_size / 2.0;
        self.physical_to_geo(&PhysicalPoint::new(half, half))
    }
}
