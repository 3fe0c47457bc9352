use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Coordinate understood by the map widget. For the SLAM map it carries no
/// geographic meaning; it is only the widget-facing side of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in tile pixel space (256×256, y grows downward) or on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A point in the robot's world, in meters, origin at the world corner, y up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysicalPoint {
    pub x: f64,
    pub y: f64,
}

impl PhysicalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_by(&self, offset: &PhysicalPoint) -> PhysicalPoint {
        PhysicalPoint::new(self.x + offset.x, self.y + offset.y)
    }

    pub fn distance_to(&self, other: &PhysicalPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Robot pose as reported by the server: meters and radians.
///
/// Field names follow the server's JSON (`X`, `Y`, `Theta`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Theta", default)]
    pub theta: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    pub fn position(&self) -> PhysicalPoint {
        PhysicalPoint::new(self.x, self.y)
    }

    /// Moves a point given in the robot frame into the world frame.
    pub fn transform(&self, local: &PhysicalPoint) -> PhysicalPoint {
        let (sin, cos) = self.theta.sin_cos();
        PhysicalPoint::new(
            local.x * cos - local.y * sin + self.x,
            local.x * sin + local.y * cos + self.y,
        )
    }

    /// Heading normalized to (−π, π].
    pub fn heading(&self) -> f64 {
        normalize_angle(self.theta)
    }
}

/// Normalizes an angle in radians to (−π, π].
pub fn normalize_angle(rad: f64) -> f64 {
    let mut a = rad % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Converts radians to degrees in (−180, 180].
pub fn rad_to_display_deg(rad: f64) -> f64 {
    normalize_angle(rad).to_degrees()
}

/// Rounds to two decimals, as shown in the sidebar readouts.
pub fn two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Represents a tile address in the SLAM tile grid.
///
/// Coordinates are signed because the widget asks for tiles left of and above
/// the world; such addresses are simply out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: i64, y: i64, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom level
    pub fn tile_range(&self) -> i64 {
        1_i64 << self.z.min(62)
    }

    /// Checks if the tile exists at its zoom level; the grid does not wrap.
    pub fn is_valid(&self) -> bool {
        let range = self.tile_range();
        self.x >= 0 && self.x < range && self.y >= 0 && self.y < range
    }

    /// Registry key of the tile, `x{x}y{y}z{zoom}`.
    pub fn tile_id(&self) -> String {
        format!("x{}y{}z{}", self.x, self.y, self.z)
    }
}
