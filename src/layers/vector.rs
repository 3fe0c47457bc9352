//! Vector overlays drawn on top of the SLAM tiles.
//!
//! These are plain data handed to the map view; the view decides how to paint
//! them.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` for hosts that style with CSS
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: SerializableColor,
    pub width: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
}

impl LineStyle {
    /// Red, 1 px: the robot's trace
    pub fn trace() -> Self {
        Self {
            color: SerializableColor::rgb(255, 0, 0),
            width: 1.0,
            opacity: 1.0,
        }
    }

    /// Green, 1 px: the planned path
    pub fn path() -> Self {
        Self {
            color: SerializableColor::rgb(0, 255, 0),
            width: 1.0,
            opacity: 1.0,
        }
    }

    /// Green, 3 px: the measuring ruler
    pub fn ruler() -> Self {
        Self {
            color: SerializableColor::rgb(0, 255, 0),
            width: 3.0,
            opacity: 1.0,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::trace()
    }
}

/// Style for polygon features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: SerializableColor,
    pub stroke_color: SerializableColor,
    pub stroke_width: f32,
    pub fill_opacity: f32,
    pub stroke_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: SerializableColor::rgb(0, 0, 255),
            stroke_color: SerializableColor::rgb(0, 0, 255),
            stroke_width: 0.2,
            fill_opacity: 0.1,
            stroke_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<LatLng>,
    pub style: LineStyle,
}

impl Polyline {
    pub fn new(style: LineStyle) -> Self {
        Self {
            points: Vec::new(),
            style,
        }
    }

    pub fn push(&mut self, point: LatLng) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<LatLng> {
        self.points.last().copied()
    }
}

/// A polygon made of one or more closed rings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub rings: Vec<Vec<LatLng>>,
    pub style: PolygonStyle,
}
