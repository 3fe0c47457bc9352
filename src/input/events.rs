use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Pointer input delivered by the host. Positions are page coordinates; the
/// receiving widget converts them relative to its own element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button pressed
    PointerDown { position: Point },
    /// Mouse moved
    PointerMove { position: Point },
    /// Mouse button released
    PointerUp,
    /// Touch events (multi-touch)
    Touch {
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
    },
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Events raised by the map widget that the console reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Secondary click on the map; opens the context menu
    RightClick { lat_lng: LatLng, pixel: Point },
    /// Primary click anywhere; closes the context menu
    Click { pixel: Point },
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position } => Some(*position),
            InputEvent::PointerMove { position } => Some(*position),
            InputEvent::Touch { touches, .. } => touches.first().map(|t| t.position),
            InputEvent::PointerUp => None,
        }
    }

    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }
}
