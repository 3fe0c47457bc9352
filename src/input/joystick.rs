//! Virtual joystick driven by pointer or touch drags.
//!
//! A drag starts where the pointer goes down inside the joystick area and the
//! signal is the offset from that start point, normalized by half the area's
//! extent, shaped by an [`Easing`] and reported through a callback as
//! `(vx, vy, is_final)`.

use crate::{
    core::{config::JoystickConfig, geo::Point},
    input::{
        easing::Easing,
        events::{InputEvent, TouchEventType, TouchPoint},
    },
    ConsoleError, Result,
};
use serde::{Deserialize, Serialize};

/// Which axes of the drag produce a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisMode {
    #[serde(rename = "xy")]
    Both,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "y")]
    Y,
}

impl Default for AxisMode {
    fn default() -> Self {
        AxisMode::Both
    }
}

/// The joystick element's rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DragArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !left.is_finite() || !top.is_finite() {
            return Err(ConsoleError::Configuration(format!(
                "malformed joystick area {}x{} at ({}, {})",
                width, height, left, top
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Area of the configured size placed at `(left, top)` on the page.
    pub fn from_config(left: f64, top: f64, config: &JoystickConfig) -> Result<Self> {
        Self::new(left, top, config.width, config.height)
    }

    pub fn contains(&self, page: &Point) -> bool {
        page.x >= self.left
            && page.x <= self.left + self.width
            && page.y >= self.top
            && page.y <= self.top + self.height
    }

    fn to_local(&self, page: &Point) -> Point {
        Point::new(page.x - self.left, page.y - self.top)
    }

    fn clamp_local(&self, local: &Point) -> Point {
        Point::new(local.x.clamp(0.0, self.width), local.y.clamp(0.0, self.height))
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One drag, from pointer-down to pointer-up. Positions are relative to the area.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub origin: Point,
    pub current: Point,
    pub delta: Point,
    pub previous_delta: Point,
    /// Touch contact being followed; `None` for mouse drags
    touch_id: Option<u64>,
}

impl DragSession {
    fn start(origin: Point, touch_id: Option<u64>) -> Self {
        Self {
            origin,
            current: origin,
            delta: Point::default(),
            previous_delta: Point::default(),
            touch_id,
        }
    }

    fn direction_changed(&self) -> bool {
        let (o, c, d, p) = (self.origin, self.current, self.delta, self.previous_delta);
        (o.x < c.x && p.x > d.x)
            || (o.x > c.x && p.x < d.x)
            || (o.y < c.y && p.y > d.y)
            || (o.y > c.y && p.y < d.y)
    }
}

/// Value handed to the signal callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickSignal {
    pub vx: f64,
    pub vy: f64,
    pub is_final: bool,
}

pub type SignalCallback = Box<dyn FnMut(f64, f64, bool) + Send>;

pub struct PointerDragInput {
    area: DragArea,
    easing: Easing,
    axis: AxisMode,
    max_value: f64,
    invert: bool,
    reset_on_direction_change: bool,
    session: Option<DragSession>,
    callback: Option<SignalCallback>,
}

impl PointerDragInput {
    /// Build a joystick over `area`. Fails on an unknown easing name.
    pub fn new(area: DragArea, config: &JoystickConfig) -> Result<Self> {
        let easing = config.easing()?;
        Ok(Self {
            area,
            easing,
            axis: config.axis,
            max_value: config.max_value,
            invert: config.invert,
            reset_on_direction_change: config.reset_on_direction_change,
            session: None,
            callback: None,
        })
    }

    pub fn on_signal(mut self, callback: impl FnMut(f64, f64, bool) + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// The element moved on the page; takes effect at the next pointer-down.
    pub fn set_area(&mut self, area: DragArea) {
        self.area = area;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Delta over half the area extent, clamped to [-1, 1], before easing.
    pub fn raw_ratio(&self) -> Option<Point> {
        self.session.as_ref().map(|s| self.normalize(&s.delta))
    }

    /// Segment a host draws under the finger, in area coordinates.
    pub fn guide_segment(&self) -> Option<(Point, Point)> {
        let s = self.session.as_ref()?;
        let center = self.area.center();
        Some(match self.axis {
            AxisMode::X => (Point::new(s.origin.x, center.y), Point::new(s.current.x, center.y)),
            AxisMode::Y => (Point::new(center.x, s.origin.y), Point::new(center.x, s.current.y)),
            AxisMode::Both => (s.origin, s.current),
        })
    }

    /// Feed one host event; returns the signal it produced, if any.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<JoystickSignal> {
        match event {
            InputEvent::PointerDown { position } => {
                self.begin(position, None);
                None
            }
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Touch {
                event_type,
                touches,
            } => self.handle_touch(*event_type, touches),
        }
    }

    /// Start a drag if `page` is inside the area. Returns whether it started.
    pub fn pointer_down(&mut self, page: &Point) -> bool {
        self.begin(page, None)
    }

    pub fn pointer_move(&mut self, page: &Point) -> Option<JoystickSignal> {
        let local = self.area.clamp_local(&self.area.to_local(page));
        let session = self.session.as_mut()?;

        session.current = local;
        session.previous_delta = session.delta;
        session.delta = session.current.subtract(&session.origin);

        if self.reset_on_direction_change && session.direction_changed() {
            session.origin = session.current;
            session.delta = Point::default();
            session.previous_delta = Point::default();
        }

        let delta = session.delta;
        let (vx, vy) = self.shape(&delta);
        Some(self.emit(vx, vy, false))
    }

    pub fn pointer_up(&mut self) -> Option<JoystickSignal> {
        self.session.take()?;
        Some(self.emit(0.0, 0.0, true))
    }

    fn begin(&mut self, page: &Point, touch_id: Option<u64>) -> bool {
        if self.session.is_some() || !self.area.contains(page) {
            return false;
        }
        self.session = Some(DragSession::start(self.area.to_local(page), touch_id));
        true
    }

    fn handle_touch(
        &mut self,
        event_type: TouchEventType,
        touches: &[TouchPoint],
    ) -> Option<JoystickSignal> {
        match event_type {
            TouchEventType::Start => {
                if let Some(first) = touches.first() {
                    self.begin(&first.position, Some(first.id));
                }
                None
            }
            TouchEventType::Move => {
                let tracked = self.session.as_ref()?.touch_id;
                let touch = touches.iter().find(|t| Some(t.id) == tracked)?;
                let position = touch.position;
                self.pointer_move(&position)
            }
            TouchEventType::End | TouchEventType::Cancel => {
                let tracked = self.session.as_ref()?.touch_id;
                if touches.iter().any(|t| Some(t.id) == tracked) {
                    self.pointer_up()
                } else {
                    None
                }
            }
        }
    }

    fn normalize(&self, delta: &Point) -> Point {
        let half_w = self.area.width / 2.0;
        let half_h = self.area.height / 2.0;
        Point::new(
            (delta.x / half_w).clamp(-1.0, 1.0),
            (delta.y / half_h).clamp(-1.0, 1.0),
        )
    }

    fn shape(&self, delta: &Point) -> (f64, f64) {
        let n = self.normalize(delta);
        let mut vx = self.easing.apply(n.x) * self.max_value;
        let mut vy = self.easing.apply(n.y) * self.max_value;

        if self.invert {
            vx = -vx;
            vy = -vy;
        }

        match self.axis {
            AxisMode::X => vy = 0.0,
            AxisMode::Y => vx = 0.0,
            AxisMode::Both => {}
        }
        (vx, vy)
    }

    fn emit(&mut self, vx: f64, vy: f64, is_final: bool) -> JoystickSignal {
        if let Some(callback) = self.callback.as_mut() {
            callback(vx, vy, is_final);
        }
        JoystickSignal { vx, vy, is_final }
    }
}
