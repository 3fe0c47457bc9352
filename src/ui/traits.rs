//! What the console needs from the page it runs in.
//!
//! Every component receives the views it touches at construction; nothing is
//! looked up globally. Implementations are expected to be cheap and
//! non-blocking since they are called from timer callbacks.

use crate::{
    core::geo::LatLng,
    layers::vector::{Polygon, Polyline},
    ui::controls::{Affordances, PoseReadout},
};

/// The map widget and the sidebar next to it
pub trait MapView: Send + Sync {
    fn show_pose(&self, readout: &PoseReadout);

    /// Append one point to the trace polyline
    fn extend_trace(&self, point: LatLng);

    /// Whether the robot overlay toggle is on
    fn robot_overlay_visible(&self) -> bool;

    /// Replace the robot outline
    fn draw_robot(&self, robot: &Polygon);

    /// Whether the follow-robot toggle is on
    fn follow_enabled(&self) -> bool;

    fn pan_to(&self, center: LatLng);

    /// Change the zoom level by `delta` and center on `center`
    fn zoom_by(&self, delta: i32, center: LatLng);

    fn set_affordances(&self, affordances: Affordances);

    /// Replace the planned path
    fn draw_path(&self, path: &Polyline);
}

/// Inline status line of a control panel
pub trait ControlView: Send + Sync {
    fn show_error(&self, message: &str);

    /// The server changed state under the page; re-read everything.
    fn reload(&self) {}
}

/// Blocking operator dialogs
pub trait Prompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;

    /// `None` when the operator cancels
    fn prompt(&self, label: &str) -> Option<String>;

    fn alert(&self, message: &str);
}

/// Modal progress bar
pub trait ProgressView: Send + Sync {
    fn show(&self, title: &str);

    /// `fraction` in [0, 1]
    fn set_progress(&self, fraction: f64);

    fn hide(&self);
}

/// Server log panel
pub trait LogView: Send + Sync {
    /// `lines` newest first
    fn show_log(&self, lines: &[String]);
}
