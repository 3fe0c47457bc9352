//! Recording views used by unit tests.

use crate::{
    core::geo::LatLng,
    layers::vector::{Polygon, Polyline},
    ui::{
        controls::{Affordances, PoseReadout},
        traits::{ControlView, LogView, MapView, ProgressView, Prompt},
    },
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Show(String),
    Progress(f64),
    Hide,
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_progress(&self) -> Option<f64> {
        self.events().iter().rev().find_map(|e| match e {
            ProgressEvent::Progress(p) => Some(*p),
            _ => None,
        })
    }

    pub fn titles(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Show(title) => Some(title),
                _ => None,
            })
            .collect()
    }

    pub fn hidden(&self) -> bool {
        self.events().last() == Some(&ProgressEvent::Hide)
    }
}

impl ProgressView for RecordingProgress {
    fn show(&self, title: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Show(title.to_string()));
    }

    fn set_progress(&self, fraction: f64) {
        self.events
            .lock()
            .unwrap()
            .push(ProgressEvent::Progress(fraction));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(ProgressEvent::Hide);
    }
}

/// Answers every confirmation with `confirm` and every prompt with `answer`
pub struct ScriptedPrompt {
    pub confirm: bool,
    pub answer: Option<String>,
    pub questions: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(confirm: bool, answer: Option<&str>) -> Self {
        Self {
            confirm,
            answer: answer.map(str::to_string),
            questions: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.confirm
    }

    fn prompt(&self, label: &str) -> Option<String> {
        self.questions.lock().unwrap().push(label.to_string());
        self.answer.clone()
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingControl {
    pub errors: Mutex<Vec<String>>,
    pub reloads: AtomicUsize,
}

impl RecordingControl {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl ControlView for RecordingControl {
    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingMap {
    pub robot_visible: AtomicBool,
    pub follow: AtomicBool,
    pub readouts: Mutex<Vec<PoseReadout>>,
    pub trace: Mutex<Vec<LatLng>>,
    pub robots: Mutex<Vec<Polygon>>,
    pub pans: Mutex<Vec<LatLng>>,
    pub zooms: Mutex<Vec<(i32, LatLng)>>,
    pub affordances: Mutex<Vec<Affordances>>,
    pub paths: Mutex<Vec<Polyline>>,
}

impl MapView for RecordingMap {
    fn show_pose(&self, readout: &PoseReadout) {
        self.readouts.lock().unwrap().push(*readout);
    }

    fn extend_trace(&self, point: LatLng) {
        self.trace.lock().unwrap().push(point);
    }

    fn robot_overlay_visible(&self) -> bool {
        self.robot_visible.load(Ordering::SeqCst)
    }

    fn draw_robot(&self, robot: &Polygon) {
        self.robots.lock().unwrap().push(robot.clone());
    }

    fn follow_enabled(&self) -> bool {
        self.follow.load(Ordering::SeqCst)
    }

    fn pan_to(&self, center: LatLng) {
        self.pans.lock().unwrap().push(center);
    }

    fn zoom_by(&self, delta: i32, center: LatLng) {
        self.zooms.lock().unwrap().push((delta, center));
    }

    fn set_affordances(&self, affordances: Affordances) {
        self.affordances.lock().unwrap().push(affordances);
    }

    fn draw_path(&self, path: &Polyline) {
        self.paths.lock().unwrap().push(path.clone());
    }
}

#[derive(Default)]
pub struct RecordingLog {
    pub shown: Mutex<Vec<Vec<String>>>,
}

impl LogView for RecordingLog {
    fn show_log(&self, lines: &[String]) {
        self.shown.lock().unwrap().push(lines.to_vec());
    }
}
