//! Fakes shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use slamview::{
    api::{MapMetadata, MotorPath, SensorCommand},
    layers::{Polygon, Polyline},
    tiles::TileHandle,
    ui::{Affordances, ControlView, MapView, PoseReadout},
    ConsoleError, LatLng, PhysicalPoint, Pose, RobotApi, RobotState, Result, RunState, TileCoord,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Robot server answering from a script of states; motor commands can be
/// made to fail.
#[derive(Default)]
pub struct ScriptedRobot {
    pub states: Mutex<VecDeque<Result<RobotState>>>,
    pub state_requests: AtomicUsize,
    pub speeds: Mutex<Vec<(f64, f64)>>,
    pub motor_error: Mutex<Option<String>>,
    /// How long the server takes to answer any request
    pub latency: Mutex<Duration>,
}

impl ScriptedRobot {
    pub fn at(&self, x: f64, y: f64) {
        self.states
            .lock()
            .unwrap()
            .push_back(Ok(RobotState::new(Pose::new(x, y, 0.0), RunState::Running)));
    }

    pub fn unreachable(&self) {
        self.states.lock().unwrap().push_back(Err(ConsoleError::Server {
            status: 503,
            body: String::new(),
        }));
    }

    pub fn reject_motor_commands(&self, body: &str) {
        *self.motor_error.lock().unwrap() = Some(body.to_string());
    }

    pub fn answer_after(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    async fn wait(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    pub fn speeds(&self) -> Vec<(f64, f64)> {
        self.speeds.lock().unwrap().clone()
    }
}

fn unsupported<T>() -> Result<T> {
    Err(ConsoleError::Server {
        status: 404,
        body: "not scripted".to_string(),
    })
}

#[async_trait]
impl RobotApi for ScriptedRobot {
    async fn robot_state(&self) -> Result<RobotState> {
        self.state_requests.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unsupported)
    }

    async fn set_motor_speeds(&self, left: f64, right: f64) -> Result<()> {
        self.speeds.lock().unwrap().push((left, right));
        self.wait().await;
        match self.motor_error.lock().unwrap().clone() {
            Some(body) => Err(ConsoleError::Server { status: 417, body }),
            None => Ok(()),
        }
    }

    async fn plan_path_to(&self, _target: PhysicalPoint) -> Result<()> {
        unsupported()
    }

    async fn motor_path(&self) -> Result<Option<MotorPath>> {
        Ok(None)
    }

    async fn follow_path(&self) -> Result<()> {
        unsupported()
    }

    async fn stop_path_following(&self) -> Result<()> {
        unsupported()
    }

    async fn delete_path(&self) -> Result<()> {
        unsupported()
    }

    async fn slam_initialize(&self, _algorithm: &str) -> Result<()> {
        unsupported()
    }

    async fn slam_initialize_from_stored(&self, _filename: &str, _algorithm: &str) -> Result<()> {
        unsupported()
    }

    async fn slam_start(&self) -> Result<()> {
        unsupported()
    }

    async fn slam_stop(&self) -> Result<()> {
        unsupported()
    }

    async fn slam_terminate(&self) -> Result<()> {
        unsupported()
    }

    async fn slam_save(&self, _name: &str, _description: &str) -> Result<()> {
        unsupported()
    }

    async fn map_metadata(&self, _filename: &str) -> Result<MapMetadata> {
        unsupported()
    }

    async fn map_thumbnail(&self, _filename: &str) -> Result<Vec<u8>> {
        unsupported()
    }

    async fn rename_map(&self, _filename: &str, _new_name: &str) -> Result<()> {
        unsupported()
    }

    async fn sensor(&self, _command: SensorCommand, _sensor: &str) -> Result<()> {
        unsupported()
    }

    async fn log_lines(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn rename_sensor_log(&self, _log_name: &str, _new_name: &str) -> Result<()> {
        unsupported()
    }

    async fn delete_sensor_log(&self, _log_name: &str) -> Result<()> {
        unsupported()
    }

    async fn start_log_replay(&self, _log_name: &str) -> Result<()> {
        unsupported()
    }

    async fn stop_log_replay(&self) -> Result<()> {
        unsupported()
    }

    async fn tile(&self, _coord: TileCoord) -> Result<Vec<u8>> {
        unsupported()
    }
}

/// Map page that only counts what it was asked to do
#[derive(Default)]
pub struct CountingPage {
    pub trace_points: AtomicUsize,
    pub readouts: Mutex<Vec<PoseReadout>>,
    pub errors: Mutex<Vec<String>>,
}

impl MapView for CountingPage {
    fn show_pose(&self, readout: &PoseReadout) {
        self.readouts.lock().unwrap().push(*readout);
    }

    fn extend_trace(&self, _point: LatLng) {
        self.trace_points.fetch_add(1, Ordering::SeqCst);
    }

    fn robot_overlay_visible(&self) -> bool {
        true
    }

    fn draw_robot(&self, _robot: &Polygon) {}

    fn follow_enabled(&self) -> bool {
        false
    }

    fn pan_to(&self, _center: LatLng) {}

    fn zoom_by(&self, _delta: i32, _center: LatLng) {}

    fn set_affordances(&self, _affordances: Affordances) {}

    fn draw_path(&self, _path: &Polyline) {}
}

impl ControlView for CountingPage {
    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Tile element that records every URL it was pointed at
#[derive(Default)]
pub struct TileElement {
    pub urls: Mutex<Vec<String>>,
}

impl TileHandle for TileElement {
    fn reload(&self, url: &str) {
        self.urls.lock().unwrap().push(url.to_string());
    }
}
