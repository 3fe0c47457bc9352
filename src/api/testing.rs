//! In-memory [`RobotApi`] used by unit tests.

use crate::{
    api::{
        client::RobotApi,
        models::{MapMetadata, MotorPath, RobotState, RunState, SensorCommand},
    },
    core::geo::{PhysicalPoint, Pose, TileCoord},
    ConsoleError, Result,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeRobotApi {
    calls: Mutex<Vec<String>>,
    states: Mutex<VecDeque<Result<RobotState>>>,
    failures: Mutex<Vec<(String, String)>>,
    pub path: Mutex<Option<MotorPath>>,
    pub metadata: Mutex<MapMetadata>,
    pub log: Mutex<Vec<String>>,
}

impl FakeRobotApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a pose answer for `robot_state`
    pub fn push_state(&self, x: f64, y: f64, state: RunState) {
        self.states
            .lock()
            .unwrap()
            .push_back(Ok(RobotState::new(Pose::new(x, y, 0.0), state)));
    }

    pub fn push_state_error(&self) {
        self.states.lock().unwrap().push_back(Err(server_error("")));
    }

    /// Make every call whose name starts with `call` fail with `body`
    pub fn fail(&self, call: &str, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((call.to_string(), body.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(name))
    }

    fn record(&self, call: String) -> Result<()> {
        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| call.starts_with(name.as_str()))
            .map(|(_, body)| body.clone());
        self.calls.lock().unwrap().push(call);
        match failure {
            Some(body) => Err(server_error(&body)),
            None => Ok(()),
        }
    }
}

fn server_error(body: &str) -> ConsoleError {
    ConsoleError::Server {
        status: 500,
        body: body.to_string(),
    }
}

#[async_trait]
impl RobotApi for FakeRobotApi {
    async fn robot_state(&self) -> Result<RobotState> {
        self.record("robot_state".into())?;
        self.states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RobotState::new(Pose::default(), RunState::Stopped)))
    }

    async fn set_motor_speeds(&self, left: f64, right: f64) -> Result<()> {
        self.record(format!("set_motor_speeds {:.4} {:.4}", left, right))
    }

    async fn plan_path_to(&self, target: PhysicalPoint) -> Result<()> {
        self.record(format!("plan_path_to {:.2} {:.2}", target.x, target.y))
    }

    async fn motor_path(&self) -> Result<Option<MotorPath>> {
        self.record("motor_path".into())?;
        Ok(self.path.lock().unwrap().clone())
    }

    async fn follow_path(&self) -> Result<()> {
        self.record("follow_path".into())
    }

    async fn stop_path_following(&self) -> Result<()> {
        self.record("stop_path_following".into())
    }

    async fn delete_path(&self) -> Result<()> {
        self.record("delete_path".into())
    }

    async fn slam_initialize(&self, algorithm: &str) -> Result<()> {
        self.record(format!("slam_initialize {}", algorithm))
    }

    async fn slam_initialize_from_stored(&self, filename: &str, algorithm: &str) -> Result<()> {
        self.record(format!("slam_initialize_from_stored {} {}", filename, algorithm))
    }

    async fn slam_start(&self) -> Result<()> {
        self.record("slam_start".into())
    }

    async fn slam_stop(&self) -> Result<()> {
        self.record("slam_stop".into())
    }

    async fn slam_terminate(&self) -> Result<()> {
        self.record("slam_terminate".into())
    }

    async fn slam_save(&self, name: &str, description: &str) -> Result<()> {
        self.record(format!("slam_save {} {}", name, description))
    }

    async fn map_metadata(&self, filename: &str) -> Result<MapMetadata> {
        self.record(format!("map_metadata {}", filename))?;
        Ok(self.metadata.lock().unwrap().clone())
    }

    async fn map_thumbnail(&self, filename: &str) -> Result<Vec<u8>> {
        self.record(format!("map_thumbnail {}", filename))?;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn rename_map(&self, filename: &str, new_name: &str) -> Result<()> {
        self.record(format!("rename_map {} {}", filename, new_name))
    }

    async fn sensor(&self, command: SensorCommand, sensor: &str) -> Result<()> {
        self.record(format!("sensor {:?} {}", command, sensor))
    }

    async fn log_lines(&self) -> Result<Vec<String>> {
        self.record("log_lines".into())?;
        Ok(self.log.lock().unwrap().clone())
    }

    async fn rename_sensor_log(&self, log_name: &str, new_name: &str) -> Result<()> {
        self.record(format!("rename_sensor_log {} {}", log_name, new_name))
    }

    async fn delete_sensor_log(&self, log_name: &str) -> Result<()> {
        self.record(format!("delete_sensor_log {}", log_name))
    }

    async fn start_log_replay(&self, log_name: &str) -> Result<()> {
        self.record(format!("start_log_replay {}", log_name))
    }

    async fn stop_log_replay(&self) -> Result<()> {
        self.record("stop_log_replay".into())
    }

    async fn tile(&self, coord: TileCoord) -> Result<Vec<u8>> {
        self.record(format!("tile {}", coord.tile_id()))?;
        Ok(coord.tile_id().into_bytes())
    }
}
