use crate::core::geo::{PhysicalPoint, Pose};
use serde::{Deserialize, Serialize};

/// Run state of the SLAM process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "STOPPED")]
    Stopped,
    /// Anything else the server might report; affordances are left as they are
    #[serde(other)]
    Unknown,
}

/// Body of `get/slam/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    pub position: Pose,
    pub state: RunState,
    #[serde(rename = "motorState", default)]
    pub motor_state: Option<String>,
    #[serde(rename = "motorPathID", default)]
    pub motor_path_id: Option<i64>,
}

impl RobotState {
    pub fn new(position: Pose, state: RunState) -> Self {
        Self {
            position,
            state,
            motor_state: None,
            motor_path_id: None,
        }
    }
}

/// Planned path as returned by `get/motor/path`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotorPath {
    /// `[x, y]` or `[x, y, theta]` per waypoint
    #[serde(rename = "Poses", default)]
    pub poses: Vec<Vec<f64>>,
    #[serde(rename = "ID", default)]
    pub id: i64,
}

impl MotorPath {
    /// Waypoints in physical coordinates; malformed entries are skipped.
    pub fn waypoints(&self) -> Vec<PhysicalPoint> {
        self.poses
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| PhysicalPoint::new(p[0], p[1]))
            .collect()
    }
}

/// Grid properties stored alongside a map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapDimensions {
    #[serde(rename = "CellLength", default)]
    pub cell_length: f64,
    #[serde(rename = "MapDimensions", default)]
    pub map_dimensions: [i64; 2],
    #[serde(rename = "TopLeftOffset", default)]
    pub top_left_offset: [f64; 2],
}

impl MapDimensions {
    /// Physical extent in meters along x and y
    pub fn lengths(&self) -> (f64, f64) {
        (
            self.map_dimensions[0] as f64 * self.cell_length,
            self.map_dimensions[1] as f64 * self.cell_length,
        )
    }
}

/// Body of `get/mapstorage/metadata`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapMetadata {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Mdp", default)]
    pub dimensions: Option<MapDimensions>,
    #[serde(rename = "MapType", default)]
    pub map_type: String,
    #[serde(rename = "IsMapRepSingleMap", default)]
    pub single_map: bool,
}

/// Actions available on a single sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorCommand {
    Connect,
    Disconnect,
    Start,
    Stop,
}

impl SensorCommand {
    pub fn action(&self) -> &'static str {
        match self {
            SensorCommand::Connect => "set/sensors/connect",
            SensorCommand::Disconnect => "set/sensors/disconnect",
            SensorCommand::Start => "set/sensors/start",
            SensorCommand::Stop => "set/sensors/stop",
        }
    }
}
