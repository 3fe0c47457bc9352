//! Typed access to the robot-control server's JSON API.

pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpRobotApi, RobotApi};
pub use models::{MapDimensions, MapMetadata, MotorPath, RobotState, RunState, SensorCommand};
