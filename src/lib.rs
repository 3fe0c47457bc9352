//! # slamview
//!
//! Client-side core of a robot SLAM control console.
//!
//! The crate projects a square physical world onto a tiled map widget, keeps a
//! registry of live tiles that can be force-refreshed, turns pointer drags into
//! joystick signals, and runs the two timers of the console: the robot state
//! poller and the manual motor command loop. Everything remote goes through the
//! [`api::RobotApi`] seam; everything visible goes through the view traits in
//! [`ui::traits`].

pub mod api;
pub mod background;
pub mod core;
pub mod input;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub mod runtime;
pub mod tiles;
pub mod ui;
pub mod workflows;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::ConsoleConfig,
    geo::{LatLng, PhysicalPoint, Point, Pose, TileCoord},
    projection::EuclideanProjection,
};

pub use api::{HttpRobotApi, RobotApi, RobotState, RunState};

pub use background::{manual::ManualControlLoop, polling::PollingSyncLoop};

pub use input::{easing::Easing, joystick::PointerDragInput};

pub use tiles::{provider::TileProvider, MapTiles};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server answered with a non-2xx status; `body` is its human-readable message.
    #[error("{body}")]
    Server { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

impl ConsoleError {
    /// Text shown to the operator when a request fails.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Server { body, .. } if !body.trim().is_empty() => body.clone(),
            ConsoleError::Server { .. } | ConsoleError::Network(_) => "Lost connection?".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error type alias for convenience
pub type Error = ConsoleError;

/// Install `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
