//! Prelude module for common slamview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use slamview::prelude::*;`

pub use crate::core::{
    config::{
        ConsoleConfig, JoystickConfig, ManualControlConfig, MapConfig, PollingConfig,
        ServerConfig, WorkflowTimingConfig,
    },
    geo::{LatLng, PhysicalPoint, Point, Pose, TileCoord},
    projection::EuclideanProjection,
};

pub use crate::api::{
    HttpRobotApi, MapMetadata, MotorPath, RobotApi, RobotState, RunState, SensorCommand,
};

pub use crate::background::{differential, ManualControlLoop, PollingSyncLoop};

pub use crate::input::{
    AxisMode, DragArea, Easing, InputEvent, JoystickSignal, MapEvent, PointerDragInput,
    TouchEventType, TouchPoint,
};

pub use crate::layers::{Polygon, Polyline, RobotOutline};

pub use crate::plugins::{ContextAction, ContextMenu, MapPlugin, Ruler};

pub use crate::runtime::{runtime, spawn, spawn_interval, AsyncHandle, AsyncSpawner};

pub use crate::tiles::{
    MapTiles, SlamTileSource, TileCache, TileHandle, TileLoader, TileProvider, TileReload,
    TileSource,
};

pub use crate::ui::{
    Affordances, ControlView, LogView, MapView, PoseReadout, ProgressTracker, ProgressView,
    Prompt,
};

pub use crate::workflows::{LogViewer, MapDetails, MapManager, PathPlanner, SensorPanel, SlamSession};

pub use crate::{ConsoleError, Result};

pub use std::{
    pin::Pin,
    sync::Arc,
    time::Duration,
};

pub use futures::Future;
