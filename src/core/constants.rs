//! Core constants of the SLAM map widget and the console defaults.
//! Keeping them in a single place makes it easier to tweak console-wide magic numbers.

/// Square tile size in pixels; also the extent of the base projection plane.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom level the SLAM map type serves.
pub const MIN_ZOOM: u8 = 1;

/// Highest zoom level the SLAM map type serves.
pub const MAX_ZOOM: u8 = 7;

/// Zoom level the map opens at.
pub const DEFAULT_ZOOM: u8 = 2;

/// Interval between robot state polls.
pub const DEFAULT_PULL_RATE_MS: u64 = 1000;

/// Distance (meters) the robot must travel before map tiles are refreshed.
pub const DEFAULT_MAP_UPDATE_DISTANCE: f64 = 5.0;

/// Interval between motor speed commands while driving manually.
pub const DEFAULT_SEND_INTERVAL_MS: u64 = 500;

/// Weight of the turn axis when mixing differential drive speeds.
pub const DEFAULT_TURN_ALPHA: f64 = 0.3;

/// Joystick surface edge length in pixels.
pub const DEFAULT_JOYSTICK_SIZE: f64 = 300.0;

/// Algorithm used when a stored map is reopened.
pub const STORED_MAP_ALGORITHM: &str = "hectorslam";
