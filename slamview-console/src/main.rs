use anyhow::Context;
use slamview::{
    layers::{Polygon, Polyline},
    ui::{Affordances, ControlView, LogView, MapView, PoseReadout},
    workflows::LogViewer,
    ConsoleConfig, HttpRobotApi, LatLng, MapTiles, PollingSyncLoop, RobotApi, TileProvider,
};
use std::sync::{Arc, Mutex};

/// Headless robot console: follows the robot and writes what a map page would
/// display to the log.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slamview::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let show_log = args.iter().any(|a| a == "--log");
    let config = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => ConsoleConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path))?,
        None => ConsoleConfig::local(),
    };

    let api: Arc<dyn RobotApi> = Arc::new(HttpRobotApi::new(&config.server));
    let view = Arc::new(LoggingView::default());

    if show_log {
        let viewer = LogViewer::new(api.clone(), view.clone());
        if let Err(e) = viewer.refresh().await {
            log::warn!("server log unavailable: {}", e.user_message());
        }
    }

    let tiles: Arc<dyn MapTiles> = Arc::new(TileProvider::from_config(&config));
    let poller = PollingSyncLoop::new(api, view, tiles, &config)
        .context("setting up the robot state poller")?;
    poller.start();

    log::info!(
        "following robot at {} (ctrl-c to quit)",
        config.server.base_url
    );
    tokio::signal::ctrl_c()
        .await
        .context("waiting for ctrl-c")?;

    poller.stop();
    Ok(())
}

/// Views that only log; remembers the last affordances to log changes once.
#[derive(Default)]
struct LoggingView {
    affordances: Mutex<Option<Affordances>>,
}

impl MapView for LoggingView {
    fn show_pose(&self, readout: &PoseReadout) {
        log::info!(
            "x: {} y: {} theta: {}°",
            readout.x,
            readout.y,
            readout.theta_deg
        );
    }

    fn extend_trace(&self, _point: LatLng) {}

    fn robot_overlay_visible(&self) -> bool {
        false
    }

    fn draw_robot(&self, _robot: &Polygon) {}

    fn follow_enabled(&self) -> bool {
        false
    }

    fn pan_to(&self, _center: LatLng) {}

    fn zoom_by(&self, _delta: i32, _center: LatLng) {}

    fn set_affordances(&self, affordances: Affordances) {
        if let Ok(mut last) = self.affordances.lock() {
            if *last != Some(affordances) {
                log::info!(
                    "SLAM {}",
                    if affordances.stop { "running" } else { "stopped" }
                );
                *last = Some(affordances);
            }
        }
    }

    fn draw_path(&self, path: &Polyline) {
        log::info!("planned path with {} waypoints", path.len());
    }
}

impl ControlView for LoggingView {
    fn show_error(&self, message: &str) {
        log::error!("{}", message);
    }
}

impl LogView for LoggingView {
    fn show_log(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line.trim_end());
        }
    }
}
