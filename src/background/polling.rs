//! Robot state poller.
//!
//! Every tick fires one independent request; a slow server can have several
//! in flight and their answers are applied in arrival order. Stopping the
//! poller only stops new ticks.

use crate::{
    api::{RobotApi, RobotState},
    core::{
        config::ConsoleConfig,
        geo::PhysicalPoint,
        projection::EuclideanProjection,
    },
    layers::robot::RobotOutline,
    runtime::{self, AsyncHandle},
    tiles::MapTiles,
    ui::{
        controls::{Affordances, PoseReadout},
        traits::MapView,
    },
    Result,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct PollState {
    api: Arc<dyn RobotApi>,
    map: Arc<dyn MapView>,
    tiles: Arc<dyn MapTiles>,
    projection: EuclideanProjection,
    offset: PhysicalPoint,
    map_update_distance: f64,
    outline: Mutex<RobotOutline>,
    last_map_update: Mutex<Option<PhysicalPoint>>,
}

impl PollState {
    async fn poll_once(&self) -> bool {
        match self.api.robot_state().await {
            Ok(state) => {
                self.apply(&state);
                true
            }
            Err(e) => {
                log::warn!("robot state poll failed: {}", e);
                false
            }
        }
    }

    fn apply(&self, state: &RobotState) {
        let pose = &state.position;
        log::debug!("robot at ({:.2}, {:.2}) {:?}", pose.x, pose.y, state.state);

        self.map.show_pose(&PoseReadout::from(pose));

        let position = pose.position();
        let on_map = self.projection.physical_to_geo(&position.offset_by(&self.offset));
        self.map.extend_trace(on_map);

        if self.should_refresh(position) {
            self.tiles.refresh_all();
        }

        if self.map.robot_overlay_visible() {
            if let Ok(outline) = self.outline.lock() {
                let robot = outline.place(pose, &self.offset, &self.projection);
                self.map.draw_robot(&robot);
            }
        }

        if self.map.follow_enabled() {
            self.map.pan_to(on_map);
        }

        if let Some(affordances) = Affordances::for_state(state.state) {
            self.map.set_affordances(affordances);
        }
    }

    /// Records `position` as the last refresh point when it is far enough from
    /// the previous one, or when there is none yet.
    fn should_refresh(&self, position: PhysicalPoint) -> bool {
        let Ok(mut last) = self.last_map_update.lock() else {
            return false;
        };
        let due = match *last {
            Some(previous) => position.distance_to(&previous) > self.map_update_distance,
            None => true,
        };
        if due {
            *last = Some(position);
        }
        due
    }
}

pub struct PollingSyncLoop {
    state: Arc<PollState>,
    pull_rate: Duration,
    timer: Mutex<Option<Box<dyn AsyncHandle>>>,
}

impl PollingSyncLoop {
    pub fn new(
        api: Arc<dyn RobotApi>,
        map: Arc<dyn MapView>,
        tiles: Arc<dyn MapTiles>,
        config: &ConsoleConfig,
    ) -> Result<Self> {
        Ok(Self {
            state: Arc::new(PollState {
                api,
                map,
                tiles,
                projection: EuclideanProjection::new(config.map.world_size)?,
                offset: config.map.offset,
                map_update_distance: config.polling.map_update_distance,
                outline: Mutex::new(RobotOutline::default()),
                last_map_update: Mutex::new(None),
            }),
            pull_rate: config.polling.pull_rate(),
            timer: Mutex::new(None),
        })
    }

    /// Replace the robot footprint drawn on the map.
    pub fn with_outline(self, outline: RobotOutline) -> Self {
        self.set_outline(outline);
        self
    }

    /// Replace the robot footprint; takes effect from the next answer, also
    /// while polling.
    pub fn set_outline(&self, outline: RobotOutline) {
        if let Ok(mut current) = self.state.outline.lock() {
            *current = outline;
        }
    }

    /// Start polling; the first request goes out one period from now.
    /// Calling it again while running restarts the timer.
    pub fn start(&self) {
        let state = self.state.clone();
        let handle = runtime::spawn_interval(self.pull_rate, move || {
            let state = state.clone();
            runtime::spawn(async move {
                state.poll_once().await;
            });
        });

        if let Ok(mut timer) = self.timer.lock() {
            if let Some(old) = timer.replace(handle) {
                old.cancel();
            }
        }
        log::info!("polling robot state every {:?}", self.pull_rate);
    }

    /// Stop issuing requests. Requests already sent still update the views.
    pub fn stop(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.cancel();
                log::info!("robot state polling stopped");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .map(|timer| timer.as_ref().map_or(false, |t| !t.is_finished()))
            .unwrap_or(false)
    }

    /// Fetch and apply one state right now. Returns whether the fetch succeeded.
    pub async fn poll_once(&self) -> bool {
        self.state.poll_once().await
    }

    /// Robot position at the last forced tile refresh
    pub fn last_map_update_position(&self) -> Option<PhysicalPoint> {
        self.state.last_map_update.lock().ok().and_then(|last| *last)
    }
}

impl Drop for PollingSyncLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
