use crate::{
    api::RobotApi,
    core::{config::ConsoleConfig, geo::PhysicalPoint, projection::EuclideanProjection},
    layers::{robot::path_polyline, vector::{LineStyle, Polyline}},
    ui::{
        progress::ProgressTracker,
        traits::{MapView, Prompt},
    },
    workflows::alert_on_error,
    Result,
};
use std::sync::Arc;
use std::time::Duration;

/// Sends the robot to a point and shows the path it planned.
pub struct PathPlanner {
    api: Arc<dyn RobotApi>,
    map: Arc<dyn MapView>,
    prompt: Arc<dyn Prompt>,
    progress: Arc<ProgressTracker>,
    projection: EuclideanProjection,
    offset: PhysicalPoint,
    planning_time: Duration,
}

impl PathPlanner {
    pub fn new(
        api: Arc<dyn RobotApi>,
        map: Arc<dyn MapView>,
        prompt: Arc<dyn Prompt>,
        progress: Arc<ProgressTracker>,
        config: &ConsoleConfig,
    ) -> Result<Self> {
        Ok(Self {
            api,
            map,
            prompt,
            progress,
            projection: EuclideanProjection::new(config.map.world_size)?,
            offset: config.map.offset,
            planning_time: Duration::from_millis(config.workflows.path_planning_ms),
        })
    }

    /// Ask for a path to `target` (map coordinates, offset already removed)
    /// and draw it once planned.
    pub async fn go_to(&self, target: PhysicalPoint) -> Result<()> {
        self.progress.run("Planning path ...", self.planning_time);
        let planned = self.api.plan_path_to(target).await;
        self.progress.dismiss();
        alert_on_error(&*self.prompt, "plan path", planned)?;

        log::info!("path planned to ({:.2}, {:.2})", target.x, target.y);
        self.update_path().await
    }

    /// Fetch the current path and redraw it; no path clears the line.
    pub async fn update_path(&self) -> Result<()> {
        let path = alert_on_error(&*self.prompt, "fetch path", self.api.motor_path().await)?;
        let line = match path {
            Some(path) => path_polyline(&path, &self.offset, &self.projection),
            None => Polyline::new(LineStyle::path()),
        };
        self.map.draw_path(&line);
        Ok(())
    }

    pub async fn follow(&self) -> Result<()> {
        alert_on_error(&*self.prompt, "follow path", self.api.follow_path().await)
    }

    pub async fn stop_following(&self) -> Result<()> {
        alert_on_error(
            &*self.prompt,
            "stop following path",
            self.api.stop_path_following().await,
        )
    }

    pub async fn delete_path(&self) -> Result<()> {
        alert_on_error(&*self.prompt, "delete path", self.api.delete_path().await)?;
        self.map.draw_path(&Polyline::new(LineStyle::path()));
        Ok(())
    }
}
