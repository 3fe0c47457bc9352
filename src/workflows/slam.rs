use crate::{
    api::RobotApi,
    core::config::WorkflowTimingConfig,
    ui::{
        progress::ProgressTracker,
        traits::{ControlView, Prompt},
    },
    workflows::{alert_on_error, confirmed},
    Result,
};
use std::sync::Arc;
use std::time::Duration;

/// Start, stop and close the running SLAM session.
pub struct SlamSession {
    api: Arc<dyn RobotApi>,
    prompt: Arc<dyn Prompt>,
    control: Arc<dyn ControlView>,
    progress: Arc<ProgressTracker>,
    save_duration: Duration,
}

impl SlamSession {
    pub fn new(
        api: Arc<dyn RobotApi>,
        prompt: Arc<dyn Prompt>,
        control: Arc<dyn ControlView>,
        progress: Arc<ProgressTracker>,
        timings: &WorkflowTimingConfig,
    ) -> Self {
        Self {
            api,
            prompt,
            control,
            progress,
            save_duration: Duration::from_millis(timings.save_map_ms),
        }
    }

    pub async fn start(&self) -> Result<()> {
        alert_on_error(&*self.prompt, "start SLAM", self.api.slam_start().await)?;
        log::info!("SLAM started");
        self.control.reload();
        Ok(())
    }

    pub async fn stop(&self) -> Result<()> {
        confirmed(&*self.prompt, "Are you sure you want to stop SLAM?")?;
        alert_on_error(&*self.prompt, "stop SLAM", self.api.slam_stop().await)?;
        log::info!("SLAM stopped");
        self.control.reload();
        Ok(())
    }

    /// Save the map under `name`, then end the session.
    pub async fn save_and_close(&self, name: &str, description: &str) -> Result<()> {
        self.progress.run("Saving map ...", self.save_duration);

        let saved = self.api.slam_save(name, description).await;
        if saved.is_err() {
            self.progress.dismiss();
        }
        alert_on_error(&*self.prompt, "save map", saved)?;
        log::info!("map saved as {:?}", name);

        self.progress.finish().await;
        self.terminate().await
    }

    /// End the session without saving.
    pub async fn terminate(&self) -> Result<()> {
        alert_on_error(&*self.prompt, "terminate SLAM", self.api.slam_terminate().await)?;
        log::info!("SLAM terminated");
        self.control.reload();
        Ok(())
    }
}
