use crate::{
    api::{models::SensorCommand, RobotApi},
    ui::traits::{ControlView, Prompt},
    workflows::{alert_on_error, confirmed, non_empty},
    Result,
};
use std::sync::Arc;

/// Sensor buttons and the recorded sensor logs.
pub struct SensorPanel {
    api: Arc<dyn RobotApi>,
    prompt: Arc<dyn Prompt>,
    control: Arc<dyn ControlView>,
}

impl SensorPanel {
    pub fn new(
        api: Arc<dyn RobotApi>,
        prompt: Arc<dyn Prompt>,
        control: Arc<dyn ControlView>,
    ) -> Self {
        Self {
            api,
            prompt,
            control,
        }
    }

    pub async fn sensor(&self, command: SensorCommand, sensor: &str) -> Result<()> {
        let result = self.api.sensor(command, sensor).await;
        alert_on_error(&*self.prompt, command.action(), result)?;
        log::info!("{:?} sensor {}", command, sensor);
        self.control.reload();
        Ok(())
    }

    /// Ask for a new name; returns it once the server accepted it.
    pub async fn rename_log(&self, log_name: &str) -> Result<String> {
        let new_name = non_empty(self.prompt.prompt("New name:"))?;
        let result = self.api.rename_sensor_log(log_name, &new_name).await;
        alert_on_error(&*self.prompt, "rename sensor log", result)?;
        Ok(new_name)
    }

    pub async fn delete_log(&self, log_name: &str) -> Result<()> {
        confirmed(
            &*self.prompt,
            &format!("Are you sure you want to delete {}?", log_name),
        )?;
        let result = self.api.delete_sensor_log(log_name).await;
        alert_on_error(&*self.prompt, "delete sensor log", result)
    }

    pub async fn start_replay(&self, log_name: &str) -> Result<()> {
        confirmed(
            &*self.prompt,
            "Are you sure you want to start a log in real time?",
        )?;
        let result = self.api.start_log_replay(log_name).await;
        alert_on_error(&*self.prompt, "start log replay", result)?;
        self.control.reload();
        Ok(())
    }

    pub async fn stop_replay(&self) -> Result<()> {
        confirmed(&*self.prompt, "Are you sure you want to stop the log reading?")?;
        let result = self.api.stop_log_replay().await;
        alert_on_error(&*self.prompt, "stop log replay", result)?;
        self.control.reload();
        Ok(())
    }
}
