//! Stored maps: open, inspect and rename them, or start a fresh one.

use crate::{
    api::{models::MapMetadata, RobotApi},
    constants::STORED_MAP_ALGORITHM,
    core::config::WorkflowTimingConfig,
    ui::{
        progress::ProgressTracker,
        traits::{ControlView, Prompt},
    },
    workflows::alert_on_error,
    ConsoleError, Result,
};
use std::sync::Arc;
use std::time::Duration;

/// What the details dialog shows for one stored map
#[derive(Debug, Clone, PartialEq)]
pub struct MapDetails {
    pub filename: String,
    pub name: String,
    pub description: String,
    /// Grid size in cells
    pub size: Option<[i64; 2]>,
    /// Physical extent in meters
    pub lengths: Option<(f64, f64)>,
    pub cell_length: Option<f64>,
    pub thumbnail_url: String,
}

impl MapDetails {
    fn new(filename: &str, meta: MapMetadata, api_root: &str) -> Self {
        let dims = meta.dimensions.as_ref();
        Self {
            filename: filename.to_string(),
            name: meta.name,
            description: meta.description,
            size: dims.map(|d| d.map_dimensions),
            lengths: dims.map(|d| d.lengths()),
            cell_length: dims.map(|d| d.cell_length),
            thumbnail_url: format!("{}get/mapstorage/thumbnail?filename={}", api_root, filename),
        }
    }
}

pub struct MapManager {
    api: Arc<dyn RobotApi>,
    api_root: String,
    prompt: Arc<dyn Prompt>,
    control: Arc<dyn ControlView>,
    progress: Arc<ProgressTracker>,
    timings: WorkflowTimingConfig,
}

impl MapManager {
    pub fn new(
        api: Arc<dyn RobotApi>,
        api_root: impl Into<String>,
        prompt: Arc<dyn Prompt>,
        control: Arc<dyn ControlView>,
        progress: Arc<ProgressTracker>,
        timings: WorkflowTimingConfig,
    ) -> Self {
        Self {
            api,
            api_root: api_root.into(),
            prompt,
            control,
            progress,
            timings,
        }
    }

    /// Initialize an empty map with `algorithm`.
    pub async fn start_new_map(&self, algorithm: &str) -> Result<()> {
        self.progress.run(
            &format!("Please wait while {} is initialized ...", algorithm),
            Duration::from_millis(self.timings.new_map_ms),
        );
        let result = self.api.slam_initialize(algorithm).await;
        self.finish_and_reload("start new map", result).await
    }

    /// Continue mapping on top of a stored map.
    pub async fn start_from_stored(&self, filename: &str) -> Result<()> {
        self.progress.run(
            &format!("Please wait while opening {}", filename),
            Duration::from_millis(self.timings.stored_map_ms),
        );
        let result = self
            .api
            .slam_initialize_from_stored(filename, STORED_MAP_ALGORITHM)
            .await;
        self.finish_and_reload("open stored map", result).await
    }

    pub async fn open_details(&self, filename: &str) -> Result<MapDetails> {
        self.progress.run(
            "Fetching details ...",
            Duration::from_millis(self.timings.details_ms),
        );
        let result = self.api.map_metadata(filename).await;
        self.progress.finish().await;

        match result {
            Ok(meta) => Ok(MapDetails::new(filename, meta, &self.api_root)),
            Err(e) => {
                log::warn!("metadata of {} unavailable: {}", filename, e);
                self.prompt.alert("Error while opening");
                Err(e)
            }
        }
    }

    /// Rename the stored map. An empty name is refused before any request.
    pub async fn save_metadata(&self, filename: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            self.prompt.alert("The map must have a name");
            return Err(ConsoleError::UserCancelled);
        }

        self.progress.run(
            "Saving details ...",
            Duration::from_millis(self.timings.details_ms),
        );
        let result = self.api.rename_map(filename, name).await;
        self.finish_and_reload("rename map", result).await
    }

    async fn finish_and_reload(&self, action: &str, result: Result<()>) -> Result<()> {
        self.progress.finish().await;
        alert_on_error(&*self.prompt, action, result)?;
        log::info!("{} done", action);
        self.control.reload();
        Ok(())
    }
}
