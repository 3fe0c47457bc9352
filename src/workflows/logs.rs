use crate::{api::RobotApi, ui::traits::LogView, Result};
use std::sync::Arc;

/// Server log panel, newest entry on top.
pub struct LogViewer {
    api: Arc<dyn RobotApi>,
    view: Arc<dyn LogView>,
}

impl LogViewer {
    pub fn new(api: Arc<dyn RobotApi>, view: Arc<dyn LogView>) -> Self {
        Self { api, view }
    }

    /// Fetch the whole log and show it.
    pub async fn refresh(&self) -> Result<Vec<String>> {
        let mut lines = self.api.log_lines().await?;
        lines.reverse();
        self.view.show_log(&lines);
        Ok(lines)
    }
}
