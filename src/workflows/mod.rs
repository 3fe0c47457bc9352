//! Operator workflows: each button of the console maps to one method here.
//!
//! A workflow asks for confirmation where the action is destructive, shows
//! progress for slow server calls and reports failures with an alert. Failures
//! are also returned so callers can chain on success.

pub mod logs;
pub mod maps;
pub mod pathing;
pub mod sensors;
pub mod slam;

pub use logs::LogViewer;
pub use maps::{MapDetails, MapManager};
pub use pathing::PathPlanner;
pub use sensors::SensorPanel;
pub use slam::SlamSession;

use crate::{ui::traits::Prompt, ConsoleError, Result};

/// Ask `question`; a declined confirmation cancels the workflow.
pub(crate) fn confirmed(prompt: &dyn Prompt, question: &str) -> Result<()> {
    if prompt.confirm(question) {
        Ok(())
    } else {
        log::debug!("declined: {}", question);
        Err(ConsoleError::UserCancelled)
    }
}

/// Alert the operator about a failed call and pass the result on.
pub(crate) fn alert_on_error<T>(prompt: &dyn Prompt, action: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log::warn!("{} failed: {}", action, e);
        prompt.alert(&format!("Error: {}", e.user_message()));
    }
    result
}

/// Trimmed operator input; empty or cancelled input cancels the workflow.
pub(crate) fn non_empty(input: Option<String>) -> Result<String> {
    match input.map(|s| s.trim().to_string()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ConsoleError::UserCancelled),
    }
}
