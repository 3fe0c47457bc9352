use crate::{input::events::MapEvent, Result};

/// A tool attached to the map widget that reacts to its events
pub trait MapPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Returns `true` when the plugin consumed the event
    fn handle_map_event(&self, _event: &MapEvent) -> Result<bool> {
        Ok(false)
    }
}
