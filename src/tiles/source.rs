use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`, or `None` when the tile lies
    /// outside the world.
    fn url(&self, coord: TileCoord) -> Option<String>;
}

/// Tiles rendered by the SLAM process, served by the robot's API.
#[derive(Debug, Clone)]
pub struct SlamTileSource {
    api_root: String,
}

impl SlamTileSource {
    /// `api_root` is the API base ending in `/`, e.g. `http://robot:8000/api/`.
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
        }
    }
}

impl TileSource for SlamTileSource {
    fn url(&self, coord: TileCoord) -> Option<String> {
        if !coord.is_valid() {
            return None;
        }
        Some(format!(
            "{}get/slam/image/tile/?zoomLevel={}&tileX={}&tileY={}",
            self.api_root, coord.z, coord.x, coord.y
        ))
    }
}
