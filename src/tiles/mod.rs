//! Map tiles: URLs, the live-tile registry and the byte loader.

pub mod cache;
pub mod loader;
pub mod provider;
pub mod source;

use crate::core::geo::TileCoord;
use std::sync::Arc;

pub use cache::TileCache;
pub use loader::TileLoader;
pub use provider::{TileOptions, TileProvider};
pub use source::{SlamTileSource, TileSource};

/// A tile element owned by the map widget
pub trait TileHandle: Send + Sync {
    /// Point the tile at `url` again so the widget fetches fresh pixels
    fn reload(&self, url: &str);
}

/// One reload issued by a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileReload {
    pub tile_id: String,
    pub url: String,
}

/// The narrow tile interface handed to the map widget and to the poller.
pub trait MapTiles: Send + Sync {
    /// URL of the tile at `coord`, `None` outside the world
    fn url_for(&self, coord: TileCoord) -> Option<String>;

    /// Track a tile the widget created. A tile registered again at the same
    /// address replaces the previous one.
    fn register(&self, handle: Arc<dyn TileHandle>, coord: TileCoord);

    /// Forget the tile at `coord`
    fn release(&self, coord: TileCoord);

    /// Reload every live tile in range, returned in tile id order
    fn refresh_all(&self) -> Vec<TileReload>;
}
