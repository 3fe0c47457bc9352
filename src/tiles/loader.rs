use crate::{
    api::RobotApi,
    core::geo::TileCoord,
    runtime::{self, AsyncHandle},
    tiles::cache::TileCache,
    Result,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Fetches tile images through the robot API, serving repeats from a cache.
///
/// Share the cache with [`TileProvider::with_cache`](super::TileProvider::with_cache)
/// so a forced refresh also forgets the bytes fetched so far.
#[derive(Clone)]
pub struct TileLoader {
    api: Arc<dyn RobotApi>,
    cache: TileCache,
}

impl TileLoader {
    pub fn new(api: Arc<dyn RobotApi>, cache: TileCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    /// Tile bytes for `coord`; `None` when the tile lies outside the world.
    pub async fn load(&self, coord: TileCoord) -> Result<Option<Arc<Vec<u8>>>> {
        if !coord.is_valid() {
            return Ok(None);
        }
        if let Some(data) = self.cache.get(&coord) {
            return Ok(Some(data));
        }

        let data = self.api.tile(coord).await?;
        log::debug!("downloaded tile {} ({} bytes)", coord.tile_id(), data.len());
        Ok(Some(self.cache.insert(coord, data)))
    }

    /// Load in the background and send the bytes to `tx`. Failures are
    /// logged and dropped; the widget keeps its previous image.
    pub fn start_download(
        &self,
        coord: TileCoord,
        tx: UnboundedSender<(TileCoord, Arc<Vec<u8>>)>,
    ) -> Box<dyn AsyncHandle> {
        let loader = self.clone();
        runtime::spawn(async move {
            match loader.load(coord).await {
                Ok(Some(data)) => {
                    let _ = tx.send((coord, data));
                }
                Ok(None) => {}
                Err(e) => log::warn!("tile {} download failed: {}", coord.tile_id(), e),
            }
        })
    }

    /// Forget every cached tile
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }
}
