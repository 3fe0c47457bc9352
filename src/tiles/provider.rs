//! Registry of the tiles currently shown by the map widget.
//!
//! The widget asks for URLs while it lays out tiles and reports each tile it
//! creates or drops. Tiles are never re-requested by the widget on their own,
//! so when the SLAM map changes the poller calls [`MapTiles::refresh_all`] to
//! point every live tile at its URL again.

use crate::{
    api::client::api_root,
    core::{
        config::ConsoleConfig,
        constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
        geo::TileCoord,
    },
    tiles::{
        cache::TileCache,
        source::{SlamTileSource, TileSource},
        MapTiles, TileHandle, TileReload,
    },
};
use fxhash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Map-type options handed to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

struct RegisteredTile {
    coord: TileCoord,
    handle: Arc<dyn TileHandle>,
}

pub struct TileProvider {
    source: Box<dyn TileSource>,
    options: TileOptions,
    tiles: Mutex<FxHashMap<String, RegisteredTile>>,
    /// Shared with the tile loader; emptied on every refresh
    cache: Option<TileCache>,
    refreshes: AtomicU64,
}

impl TileProvider {
    pub fn new(source: impl TileSource + 'static, options: TileOptions) -> Self {
        Self {
            source: Box::new(source),
            options,
            tiles: Mutex::new(FxHashMap::default()),
            cache: None,
            refreshes: AtomicU64::new(0),
        }
    }

    /// SLAM tiles from the configured server with the configured zoom limits.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(
            SlamTileSource::new(api_root(&config.server)),
            TileOptions {
                tile_size: TILE_SIZE,
                min_zoom: config.map.min_zoom,
                max_zoom: config.map.max_zoom,
            },
        )
    }

    /// Drop `cache` whenever the tiles are refreshed.
    pub fn with_cache(mut self, cache: TileCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn options(&self) -> TileOptions {
        self.options
    }

    /// Number of live tiles
    pub fn len(&self) -> usize {
        self.tiles.lock().map(|tiles| tiles.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times [`MapTiles::refresh_all`] has run
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl MapTiles for TileProvider {
    fn url_for(&self, coord: TileCoord) -> Option<String> {
        self.source.url(coord)
    }

    fn register(&self, handle: Arc<dyn TileHandle>, coord: TileCoord) {
        if let Ok(mut tiles) = self.tiles.lock() {
            tiles.insert(coord.tile_id(), RegisteredTile { coord, handle });
        }
    }

    fn release(&self, coord: TileCoord) {
        if let Ok(mut tiles) = self.tiles.lock() {
            tiles.remove(&coord.tile_id());
        }
    }

    fn refresh_all(&self) -> Vec<TileReload> {
        if let Some(cache) = &self.cache {
            cache.clear();
        }

        // Collect under the lock, call handles outside it so a handle may
        // release or register tiles while reloading.
        let mut pending: Vec<(TileReload, Arc<dyn TileHandle>)> = match self.tiles.lock() {
            Ok(tiles) => tiles
                .iter()
                .filter_map(|(id, tile)| {
                    let url = self.source.url(tile.coord)?;
                    Some((
                        TileReload {
                            tile_id: id.clone(),
                            url,
                        },
                        tile.handle.clone(),
                    ))
                })
                .collect(),
            Err(_) => Vec::new(),
        };
        pending.sort_by(|a, b| a.0.tile_id.cmp(&b.0.tile_id));

        for (reload, handle) in &pending {
            handle.reload(&reload.url);
        }

        let count = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("refreshed {} tiles (refresh #{})", pending.len(), count);

        pending.into_iter().map(|(reload, _)| reload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTile {
        urls: Mutex<Vec<String>>,
    }

    impl TileHandle for RecordingTile {
        fn reload(&self, url: &str) {
            self.urls.lock().unwrap().push(url.to_string());
        }
    }

    fn provider() -> TileProvider {
        TileProvider::new(SlamTileSource::new("/api/"), TileOptions::default())
    }

    #[test]
    fn test_url_range_law() {
        let provider = provider();
        for z in 0..4u8 {
            let n = 1i64 << z;
            for x in -1..=n {
                for y in -1..=n {
                    let inside = (0..n).contains(&x) && (0..n).contains(&y);
                    assert_eq!(
                        provider.url_for(TileCoord::new(x, y, z)).is_some(),
                        inside,
                        "x{}y{}z{}",
                        x,
                        y,
                        z
                    );
                }
            }
        }
    }

    #[test]
    fn test_refresh_reloads_every_live_tile() {
        let provider = provider();
        let a = Arc::new(RecordingTile::default());
        let b = Arc::new(RecordingTile::default());
        provider.register(a.clone(), TileCoord::new(1, 0, 1));
        provider.register(b.clone(), TileCoord::new(0, 1, 1));

        let reloads = provider.refresh_all();
        let ids: Vec<_> = reloads.iter().map(|r| r.tile_id.as_str()).collect();
        assert_eq!(ids, vec!["x0y1z1", "x1y0z1"]);
        assert_eq!(
            a.urls.lock().unwrap().as_slice(),
            ["/api/get/slam/image/tile/?zoomLevel=1&tileX=1&tileY=0"]
        );
        assert_eq!(b.urls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_refresh_is_idempotent_per_tile() {
        let provider = provider();
        let tile = Arc::new(RecordingTile::default());
        provider.register(tile.clone(), TileCoord::new(2, 3, 2));

        let first = provider.refresh_all();
        let second = provider.refresh_all();
        assert_eq!(first, second);

        let urls = tile.urls.lock().unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], urls[1]);
        assert_eq!(provider.refresh_count(), 2);
    }

    #[test]
    fn test_reregistration_overwrites_and_release_removes() {
        let provider = provider();
        let old = Arc::new(RecordingTile::default());
        let new = Arc::new(RecordingTile::default());
        let coord = TileCoord::new(0, 0, 1);

        provider.register(old.clone(), coord);
        provider.register(new.clone(), coord);
        assert_eq!(provider.len(), 1);

        provider.refresh_all();
        assert!(old.urls.lock().unwrap().is_empty());
        assert_eq!(new.urls.lock().unwrap().len(), 1);

        provider.release(coord);
        assert!(provider.is_empty());
        assert!(provider.refresh_all().is_empty());
    }

    #[test]
    fn test_out_of_range_tiles_are_kept_but_not_reloaded() {
        let provider = provider();
        let tile = Arc::new(RecordingTile::default());
        provider.register(tile.clone(), TileCoord::new(-1, 0, 1));
        assert_eq!(provider.len(), 1);
        assert!(provider.refresh_all().is_empty());
        assert!(tile.urls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_refresh_clears_shared_cache() {
        let cache = TileCache::new(8);
        cache.insert(TileCoord::new(0, 0, 1), vec![1]);
        let provider = provider().with_cache(cache.clone());
        provider.refresh_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_from_config_uses_server_root() {
        let provider = TileProvider::from_config(&ConsoleConfig::default());
        assert_eq!(
            provider.url_for(TileCoord::new(0, 0, 0)).as_deref(),
            Some("http://localhost:8000/api/get/slam/image/tile/?zoomLevel=0&tileX=0&tileY=0")
        );
        assert_eq!(provider.options().max_zoom, 7);
    }
}
