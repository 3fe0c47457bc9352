//! Right-click menu on the map: shows the physical coordinates under the
//! cursor and offers actions at that point.

use crate::{
    core::{
        geo::{two_decimals, LatLng, PhysicalPoint, Point},
        projection::EuclideanProjection,
    },
    input::events::MapEvent,
    plugins::{base::MapPlugin, measure::Ruler},
    tiles::MapTiles,
    ui::traits::MapView,
    workflows::pathing::PathPlanner,
    Result,
};
use std::sync::{Arc, Mutex};

/// Vertical distance between the click and the menu's top edge, in pixels
const MENU_OFFSET_Y: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Center,
    ZoomIn,
    ZoomOut,
    GoHere,
    UpdateMap,
    InsertRulerPoint,
    ResetRuler,
}

/// Where the menu was opened
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTarget {
    pub lat_lng: LatLng,
    pub tile: Point,
    /// Map coordinates, offset removed
    pub physical: PhysicalPoint,
    /// Top-left corner of the menu on screen
    pub position: Point,
    /// `x: .. y: ..`
    pub label: String,
}

pub struct ContextMenu {
    projection: EuclideanProjection,
    offset: PhysicalPoint,
    map: Arc<dyn MapView>,
    tiles: Arc<dyn MapTiles>,
    ruler: Arc<Ruler>,
    planner: Arc<PathPlanner>,
    target: Mutex<Option<MenuTarget>>,
}

impl ContextMenu {
    pub fn new(
        projection: EuclideanProjection,
        offset: PhysicalPoint,
        map: Arc<dyn MapView>,
        tiles: Arc<dyn MapTiles>,
        ruler: Arc<Ruler>,
        planner: Arc<PathPlanner>,
    ) -> Self {
        Self {
            projection,
            offset,
            map,
            tiles,
            ruler,
            planner,
            target: Mutex::new(None),
        }
    }

    /// Open the menu at a right-click.
    pub fn open(&self, lat_lng: LatLng, pixel: Point) -> MenuTarget {
        let tile = self.projection.geo_to_tile(&lat_lng);
        let world = self.projection.tile_to_physical(&tile);
        let physical = PhysicalPoint::new(world.x - self.offset.x, world.y - self.offset.y);

        let target = MenuTarget {
            lat_lng,
            tile,
            physical,
            position: Point::new(pixel.x, pixel.y + MENU_OFFSET_Y),
            label: format!(
                "x: {} y: {}",
                two_decimals(physical.x),
                two_decimals(physical.y)
            ),
        };
        if let Ok(mut current) = self.target.lock() {
            *current = Some(target.clone());
        }
        target
    }

    pub fn close(&self) {
        if let Ok(mut current) = self.target.lock() {
            *current = None;
        }
    }

    pub fn target(&self) -> Option<MenuTarget> {
        self.target.lock().ok()?.clone()
    }

    /// Run `action` at the point the menu was opened; a closed menu does nothing.
    pub async fn invoke(&self, action: ContextAction) -> Result<()> {
        let Some(target) = self.target() else {
            return Ok(());
        };
        self.close();

        match action {
            ContextAction::Center => self.map.pan_to(target.lat_lng),
            ContextAction::ZoomIn => self.map.zoom_by(1, target.lat_lng),
            ContextAction::ZoomOut => self.map.zoom_by(-1, target.lat_lng),
            ContextAction::GoHere => self.planner.go_to(target.physical).await?,
            ContextAction::UpdateMap => {
                self.tiles.refresh_all();
            }
            ContextAction::InsertRulerPoint => {
                self.ruler.push(target.lat_lng);
            }
            ContextAction::ResetRuler => self.ruler.clear(),
        }
        Ok(())
    }
}

impl MapPlugin for ContextMenu {
    fn name(&self) -> &str {
        "context-menu"
    }

    fn handle_map_event(&self, event: &MapEvent) -> Result<bool> {
        match event {
            MapEvent::RightClick { lat_lng, pixel } => {
                self.open(*lat_lng, *pixel);
                Ok(true)
            }
            MapEvent::Click { .. } => {
                self.close();
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeRobotApi;
    use crate::core::config::ConsoleConfig;
    use crate::tiles::{SlamTileSource, TileOptions, TileProvider};
    use crate::ui::progress::ProgressTracker;
    use crate::ui::testing::{RecordingMap, RecordingProgress, ScriptedPrompt};
    use std::time::Duration;

    struct Fixture {
        api: Arc<FakeRobotApi>,
        map: Arc<RecordingMap>,
        tiles: Arc<TileProvider>,
        ruler: Arc<Ruler>,
        menu: ContextMenu,
        projection: EuclideanProjection,
    }

    fn fixture(offset: PhysicalPoint) -> Fixture {
        let mut config = ConsoleConfig::default();
        config.map.offset = offset;
        let projection = EuclideanProjection::new(config.map.world_size).unwrap();
        let api = Arc::new(FakeRobotApi::new());
        let map = Arc::new(RecordingMap::default());
        let tiles = Arc::new(TileProvider::new(
            SlamTileSource::new("/api/"),
            TileOptions::default(),
        ));
        let ruler = Arc::new(Ruler::new(projection.clone()));
        let tracker = Arc::new(ProgressTracker::new(
            Arc::new(RecordingProgress::default()),
            Duration::from_millis(100),
            Duration::from_millis(1000),
        ));
        let planner = Arc::new(
            PathPlanner::new(
                api.clone(),
                map.clone(),
                Arc::new(ScriptedPrompt::new(true, None)),
                tracker,
                &config,
            )
            .unwrap(),
        );
        let menu = ContextMenu::new(
            projection.clone(),
            offset,
            map.clone(),
            tiles.clone(),
            ruler.clone(),
            planner,
        );
        Fixture {
            api,
            map,
            tiles,
            ruler,
            menu,
            projection,
        }
    }

    #[test]
    fn test_readout_removes_offset() {
        let f = fixture(PhysicalPoint::new(10.0, 5.0));
        let at = f.projection.physical_to_geo(&PhysicalPoint::new(30.0, 25.5));
        let target = f.menu.open(at, Point::new(200.0, 100.0));

        assert!((target.physical.x - 20.0).abs() < 1e-9);
        assert!((target.physical.y - 20.5).abs() < 1e-9);
        assert_eq!(target.label, "x: 20 y: 20.5");
        assert_eq!(target.position, Point::new(200.0, 160.0));
    }

    #[test]
    fn test_click_closes_menu() {
        let f = fixture(PhysicalPoint::default());
        let opened = f
            .menu
            .handle_map_event(&MapEvent::RightClick {
                lat_lng: LatLng::new(0.0, 0.0),
                pixel: Point::new(1.0, 1.0),
            })
            .unwrap();
        assert!(opened);
        assert!(f.menu.target().is_some());

        f.menu
            .handle_map_event(&MapEvent::Click {
                pixel: Point::new(5.0, 5.0),
            })
            .unwrap();
        assert!(f.menu.target().is_none());
    }

    #[tokio::test]
    async fn test_actions_use_menu_point() {
        let f = fixture(PhysicalPoint::default());
        let at = f.projection.physical_to_geo(&PhysicalPoint::new(40.0, 60.0));

        f.menu.open(at, Point::default());
        f.menu.invoke(ContextAction::Center).await.unwrap();
        assert_eq!(f.map.pans.lock().unwrap().as_slice(), [at]);

        f.menu.open(at, Point::default());
        f.menu.invoke(ContextAction::ZoomOut).await.unwrap();
        assert_eq!(f.map.zooms.lock().unwrap().as_slice(), [(-1, at)]);

        f.menu.open(at, Point::default());
        f.menu.invoke(ContextAction::InsertRulerPoint).await.unwrap();
        assert_eq!(f.ruler.polyline().len(), 1);

        f.menu.open(at, Point::default());
        f.menu.invoke(ContextAction::UpdateMap).await.unwrap();
        assert_eq!(f.tiles.refresh_count(), 1);

        f.menu.open(at, Point::default());
        f.menu.invoke(ContextAction::GoHere).await.unwrap();
        assert_eq!(f.api.calls()[0], "plan_path_to 40.00 60.00");
    }

    #[tokio::test]
    async fn test_closed_menu_does_nothing() {
        let f = fixture(PhysicalPoint::default());
        f.menu.invoke(ContextAction::GoHere).await.unwrap();
        assert!(f.api.calls().is_empty());
    }
}
