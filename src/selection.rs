use egui::{Pos2, Rect, Vec2};

use crate::geometry::Corner;
use crate::id_generator::ItemId;
use crate::item::Item;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Screen-space decoration of the selected item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOverlay {
    pub bounds: Rect,
    /// Resize handles in `Corner::ALL` order
    pub handles: [(Corner, Pos2); 4],
    /// Bottom-center of the floating toolbar
    pub toolbar_anchor: Pos2,
}

impl SelectionOverlay {
    fn new(frame: Rect, viewport: &Viewport, toolbar_gap: f32) -> Self {
        let bounds = viewport.rect_to_screen(frame);
        Self {
            bounds,
            handles: Corner::ALL.map(|corner| (corner, corner.on(bounds))),
            toolbar_anchor: bounds.center_top() - Vec2::new(0.0, toolbar_gap),
        }
    }
}

/// Tracks the single selected item and its overlay
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Option<ItemId>,
    overlay: Option<SelectionOverlay>,
    toolbar_gap: f32,
}

impl SelectionManager {
    pub fn new(toolbar_gap: f32) -> Self {
        Self {
            selected: None,
            overlay: None,
            toolbar_gap,
        }
    }

    pub fn select(&mut self, item: &Item, viewport: &Viewport) {
        if self.selected != Some(item.id()) {
            log::debug!("Selected {} {}", item.kind_name(), item.id());
        }
        self.selected = Some(item.id());
        self.overlay = Some(SelectionOverlay::new(item.frame(), viewport, self.toolbar_gap));
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.overlay = None;
    }

    /// Recompute the overlay after the view or the item changed.
    /// Clears the selection when the item is gone.
    pub fn on_viewport_change(&mut self, scene: &Scene, viewport: &Viewport) {
        let Some(id) = self.selected else {
            return;
        };
        match scene.get(id) {
            Some(item) => {
                let overlay = SelectionOverlay::new(item.frame(), viewport, self.toolbar_gap);
                self.overlay = Some(overlay);
            }
            None => {
                log::debug!("Selected item {id} no longer exists");
                self.clear();
            }
        }
    }

    /// Same as `on_viewport_change`; called after the item itself moved
    pub fn refresh(&mut self, scene: &Scene, viewport: &Viewport) {
        self.on_viewport_change(scene, viewport);
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected == Some(id)
    }

    pub fn overlay(&self) -> Option<&SelectionOverlay> {
        self.overlay.as_ref()
    }

    /// Handle under `screen_point`, if any is within `radius` pixels
    pub fn handle_at(&self, screen_point: Pos2, radius: f32) -> Option<Corner> {
        let overlay = self.overlay.as_ref()?;
        overlay
            .handles
            .iter()
            .find(|(_, handle)| handle.distance(screen_point) <= radius)
            .map(|(corner, _)| *corner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::RasterImage;

    fn scene_with_image() -> (Scene, ItemId) {
        let mut scene = Scene::new();
        let raster = RasterImage::from_rgba(100, 50, vec![0; 100 * 50 * 4]).unwrap();
        let item = Item::image(raster, Pos2::new(10.0, 20.0));
        let id = item.id();
        scene.add_item(item).unwrap();
        (scene, id)
    }

    #[test]
    fn test_overlay_follows_viewport() {
        let (scene, id) = scene_with_image();
        let mut viewport = Viewport::default();
        let mut selection = SelectionManager::new(10.0);
        selection.select(scene.get(id).unwrap(), &viewport);

        let overlay = selection.overlay().unwrap();
        assert_eq!(overlay.bounds.min, Pos2::new(10.0, 20.0));
        assert_eq!(overlay.toolbar_anchor, Pos2::new(60.0, 10.0));

        viewport.pan_by(Vec2::new(5.0, 5.0));
        viewport.zoom_at(Pos2::ZERO, 2.0);
        selection.on_viewport_change(&scene, &viewport);
        let overlay = selection.overlay().unwrap();
        assert_eq!(overlay.bounds.min, Pos2::new(30.0, 50.0));
        assert_eq!(overlay.bounds.size(), Vec2::new(200.0, 100.0));
        assert_eq!(selection.selected_id(), Some(id));
    }

    #[test]
    fn test_handle_at() {
        let (scene, id) = scene_with_image();
        let mut selection = SelectionManager::new(10.0);
        selection.select(scene.get(id).unwrap(), &Viewport::default());

        assert_eq!(selection.handle_at(Pos2::new(112.0, 72.0), 8.0), Some(Corner::BottomRight));
        assert_eq!(selection.handle_at(Pos2::new(10.0, 20.0), 8.0), Some(Corner::TopLeft));
        assert_eq!(selection.handle_at(Pos2::new(60.0, 45.0), 8.0), None);
    }

    #[test]
    fn test_removed_item_clears_selection() {
        let (mut scene, id) = scene_with_image();
        let mut selection = SelectionManager::new(10.0);
        selection.select(scene.get(id).unwrap(), &Viewport::default());
        scene.remove_item(id);
        selection.on_viewport_change(&scene, &Viewport::default());
        assert!(selection.selected_id().is_none());
        assert!(selection.overlay().is_none());
    }
}
