use egui::{Color32, Pos2};

use crate::error::CanvasError;
use crate::id_generator::ItemId;
use crate::item::{Item, Line};

/// Ordered collection of canvas items.
///
/// Items are stored back to front: the last item is painted last and is hit
/// first. The in-progress line of a draw gesture lives next to the items in
/// world space until it is committed.
#[derive(Debug, Default)]
pub struct Scene {
    items: Vec<Item>,
    current_line: Option<Line>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item on top of all others
    pub fn add_item(&mut self, mut item: Item) -> Result<(), CanvasError> {
        if self.index_of(item.id()).is_some() {
            return Err(CanvasError::DuplicateItem(item.id()));
        }
        if !item.has_valid_bounds() {
            item.recompute_bounds();
        }
        log::debug!("Adding {} item {}", item.kind_name(), item.id());
        self.items.push(item);
        Ok(())
    }

    /// Insert an item at `index`, clamped to the end of the list
    pub fn insert_item(&mut self, index: usize, item: Item) -> Result<(), CanvasError> {
        if self.index_of(item.id()).is_some() {
            return Err(CanvasError::DuplicateItem(item.id()));
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove an item, returning it along with the index it occupied
    pub fn remove_item(&mut self, id: ItemId) -> Option<(usize, Item)> {
        let index = self.index_of(id)?;
        Some((index, self.items.remove(index)))
    }

    pub fn move_to_front(&mut self, id: ItemId) -> bool {
        let last = self.items.len().saturating_sub(1);
        self.move_to_index(id, last)
    }

    pub fn move_to_back(&mut self, id: ItemId) -> bool {
        self.move_to_index(id, 0)
    }

    /// Move an item to `index` in paint order. Returns false if it is absent.
    pub fn move_to_index(&mut self, id: ItemId, index: usize) -> bool {
        let Some(from) = self.index_of(id) else {
            return false;
        };
        let item = self.items.remove(from);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        true
    }

    pub fn update_bounds(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.recompute_bounds();
                true
            }
            None => false,
        }
    }

    /// Items in paint order, back to front
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items in hit-test order, front to back
    pub fn items_front_to_back(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().rev()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current_line = None;
    }

    /// Start the in-progress line, replacing any unfinished one
    pub fn begin_line(&mut self, point: Pos2, color: Color32, width: f32) {
        self.current_line = Some(Line::new(point, color, width));
    }

    pub fn extend_line(&mut self, point: Pos2) {
        if let Some(line) = &mut self.current_line {
            line.add_point(point);
        }
    }

    pub fn current_line(&self) -> Option<&Line> {
        self.current_line.as_ref()
    }

    pub fn take_current_line(&mut self) -> Option<Line> {
        self.current_line.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::RasterImage;

    fn image_at(x: f32, y: f32) -> Item {
        let raster = RasterImage::from_rgba(2, 2, vec![0; 16]).unwrap();
        Item::image(raster, Pos2::new(x, y))
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut scene = Scene::new();
        let item = image_at(0.0, 0.0);
        scene.add_item(item.clone()).unwrap();
        let result = scene.add_item(item.clone());
        assert!(matches!(result, Err(CanvasError::DuplicateItem(id)) if id == item.id()));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_reports_index() {
        let mut scene = Scene::new();
        let a = image_at(0.0, 0.0);
        let b = image_at(10.0, 0.0);
        scene.add_item(a.clone()).unwrap();
        scene.add_item(b.clone()).unwrap();

        let (index, removed) = scene.remove_item(a.id()).unwrap();
        assert_eq!(index, 0);
        assert_eq!(removed.id(), a.id());
        assert!(scene.remove_item(a.id()).is_none());

        scene.insert_item(index, removed).unwrap();
        assert_eq!(scene.index_of(a.id()), Some(0));
        assert_eq!(scene.index_of(b.id()), Some(1));
    }

    #[test]
    fn test_reorder() {
        let mut scene = Scene::new();
        let items: Vec<Item> = (0..3).map(|i| image_at(i as f32, 0.0)).collect();
        for item in &items {
            scene.add_item(item.clone()).unwrap();
        }
        assert!(scene.move_to_back(items[2].id()));
        assert_eq!(scene.index_of(items[2].id()), Some(0));
        assert!(scene.move_to_front(items[2].id()));
        assert_eq!(scene.index_of(items[2].id()), Some(2));
        assert!(scene.move_to_index(items[0].id(), 99));
        assert_eq!(scene.index_of(items[0].id()), Some(2));

        let front: Vec<ItemId> = scene.items_front_to_back().map(|i| i.id()).collect();
        assert_eq!(front.first(), Some(&items[0].id()));
    }

    #[test]
    fn test_current_line_lifecycle() {
        let mut scene = Scene::new();
        scene.extend_line(Pos2::new(1.0, 1.0));
        assert!(scene.current_line().is_none());

        scene.begin_line(Pos2::ZERO, Color32::BLACK, 2.0);
        scene.extend_line(Pos2::new(5.0, 5.0));
        assert_eq!(scene.current_line().map(|l| l.len()), Some(2));

        let line = scene.take_current_line().unwrap();
        assert_eq!(line.points()[1], Pos2::new(5.0, 5.0));
        assert!(scene.current_line().is_none());
    }
}
