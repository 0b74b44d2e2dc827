use egui::Pos2;

use crate::item::Item;
use crate::scene::Scene;

/// Find the topmost item whose frame, grown by `padding`, contains `world`.
///
/// Args:
///     world: Point in world coordinates
///     scene: Items to test, walked front to back
///     padding: Extra world units around each frame so thin lines stay grabbable
///
/// Returns:
///     The first item hit, or None
pub fn hit_test(world: Pos2, scene: &Scene, padding: f32) -> Option<&Item> {
    scene
        .items_front_to_back()
        .find(|item| item.frame().expand(padding).contains(world))
}
