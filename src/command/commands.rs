use egui::{Pos2, Rect};

use super::{CommandError, CommandResult};
use crate::id_generator::ItemId;
use crate::item::{ImageContent, Item};
use crate::scene::Scene;

/// An undoable edit of the scene.
///
/// Every variant stores the absolute state on both sides of the edit, so
/// applying a command that was already previewed during a gesture lands on the
/// same result.
#[derive(Debug, Clone)]
pub enum Command {
    /// Add an item on top of the scene
    Insert { item: Item },
    /// Delete an item, remembering where it sat in paint order
    Remove { item: Item, index: usize },
    /// Move an item
    Move { id: ItemId, before: Pos2, after: Pos2 },
    /// Resize an item; frames are world-space rects
    Resize { id: ItemId, before: Rect, after: Rect },
    /// Change paint order
    Reorder { id: ItemId, from: usize, to: usize },
    /// Replace the pixels of an image item (drawing onto it)
    ReplaceImage {
        id: ItemId,
        before: ImageContent,
        after: ImageContent,
    },
}

impl Command {
    /// Build a removal for an item currently in the scene
    pub fn remove(scene: &Scene, id: ItemId) -> Option<Self> {
        let index = scene.index_of(id)?;
        let item = scene.get(id)?.clone();
        Some(Command::Remove { item, index })
    }

    pub fn target_id(&self) -> ItemId {
        match self {
            Command::Insert { item } | Command::Remove { item, .. } => item.id(),
            Command::Move { id, .. }
            | Command::Resize { id, .. }
            | Command::Reorder { id, .. }
            | Command::ReplaceImage { id, .. } => *id,
        }
    }

    /// Short description shown in the history panel
    pub fn label(&self) -> String {
        match self {
            Command::Insert { item } => format!("Add {}", item.kind_name()),
            Command::Remove { item, .. } => format!("Delete {}", item.kind_name()),
            Command::Move { .. } => "Move".to_owned(),
            Command::Resize { .. } => "Resize".to_owned(),
            Command::Reorder { from, to, .. } if to < from => "Move back".to_owned(),
            Command::Reorder { .. } => "Bring to front".to_owned(),
            Command::ReplaceImage { .. } => "Draw on image".to_owned(),
        }
    }

    pub fn execute(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Insert { item } => {
                scene.add_item(item.clone())?;
                Ok(())
            }
            Command::Remove { item, .. } => scene
                .remove_item(item.id())
                .map(|_| ())
                .ok_or(CommandError::ItemNotFound(item.id())),
            Command::Move { id, after, .. } => set_position(scene, *id, *after),
            Command::Resize { id, after, .. } => set_frame(scene, *id, *after),
            Command::Reorder { id, to, .. } => reorder(scene, *id, *to),
            Command::ReplaceImage { id, after, .. } => set_image(scene, *id, after),
        }
    }

    pub fn undo(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::Insert { item } => scene
                .remove_item(item.id())
                .map(|_| ())
                .ok_or(CommandError::ItemNotFound(item.id())),
            Command::Remove { item, index } => {
                scene.insert_item(*index, item.clone())?;
                Ok(())
            }
            Command::Move { id, before, .. } => set_position(scene, *id, *before),
            Command::Resize { id, before, .. } => set_frame(scene, *id, *before),
            Command::Reorder { id, from, .. } => reorder(scene, *id, *from),
            Command::ReplaceImage { id, before, .. } => set_image(scene, *id, before),
        }
    }
}

fn item_mut(scene: &mut Scene, id: ItemId) -> Result<&mut Item, CommandError> {
    scene.get_mut(id).ok_or(CommandError::ItemNotFound(id))
}

fn set_position(scene: &mut Scene, id: ItemId, position: Pos2) -> CommandResult {
    item_mut(scene, id)?.set_position(position);
    Ok(())
}

fn set_frame(scene: &mut Scene, id: ItemId, frame: Rect) -> CommandResult {
    let item = item_mut(scene, id)?;
    if item.frame() != frame {
        item.set_frame(frame);
    }
    Ok(())
}

fn reorder(scene: &mut Scene, id: ItemId, index: usize) -> CommandResult {
    if scene.move_to_index(id, index) {
        Ok(())
    } else {
        Err(CommandError::ItemNotFound(id))
    }
}

fn set_image(scene: &mut Scene, id: ItemId, content: &ImageContent) -> CommandResult {
    if item_mut(scene, id)?.set_image(content.clone()) {
        Ok(())
    } else {
        Err(CommandError::InvalidParameters)
    }
}
