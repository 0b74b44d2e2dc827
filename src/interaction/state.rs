//! Gesture state machine of the canvas.
//!
//! ```text
//!              pointer down                     pointer up / leave
//!   ┌──────┐ ───────────────► Drawing  ────────────────────────────┐
//!   │      │ ───────────────► Dragging ────────────────────────────┤
//!   │ Idle │ ───────────────► Resizing ────────────────────────────┤
//!   │      │ ───────────────► Panning  ────────────────────────────┤
//!   └──────┘ ◄─────────────────────────────────────────────────────┘
//! ```
//!
//! Only `Idle` accepts a new gesture. Every other state returns to `Idle`
//! when the pointer is released, leaves the canvas, or the gesture is
//! cancelled.

use egui::{Pos2, Vec2};

use crate::geometry::{Corner, ResizeStart};
use crate::id_generator::ItemId;

/// Where the line of a draw gesture ends up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawTarget {
    /// A new drawing item
    Fresh,
    /// Painted into the pixels of this image item
    OnImage(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing {
        target: DrawTarget,
    },
    Dragging {
        id: ItemId,
        /// Pointer world position minus item position at grab time
        grab_offset: Vec2,
        start_position: Pos2,
    },
    Resizing {
        id: ItemId,
        corner: Corner,
        start: ResizeStart,
    },
    Panning {
        /// Last pointer position in screen space
        last: Pos2,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionState::Drawing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, InteractionState::Resizing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, InteractionState::Panning { .. })
    }

    /// Item manipulated by the current gesture
    pub fn target_item(&self) -> Option<ItemId> {
        match self {
            InteractionState::Dragging { id, .. } | InteractionState::Resizing { id, .. } => {
                Some(*id)
            }
            InteractionState::Drawing {
                target: DrawTarget::OnImage(id),
            } => Some(*id),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing { .. } => "drawing",
            InteractionState::Dragging { .. } => "dragging",
            InteractionState::Resizing { .. } => "resizing",
            InteractionState::Panning { .. } => "panning",
        }
    }
}
