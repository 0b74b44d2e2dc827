use egui::{Modifiers, PointerButton, Pos2, Vec2};

/// Pointer input in canvas-local screen coordinates.
///
/// The host translates its own input into these; the canvas never reads the
/// windowing toolkit directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// Mouse button was pressed
    PointerDown {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove { pos: Pos2, modifiers: Modifiers },
    /// Mouse button was released
    PointerUp {
        pos: Pos2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Pointer left the canvas; ends any gesture like a release would
    PointerLeave { last_pos: Pos2 },
    /// Scroll or pinch. Positive `delta.y` scrolls up.
    Wheel {
        pos: Pos2,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

impl CanvasEvent {
    pub fn pos(&self) -> Pos2 {
        match self {
            CanvasEvent::PointerDown { pos, .. }
            | CanvasEvent::PointerMove { pos, .. }
            | CanvasEvent::PointerUp { pos, .. }
            | CanvasEvent::Wheel { pos, .. } => *pos,
            CanvasEvent::PointerLeave { last_pos } => *last_pos,
        }
    }
}
