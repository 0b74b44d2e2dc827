use egui::{Context, Modifiers, PointerButton, Pos2, Rect, Vec2};

use crate::interaction::CanvasEvent;

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Converts raw egui input into `CanvasEvent`s relative to the canvas rect
pub struct InputHandler {
    /// Last pointer position inside the canvas, canvas-local
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        pos - self.canvas_rect.min.to_vec2()
    }

    /// Process this frame's input.
    ///
    /// `enabled` is false while another widget (a panel, a window) covers the
    /// pointer; the canvas then only sees the pointer leave.
    pub fn process_input(&mut self, ctx: &Context, enabled: bool) -> Vec<CanvasEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let modifiers = input.modifiers;
            let inside = input
                .pointer
                .hover_pos()
                .filter(|pos| enabled && self.canvas_rect.contains(*pos));

            match (inside, self.last_pointer_pos) {
                (Some(pos), last) => {
                    let local = self.to_local(pos);
                    if Some(local) != last {
                        events.push(CanvasEvent::PointerMove {
                            pos: local,
                            modifiers,
                        });
                    }
                    self.last_pointer_pos = Some(local);
                }
                (None, Some(last)) => {
                    events.push(CanvasEvent::PointerLeave { last_pos: last });
                    self.last_pointer_pos = None;
                }
                (None, None) => {}
            }

            let Some(pos) = self.last_pointer_pos else {
                return;
            };

            for button in BUTTONS {
                if input.pointer.button_pressed(button) {
                    events.push(CanvasEvent::PointerDown {
                        pos,
                        button,
                        modifiers,
                    });
                }
                if input.pointer.button_released(button) {
                    events.push(CanvasEvent::PointerUp {
                        pos,
                        button,
                        modifiers,
                    });
                }
            }

            // egui turns ctrl+wheel and pinch into a zoom factor
            let zoom = input.zoom_delta();
            if zoom != 1.0 {
                events.push(CanvasEvent::Wheel {
                    pos,
                    delta: Vec2::new(0.0, if zoom > 1.0 { 1.0 } else { -1.0 }),
                    modifiers: Modifiers {
                        ctrl: true,
                        ..modifiers
                    },
                });
            } else if input.smooth_scroll_delta != Vec2::ZERO {
                events.push(CanvasEvent::Wheel {
                    pos,
                    delta: input.smooth_scroll_delta,
                    modifiers,
                });
            }
        });

        events
    }
}
