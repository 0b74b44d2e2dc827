//! Turns pointer events into gestures on the scene.
//!
//! While a gesture runs the scene is mutated directly so the canvas shows a
//! live preview. When the gesture ends, a single command carrying the before
//! and after state goes through the history.

mod event;
pub mod redraw;
mod state;

use egui::{Color32, PointerButton, Pos2};
use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandHistory};
use crate::config::EditorConfig;
use crate::geometry::{ResizeStart, hit_test, resize_frame};
use crate::id_generator::ItemId;
use crate::item::{Item, ItemKind, Line};
use crate::scene::Scene;
use crate::selection::SelectionManager;
use crate::viewport::Viewport;

pub use event::CanvasEvent;
pub use redraw::RedrawScheduler;
pub use state::{DrawTarget, InteractionState};

/// What a primary click on the canvas does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Click selects and drags items
    #[default]
    Select,
    /// Click on empty canvas or the selected image draws
    Draw,
}

/// Everything a gesture may read or change
pub struct InteractionContext<'a> {
    pub scene: &'a mut Scene,
    pub viewport: &'a mut Viewport,
    pub history: &'a mut CommandHistory,
    pub selection: &'a mut SelectionManager,
    pub redraw: &'a mut RedrawScheduler,
    pub config: &'a EditorConfig,
}

#[derive(Debug)]
pub struct InteractionController {
    mode: InteractionMode,
    state: InteractionState,
    stroke_color: Color32,
    stroke_width: f32,
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mode: InteractionMode::default(),
            state: InteractionState::Idle,
            stroke_color: Color32::BLACK,
            stroke_width: config.default_stroke_width,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Callers cancel the running gesture first
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.stroke_width = width;
        } else {
            log::warn!("Ignoring stroke width {width}");
        }
    }

    pub fn handle_event(&mut self, event: CanvasEvent, ctx: &mut InteractionContext<'_>) {
        match event {
            CanvasEvent::PointerDown {
                pos,
                button,
                modifiers,
            } => self.pointer_down(pos, button, modifiers.ctrl, ctx),
            CanvasEvent::PointerMove { pos, modifiers } => {
                self.pointer_move(pos, modifiers.shift, ctx)
            }
            CanvasEvent::PointerUp { .. } | CanvasEvent::PointerLeave { .. } => self.finish(ctx),
            CanvasEvent::Wheel {
                pos,
                delta,
                modifiers,
            } => {
                if modifiers.ctrl || modifiers.command {
                    if delta.y != 0.0 {
                        let factor = ctx.config.zoom_step.powf(delta.y.signum());
                        ctx.viewport.zoom_at(pos, factor);
                    }
                } else {
                    ctx.viewport.pan_by(delta);
                }
                ctx.selection.on_viewport_change(ctx.scene, ctx.viewport);
                ctx.redraw.request();
            }
        }
    }

    fn pointer_down(
        &mut self,
        pos: Pos2,
        button: PointerButton,
        ctrl: bool,
        ctx: &mut InteractionContext<'_>,
    ) {
        if !self.state.is_idle() {
            log::debug!("Ignoring pointer down while {}", self.state.name());
            return;
        }

        let pan = button == PointerButton::Middle || (button == PointerButton::Secondary && ctrl);
        if pan {
            self.transition(InteractionState::Panning { last: pos });
            return;
        }
        if button != PointerButton::Primary {
            return;
        }

        let world = ctx.viewport.to_world(pos);

        if let Some(corner) = ctx.selection.handle_at(pos, ctx.config.handle_radius) {
            let selected = ctx.selection.selected_id().and_then(|id| ctx.scene.get(id));
            if let Some(item) = selected {
                let start = ResizeStart {
                    frame: item.frame(),
                    pointer: world,
                };
                self.transition(InteractionState::Resizing {
                    id: item.id(),
                    corner,
                    start,
                });
                return;
            }
        }

        let hit = hit_test(world, ctx.scene, ctx.config.hit_padding)
            .map(|item| (item.id(), matches!(item.kind(), ItemKind::Image(_))));

        match (self.mode, hit) {
            (InteractionMode::Draw, Some((id, true))) if ctx.selection.is_selected(id) => {
                ctx.scene.begin_line(world, self.stroke_color, self.stroke_width);
                self.transition(InteractionState::Drawing {
                    target: DrawTarget::OnImage(id),
                });
            }
            (InteractionMode::Draw, None) => {
                ctx.selection.clear();
                ctx.scene.begin_line(world, self.stroke_color, self.stroke_width);
                self.transition(InteractionState::Drawing {
                    target: DrawTarget::Fresh,
                });
            }
            (_, Some((id, _))) => self.begin_drag(id, world, ctx),
            (InteractionMode::Select, None) => ctx.selection.clear(),
        }
        ctx.redraw.request();
    }

    fn begin_drag(&mut self, id: ItemId, world: Pos2, ctx: &mut InteractionContext<'_>) {
        let Some(item) = ctx.scene.get(id) else {
            return;
        };
        ctx.selection.select(item, ctx.viewport);
        self.transition(InteractionState::Dragging {
            id,
            grab_offset: item.grab_offset(world),
            start_position: item.position(),
        });
    }

    fn pointer_move(&mut self, pos: Pos2, aspect_lock: bool, ctx: &mut InteractionContext<'_>) {
        let world = ctx.viewport.to_world(pos);
        match &mut self.state {
            InteractionState::Idle => return,
            InteractionState::Panning { last } => {
                ctx.viewport.pan_by(pos - *last);
                *last = pos;
            }
            InteractionState::Drawing { .. } => ctx.scene.extend_line(world),
            InteractionState::Dragging { id, grab_offset, .. } => {
                if let Some(item) = ctx.scene.get_mut(*id) {
                    item.set_position(world - *grab_offset);
                }
            }
            InteractionState::Resizing { id, corner, start } => {
                if let Some(item) = ctx.scene.get_mut(*id) {
                    let lock = aspect_lock || item.keeps_aspect();
                    match resize_frame(start, *corner, world, lock, ctx.config.min_item_size) {
                        Some(frame) => item.set_frame(frame),
                        None => log::trace!("Resize below minimum size ignored"),
                    }
                }
            }
        }
        ctx.selection.on_viewport_change(ctx.scene, ctx.viewport);
        ctx.redraw.request();
    }

    /// End the running gesture and record its result
    fn finish(&mut self, ctx: &mut InteractionContext<'_>) {
        let state = std::mem::take(&mut self.state);
        if !state.is_idle() {
            log::debug!("Finished {}", state.name());
        }

        let command = match state {
            InteractionState::Idle | InteractionState::Panning { .. } => None,
            InteractionState::Drawing {
                target: DrawTarget::Fresh,
            } => match ctx.scene.take_current_line() {
                Some(line) if line.len() >= 2 => Some(Command::Insert {
                    item: Item::drawing(line),
                }),
                _ => {
                    log::debug!("Discarding line with fewer than two points");
                    None
                }
            },
            InteractionState::Drawing {
                target: DrawTarget::OnImage(id),
            } => ctx
                .scene
                .take_current_line()
                .and_then(|line| paint_on_image(ctx.scene, id, &line)),
            InteractionState::Dragging {
                id, start_position, ..
            } => ctx
                .scene
                .get(id)
                .filter(|item| item.position() != start_position)
                .map(|item| Command::Move {
                    id,
                    before: start_position,
                    after: item.position(),
                }),
            InteractionState::Resizing { id, start, .. } => ctx
                .scene
                .get(id)
                .filter(|item| item.frame() != start.frame)
                .map(|item| Command::Resize {
                    id,
                    before: start.frame,
                    after: item.frame(),
                }),
        };

        if let Some(command) = command {
            if let Err(err) = ctx.history.execute(command, ctx.scene) {
                log::warn!("Failed to record gesture: {err}");
            }
        }
        ctx.selection.refresh(ctx.scene, ctx.viewport);
        ctx.redraw.request();
    }

    /// Abort the running gesture and put the scene back the way it was
    pub fn cancel(&mut self, scene: &mut Scene) {
        let state = std::mem::take(&mut self.state);
        match state {
            InteractionState::Idle => return,
            InteractionState::Panning { .. } => {}
            InteractionState::Drawing { .. } => {
                scene.take_current_line();
            }
            InteractionState::Dragging {
                id, start_position, ..
            } => {
                if let Some(item) = scene.get_mut(id) {
                    item.set_position(start_position);
                }
            }
            InteractionState::Resizing { id, start, .. } => {
                if let Some(item) = scene.get_mut(id) {
                    if item.frame() != start.frame {
                        item.set_frame(start.frame);
                    }
                }
            }
        }
        log::debug!("Cancelled {}", state.name());
    }

    fn transition(&mut self, state: InteractionState) {
        log::debug!("Gesture {} -> {}", self.state.name(), state.name());
        self.state = state;
    }
}

/// Rasterize a world-space line into a copy of an image item's pixels
fn paint_on_image(scene: &Scene, id: ItemId, line: &Line) -> Option<Command> {
    let item = scene.get(id)?;
    let content = item.as_image()?;
    let pixels: Vec<Pos2> = line
        .points()
        .iter()
        .map(|world| content.local_to_pixel((*world - item.position()).to_pos2()))
        .collect();
    let scale = content.pixels_per_unit();
    let width = line.width() * (scale.x + scale.y) / 2.0;
    let raster = content.raster().with_polyline(&pixels, line.color(), width);
    Some(Command::ReplaceImage {
        id,
        before: content.clone(),
        after: content.with_raster(raster),
    })
}
