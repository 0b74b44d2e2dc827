use egui::{Color32, Pos2};

use crate::command::{Command, CommandError, CommandHistory, CommandResult};
use crate::config::EditorConfig;
use crate::id_generator::ItemId;
use crate::interaction::{
    CanvasEvent, InteractionContext, InteractionController, InteractionMode, RedrawScheduler,
};
use crate::item::{Item, RasterImage, TextMeasure, TextStyle};
use crate::renderer::{RenderStyle, Surface, render_scene};
use crate::scene::Scene;
use crate::selection::SelectionManager;
use crate::viewport::Viewport;

/// Owns the canvas state and routes every edit through the history
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    viewport: Viewport,
    history: CommandHistory,
    selection: SelectionManager,
    interaction: InteractionController,
    redraw: RedrawScheduler,
    config: EditorConfig,
    style: RenderStyle,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let style = RenderStyle {
            border_padding: config.border_padding,
            ..RenderStyle::default()
        };
        Self {
            scene: Scene::new(),
            viewport: Viewport::new(&config),
            history: CommandHistory::new(),
            selection: SelectionManager::new(config.toolbar_gap),
            interaction: InteractionController::new(&config),
            redraw: RedrawScheduler::new(),
            config,
            style,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn handle_event(&mut self, event: CanvasEvent) {
        let mut ctx = InteractionContext {
            scene: &mut self.scene,
            viewport: &mut self.viewport,
            history: &mut self.history,
            selection: &mut self.selection,
            redraw: &mut self.redraw,
            config: &self.config,
        };
        self.interaction.handle_event(event, &mut ctx);
    }

    /// Abort the running gesture, restoring the scene
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel(&mut self.scene);
        self.selection.refresh(&self.scene, &self.viewport);
        self.redraw.request();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> CommandResult {
        self.interaction.cancel(&mut self.scene);
        self.selection.clear();
        self.redraw.request();
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> CommandResult {
        self.interaction.cancel(&mut self.scene);
        self.selection.clear();
        self.redraw.request();
        self.history.redo(&mut self.scene)
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.selection.on_viewport_change(&self.scene, &self.viewport);
        self.redraw.request();
    }

    /// Empty canvas, empty history, default view
    pub fn reset(&mut self) {
        self.interaction.cancel(&mut self.scene);
        self.scene.clear();
        self.history.clear();
        self.selection.clear();
        self.viewport.reset();
        self.redraw.request();
        log::info!("Canvas reset");
    }

    /// Place an image with its top-left corner at the world point `at`
    pub fn add_image(&mut self, raster: RasterImage, at: Pos2) -> Result<ItemId, CommandError> {
        self.insert(Item::image(raster, at))
    }

    /// Place text anchored at the world point `at`
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        style: TextStyle,
        at: Pos2,
        measurer: &dyn TextMeasure,
    ) -> Result<ItemId, CommandError> {
        self.insert(Item::text(content, style, at, measurer))
    }

    fn insert(&mut self, item: Item) -> Result<ItemId, CommandError> {
        let id = item.id();
        self.history.execute(Command::Insert { item }, &mut self.scene)?;
        self.redraw.request();
        Ok(id)
    }

    pub fn move_selected_to_back(&mut self) -> CommandResult {
        self.reorder_selected(|_| 0)
    }

    pub fn move_selected_to_front(&mut self) -> CommandResult {
        self.reorder_selected(|len| len.saturating_sub(1))
    }

    fn reorder_selected(&mut self, target: impl FnOnce(usize) -> usize) -> CommandResult {
        let Some(id) = self.selection.selected_id() else {
            return Ok(());
        };
        let Some(from) = self.scene.index_of(id) else {
            return Ok(());
        };
        let to = target(self.scene.len());
        if from == to {
            return Ok(());
        }
        self.interaction.cancel(&mut self.scene);
        self.history
            .execute(Command::Reorder { id, from, to }, &mut self.scene)?;
        self.selection.refresh(&self.scene, &self.viewport);
        self.redraw.request();
        Ok(())
    }

    pub fn delete_selected(&mut self) -> CommandResult {
        let Some(id) = self.selection.selected_id() else {
            return Ok(());
        };
        self.interaction.cancel(&mut self.scene);
        if let Some(command) = Command::remove(&self.scene, id) {
            self.history.execute(command, &mut self.scene)?;
        }
        self.selection.clear();
        self.redraw.request();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.interaction.mode() != mode {
            self.interaction.cancel(&mut self.scene);
            self.interaction.set_mode(mode);
            log::debug!("Mode changed to {mode:?}");
        }
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.interaction.set_stroke_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.interaction.set_stroke_width(width);
    }

    /// Paint the scene and selection onto `surface`
    pub fn render(&self, surface: &mut dyn Surface) {
        render_scene(surface, &self.scene, &self.viewport, &self.selection, &self.style);
    }

    /// True at most once per batch of changes
    pub fn take_redraw_request(&mut self) -> bool {
        self.redraw.take()
    }
}
