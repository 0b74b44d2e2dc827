use egui::{Color32, Key, KeyboardShortcut, Modifiers, Rect};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::file_handler::FileHandler;
use crate::fps::{FpsHistory, FpsMeter};
use crate::input::InputHandler;
use crate::interaction::InteractionMode;
use crate::item::TextStyle;
use crate::panels::{central_panel, tools_panel};
use crate::texture_manager::TextureCache;

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND.plus(Modifiers::SHIFT), Key::Z);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

const TEXTURE_CACHE_SIZE: usize = 64;

/// Tool settings restored across restarts
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ToolSettings {
    pub mode: InteractionMode,
    pub stroke_color: Color32,
    pub stroke_width: f32,
    pub text_style: TextStyle,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Select,
            stroke_color: Color32::BLACK,
            stroke_width: EditorConfig::default().default_stroke_width,
            text_style: TextStyle::default(),
        }
    }
}

/// Only the tool settings are persisted on shutdown; the canvas starts empty.
pub struct CanvasApp {
    pub(crate) settings: ToolSettings,
    pub(crate) editor: Editor,
    pub(crate) textures: TextureCache,
    pub(crate) input: InputHandler,
    pub(crate) file_handler: FileHandler,
    /// Text typed into the tools panel, not yet placed
    pub(crate) text_draft: String,
    pub(crate) fps: FpsMeter,
    pub(crate) fps_history: FpsHistory,
}

impl Default for CanvasApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default(), ToolSettings::default())
    }
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: ToolSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_config(EditorConfig::from_env(), settings)
    }

    pub fn with_config(config: EditorConfig, settings: ToolSettings) -> Self {
        let mut app = Self {
            settings,
            editor: Editor::new(config),
            textures: TextureCache::new(TEXTURE_CACHE_SIZE),
            input: InputHandler::new(Rect::NOTHING),
            file_handler: FileHandler::new(),
            text_draft: String::new(),
            fps: FpsMeter::new(),
            fps_history: FpsHistory::new(),
        };
        app.apply_settings();
        app
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Push the tool settings into the editor
    pub(crate) fn apply_settings(&mut self) {
        self.editor.set_mode(self.settings.mode);
        self.editor.set_stroke_color(self.settings.stroke_color);
        self.editor.set_stroke_width(self.settings.stroke_width);
    }

    pub(crate) fn undo(&mut self) {
        if let Err(err) = self.editor.undo() {
            log::warn!("Undo failed: {err}");
        }
    }

    pub(crate) fn redo(&mut self) {
        if let Err(err) = self.editor.redo() {
            log::warn!("Redo failed: {err}");
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (undo, redo, cancel, delete) = ctx.input_mut(|i| {
            // Redo first: the undo shortcut is a subset of it
            let redo = i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT);
            let undo = i.consume_shortcut(&UNDO);
            let cancel = i.consume_key(Modifiers::NONE, Key::Escape);
            let delete = i.consume_key(Modifiers::NONE, Key::Delete)
                || i.consume_key(Modifiers::NONE, Key::Backspace);
            (undo, redo, cancel, delete)
        });

        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
        if cancel {
            self.editor.cancel_gesture();
        }
        if delete {
            if let Err(err) = self.editor.delete_selected() {
                log::warn!("Delete failed: {err}");
            }
        }
    }

    fn place_dropped_images(&mut self) {
        for decoded in self.file_handler.poll() {
            let world = self.editor.viewport().to_world(decoded.drop_pos);
            let at = world - decoded.raster.size() / 2.0;
            match self.editor.add_image(decoded.raster, at) {
                Ok(id) => log::info!("Placed {} as {id}", decoded.name),
                Err(err) => log::error!("Failed to place {}: {err}", decoded.name),
            }
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        if let Some(fps) = self.fps.measure(now) {
            log::trace!("{fps} fps");
            self.fps_history.push(fps);
        }

        self.file_handler.preview_files_being_dropped(ctx);
        self.file_handler
            .check_for_dropped_files(ctx, self.input.canvas_rect());
        self.place_dropped_images();

        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        if self.editor.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}
