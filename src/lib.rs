#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod file_handler;
pub mod fps;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod interaction;
pub mod item;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod selection;
pub mod texture_manager;
pub mod viewport;

pub use app::CanvasApp;
pub use command::{Command, CommandError, CommandHistory};
pub use config::EditorConfig;
pub use editor::Editor;
pub use error::CanvasError;
pub use id_generator::ItemId;
pub use interaction::{CanvasEvent, InteractionMode};
pub use item::{Item, ItemKind};
pub use renderer::{RenderStyle, Surface, render_scene};
pub use scene::Scene;
pub use selection::SelectionManager;
pub use viewport::Viewport;
