#![warn(clippy::all, rust_2018_idioms)]
// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Canvas Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(canvas_editor::CanvasApp::new(cc)))),
    )
}

// The web build is started from JavaScript through `canvas_editor::CanvasApp`.
#[cfg(target_arch = "wasm32")]
fn main() {}
