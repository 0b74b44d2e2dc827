use egui::{Align2, CursorIcon, Id, Sense};

use crate::CanvasApp;
use crate::interaction::InteractionMode;
use crate::renderer::egui_surface::EguiSurface;

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let canvas_rect = response.rect;
            app.input.set_canvas_rect(canvas_rect);

            // Handle input
            let enabled = response.hovered() || response.is_pointer_button_down_on();
            for event in app.input.process_input(ctx, enabled) {
                app.editor.handle_event(event);
            }

            // Render the canvas
            app.textures.begin_frame();
            let offset = canvas_rect.min.to_vec2();
            let mut surface = EguiSurface::new(&painter, offset, &mut app.textures);
            app.editor.render(&mut surface);

            if response.hovered() {
                set_cursor(app, ctx, &response);
            }
        });

    selection_toolbar(app, ctx);
}

fn set_cursor(app: &CanvasApp, ctx: &egui::Context, response: &egui::Response) {
    let editor = &app.editor;
    let state = editor.interaction().state();
    let local = response
        .hover_pos()
        .map(|pos| pos - response.rect.min.to_vec2());
    let handle = local.and_then(|pos| {
        editor
            .selection()
            .handle_at(pos, editor.config().handle_radius)
    });

    let icon = if state.is_panning() {
        CursorIcon::Grabbing
    } else if let Some(corner) = handle {
        corner.cursor_icon()
    } else if state.is_dragging() {
        CursorIcon::Move
    } else if editor.interaction().mode() == InteractionMode::Draw {
        CursorIcon::Crosshair
    } else {
        CursorIcon::Default
    };
    ctx.set_cursor_icon(icon);
}

/// "Move back / Bring to front / Delete" floating above the selected item
fn selection_toolbar(app: &mut CanvasApp, ctx: &egui::Context) {
    if !app.editor.interaction().state().is_idle() {
        return;
    }
    let Some(overlay) = app.editor.selection().overlay() else {
        return;
    };
    let anchor = overlay.toolbar_anchor + app.input.canvas_rect().min.to_vec2();

    egui::Area::new(Id::new("selection_toolbar"))
        .fixed_pos(anchor)
        .pivot(Align2::CENTER_BOTTOM)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    let back = ui.button("Move back").clicked();
                    let front = ui.button("Bring to front").clicked();
                    let delete = ui.button("Delete").clicked();
                    let result = if back {
                        Some(app.editor.move_selected_to_back())
                    } else if front {
                        Some(app.editor.move_selected_to_front())
                    } else if delete {
                        Some(app.editor.delete_selected())
                    } else {
                        None
                    };
                    if let Some(Err(err)) = result {
                        log::warn!("Toolbar action failed: {err}");
                    }
                });
            });
        });
}
