use egui::{Color32, ComboBox, Pos2, Sense, Shape, Slider, Stroke, Vec2};

use crate::CanvasApp;
use crate::fps::HISTORY_SIZE;
use crate::interaction::InteractionMode;
use crate::item::text::{FontStyle, TextAlign};
use crate::renderer::egui_surface::EguiTextMeasure;

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let mut settings_changed = false;
            ui.horizontal(|ui| {
                for (mode, label) in [
                    (InteractionMode::Select, "Select"),
                    (InteractionMode::Draw, "Draw"),
                ] {
                    if ui.selectable_label(app.settings.mode == mode, label).clicked() {
                        log::info!("Mode selected from UI: {mode:?}");
                        app.settings.mode = mode;
                        settings_changed = true;
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                settings_changed |= egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.settings.stroke_color,
                    egui::color_picker::Alpha::OnlyBlend,
                )
                .changed();
            });
            ui.horizontal(|ui| {
                ui.label("Width:");
                settings_changed |= ui
                    .add(Slider::new(&mut app.settings.stroke_width, 1.0..=50.0))
                    .changed();
            });
            if settings_changed {
                app.apply_settings();
            }

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(app.editor.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    app.undo();
                }
                if ui
                    .add_enabled(app.editor.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    app.redo();
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Zoom: {:.0}%", app.editor.viewport().scale() * 100.0));
                if ui.button("Reset view").clicked() {
                    app.editor.reset_view();
                }
            });
            if ui.button("Clear canvas").clicked() {
                app.editor.reset();
                app.textures.clear();
            }

            ui.separator();
            text_section(app, ui);
            ui.separator();
            history_section(app, ui);
            ui.separator();
            fps_section(app, ui);
        });
}

fn text_section(app: &mut CanvasApp, ui: &mut egui::Ui) {
    ui.strong("Text");
    ui.text_edit_singleline(&mut app.text_draft);

    let style = &mut app.settings.text_style;
    ui.horizontal(|ui| {
        ui.label("Size:");
        ui.add(Slider::new(&mut style.font_size, 6.0..=128.0));
    });
    ui.horizontal(|ui| {
        ui.label("Fill:");
        egui::color_picker::color_edit_button_srgba(
            ui,
            &mut style.fill,
            egui::color_picker::Alpha::OnlyBlend,
        );
        ui.checkbox(&mut style.use_stroke, "Outline");
        if style.use_stroke {
            egui::color_picker::color_edit_button_srgba(
                ui,
                &mut style.stroke,
                egui::color_picker::Alpha::OnlyBlend,
            );
        }
    });
    ui.horizontal(|ui| {
        let mut shadow = style.has_shadow();
        if ui.checkbox(&mut shadow, "Shadow").changed() {
            style.shadow_offset = if shadow { Vec2::splat(2.0) } else { Vec2::ZERO };
            style.shadow_color = Color32::from_black_alpha(128);
        }
    });
    ComboBox::from_label("Align")
        .selected_text(format!("{:?}", style.align))
        .show_ui(ui, |ui| {
            for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
                ui.selectable_value(&mut style.align, align, format!("{align:?}"));
            }
        });
    ComboBox::from_label("Style")
        .selected_text(format!("{:?}", style.font_style))
        .show_ui(ui, |ui| {
            for font_style in [FontStyle::Normal, FontStyle::Italic, FontStyle::Bold] {
                ui.selectable_value(&mut style.font_style, font_style, format!("{font_style:?}"));
            }
        });

    let can_add = !app.text_draft.trim().is_empty();
    if ui.add_enabled(can_add, egui::Button::new("Add text")).clicked() {
        let canvas = app.input.canvas_rect();
        let center = if canvas.is_positive() {
            (canvas.size() / 2.0).to_pos2()
        } else {
            egui::Pos2::ZERO
        };
        let at = app.editor.viewport().to_world(center);
        let measurer = EguiTextMeasure::new(ui.ctx());
        let text = std::mem::take(&mut app.text_draft);
        let style = app.settings.text_style.clone();
        if let Err(err) = app.editor.add_text(text, style, at, &measurer) {
            log::warn!("Failed to add text: {err}");
        }
    }
}

fn history_section(app: &CanvasApp, ui: &mut egui::Ui) {
    let history = app.editor.history();
    ui.horizontal(|ui| {
        ui.label(format!("Undo stack size: {}", history.undo_stack().len()));
        ui.label(format!("Redo stack size: {}", history.redo_stack().len()));
    });

    egui::Grid::new("command_history_grid")
        .num_columns(2)
        .spacing([40.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Undo Stack");
            ui.strong("Redo Stack");
            ui.end_row();

            let undo_stack = history.undo_stack();
            let redo_stack = history.redo_stack();
            for i in 0..undo_stack.len().max(redo_stack.len()) {
                ui.label(undo_stack.get(i).map(|c| c.label()).unwrap_or_default());
                ui.label(redo_stack.get(i).map(|c| c.label()).unwrap_or_default());
                ui.end_row();
            }
        });
}

fn fps_section(app: &CanvasApp, ui: &mut egui::Ui) {
    let history = &app.fps_history;
    ui.label(format!("FPS: {}", app.fps.current()));
    match (history.average(), history.min_max()) {
        (Some(avg), Some((min, max))) => {
            ui.label(format!("Avg: {avg}"));
            ui.label(format!("Min/Max: {min}/{max}"));
        }
        _ => {
            ui.label("Avg: --");
            ui.label("Min/Max: --/--");
        }
    }

    let (response, painter) = ui.allocate_painter(Vec2::new(200.0, 50.0), Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(128));
    let Some(level) = history.level() else {
        return;
    };
    let step = rect.width() / HISTORY_SIZE as f32;
    let points: Vec<Pos2> = history
        .samples()
        .enumerate()
        .map(|(i, fps)| {
            let fraction = (fps as f32 / 60.0).min(1.0);
            Pos2::new(
                rect.left() + i as f32 * step,
                rect.bottom() - fraction * rect.height(),
            )
        })
        .collect();
    painter.add(Shape::line(points, Stroke::new(1.0, level.color())));
}
