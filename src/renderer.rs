pub mod egui_surface;

use egui::{Color32, Pos2, Rect, Vec2};

use crate::item::{ItemKind, RasterImage, TextStyle};
use crate::scene::Scene;
use crate::selection::SelectionManager;
use crate::viewport::Viewport;

/// A render target in canvas-local screen coordinates.
///
/// The canvas never owns the surface; the host hands one in each frame.
pub trait Surface {
    /// False while the target cannot be drawn to (e.g. not yet created)
    fn is_available(&self) -> bool {
        true
    }

    fn clear(&mut self, color: Color32);

    fn draw_path(&mut self, points: &[Pos2], color: Color32, width: f32);

    fn draw_image(&mut self, image: &RasterImage, rect: Rect);

    /// Draw `text` inside `rect`; `font_size` is already scaled to the screen
    fn draw_text(&mut self, text: &str, rect: Rect, style: &TextStyle, font_size: f32);

    fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color32);
}

/// Colors and sizes of the canvas decorations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background: Color32,
    pub selection_color: Color32,
    pub selection_width: f32,
    /// Light frame drawn around every drawing item
    pub border_color: Color32,
    pub border_padding: f32,
    /// Side length of the square resize handles, in pixels
    pub handle_size: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            selection_color: Color32::from_rgb(0x8a, 0x2b, 0xe2),
            selection_width: 2.0,
            border_color: Color32::from_rgb(0xbe, 0xbe, 0xbe),
            border_padding: 5.0,
            handle_size: 8.0,
        }
    }
}

/// Paints the scene back to front, then the line being drawn, then the
/// selection box and its handles.
///
/// Args:
///     surface: Target to draw on; nothing happens if it is unavailable
///     scene: Items and the in-progress line
///     viewport: World to screen mapping
///     selection: Supplies the overlay of the selected item
///     style: Decoration colors
pub fn render_scene(
    surface: &mut dyn Surface,
    scene: &Scene,
    viewport: &Viewport,
    selection: &SelectionManager,
    style: &RenderStyle,
) {
    if !surface.is_available() {
        log::trace!("Surface unavailable, skipping frame");
        return;
    }

    surface.clear(style.background);
    let scale = viewport.scale();

    for item in scene.items() {
        let frame = viewport.rect_to_screen(item.frame());
        match item.kind() {
            ItemKind::Drawing(drawing) => {
                let offset = item.position().to_vec2();
                for line in drawing.lines() {
                    let points: Vec<Pos2> = line
                        .points()
                        .iter()
                        .map(|p| viewport.to_screen(*p + offset))
                        .collect();
                    surface.draw_path(&points, line.color(), line.width() * scale);
                }
                surface.stroke_rect(
                    frame.expand(style.border_padding * scale),
                    style.border_color,
                    1.0,
                );
            }
            ItemKind::Image(content) => surface.draw_image(content.raster(), frame),
            ItemKind::Text(content) => surface.draw_text(
                content.text(),
                frame,
                content.style(),
                content.style().font_size * scale,
            ),
        }
    }

    if let Some(line) = scene.current_line() {
        let points: Vec<Pos2> = line.points().iter().map(|p| viewport.to_screen(*p)).collect();
        surface.draw_path(&points, line.color(), line.width() * scale);
    }

    if let Some(overlay) = selection.overlay() {
        surface.stroke_rect(overlay.bounds, style.selection_color, style.selection_width);
        let half = Vec2::splat(style.handle_size / 2.0);
        for (_, handle) in overlay.handles {
            let rect = Rect::from_min_max(handle - half, handle + half);
            surface.fill_rect(rect, Color32::WHITE);
            surface.stroke_rect(rect, style.selection_color, 1.0);
        }
    }
}

/// One call made on a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    Path {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
    },
    Image {
        key: u64,
        rect: Rect,
    },
    Text {
        text: String,
        rect: Rect,
        font_size: f32,
    },
    StrokeRect {
        rect: Rect,
        color: Color32,
    },
    FillRect {
        rect: Rect,
        color: Color32,
    },
}

/// Surface that only records what was drawn; used headless and in tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub available: bool,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            available: true,
            ops: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn is_available(&self) -> bool {
        self.available
    }

    fn clear(&mut self, color: Color32) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(color));
    }

    fn draw_path(&mut self, points: &[Pos2], color: Color32, width: f32) {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn draw_image(&mut self, image: &RasterImage, rect: Rect) {
        self.ops.push(DrawOp::Image {
            key: image.key(),
            rect,
        });
    }

    fn draw_text(&mut self, text: &str, rect: Rect, _style: &TextStyle, font_size: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            rect,
            font_size,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32, _width: f32) {
        self.ops.push(DrawOp::StrokeRect { rect, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, Line};

    #[test]
    fn test_unavailable_surface_is_untouched() {
        let mut surface = RecordingSurface::default();
        let scene = Scene::new();
        render_scene(
            &mut surface,
            &scene,
            &Viewport::default(),
            &SelectionManager::default(),
            &RenderStyle::default(),
        );
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_drawing_gets_border_and_scaled_path() {
        let mut scene = Scene::new();
        let line = Line::from_points(
            vec![Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0)],
            Color32::RED,
            2.0,
        );
        scene.add_item(Item::drawing(line)).unwrap();
        let mut viewport = Viewport::default();
        viewport.zoom_at(Pos2::ZERO, 2.0);

        let mut surface = RecordingSurface::new();
        render_scene(
            &mut surface,
            &scene,
            &viewport,
            &SelectionManager::default(),
            &RenderStyle::default(),
        );

        assert_eq!(surface.ops.len(), 3);
        assert_eq!(
            surface.ops[1],
            DrawOp::Path {
                points: vec![Pos2::new(20.0, 20.0), Pos2::new(40.0, 60.0)],
                color: Color32::RED,
                width: 4.0,
            }
        );
        assert_eq!(
            surface.ops[2],
            DrawOp::StrokeRect {
                rect: Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(50.0, 70.0)),
                color: RenderStyle::default().border_color,
            }
        );
    }
}
