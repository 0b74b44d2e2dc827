use egui::text::{LayoutJob, TextFormat};
use egui::{
    Align2, Color32, Context, FontFamily, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2,
};

use super::Surface;
use crate::item::text::{FontStyle, TextAlign, TextMeasure, TextMetrics, TextStyle};
use crate::item::RasterImage;
use crate::texture_manager::TextureCache;

const FULL_UV: Rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));

fn font_id(style: &TextStyle, size: f32) -> FontId {
    let family = if style.is_monospace() {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    FontId::new(size.max(1.0), family)
}

/// Draws onto an egui painter. Canvas coordinates are shifted by `offset`,
/// the top-left of the canvas widget.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    offset: Vec2,
    textures: &'a mut TextureCache,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, offset: Vec2, textures: &'a mut TextureCache) -> Self {
        Self {
            painter,
            offset,
            textures,
        }
    }

    fn rect(&self, rect: Rect) -> Rect {
        rect.translate(self.offset)
    }

    fn paint_text(
        &self,
        text: &str,
        style: &TextStyle,
        font_size: f32,
        color: Color32,
        anchor: Pos2,
        align: Align2,
    ) {
        let format = TextFormat {
            font_id: font_id(style, font_size),
            color,
            italics: style.font_style == FontStyle::Italic,
            ..Default::default()
        };
        let galley = self
            .painter
            .layout_job(LayoutJob::single_section(text.to_owned(), format));
        let rect = align.anchor_size(anchor, galley.size());
        self.painter.galley(rect.min, galley, color);
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.painter.clip_rect(), 0.0, color);
    }

    fn draw_path(&mut self, points: &[Pos2], color: Color32, width: f32) {
        match points {
            [] => {}
            [single] => {
                self.painter
                    .circle_filled(*single + self.offset, width / 2.0, color);
            }
            _ => {
                let points = points.iter().map(|p| *p + self.offset).collect();
                self.painter.add(Shape::line(points, Stroke::new(width, color)));
            }
        }
    }

    fn draw_image(&mut self, image: &RasterImage, rect: Rect) {
        match self.textures.get_or_create(image, self.painter.ctx()) {
            Ok(texture) => {
                self.painter
                    .image(texture, self.rect(rect), FULL_UV, Color32::WHITE);
            }
            Err(err) => log::error!("Failed to upload image texture: {err}"),
        }
    }

    fn draw_text(&mut self, text: &str, rect: Rect, style: &TextStyle, font_size: f32) {
        let rect = self.rect(rect);
        let (anchor, align) = match style.align {
            TextAlign::Left => (rect.left_center(), Align2::LEFT_CENTER),
            TextAlign::Center => (rect.center(), Align2::CENTER_CENTER),
            TextAlign::Right => (rect.right_center(), Align2::RIGHT_CENTER),
        };
        let ratio = if style.font_size > 0.0 {
            font_size / style.font_size
        } else {
            1.0
        };

        if style.has_shadow() {
            let shadow_anchor = anchor + style.shadow_offset * ratio;
            self.paint_text(
                text,
                style,
                font_size,
                style.shadow_color,
                shadow_anchor,
                align,
            );
        }
        if style.use_stroke && style.stroke_width > 0.0 {
            let d = style.stroke_width * ratio / 2.0;
            let offsets = [
                Vec2::new(-d, 0.0),
                Vec2::new(d, 0.0),
                Vec2::new(0.0, -d),
                Vec2::new(0.0, d),
            ];
            for offset in offsets {
                self.paint_text(text, style, font_size, style.stroke, anchor + offset, align);
            }
        }
        self.paint_text(text, style, font_size, style.fill, anchor, align);
        if style.font_style == FontStyle::Bold {
            // egui fonts have no bold face; overstrike instead
            let nudge = Vec2::new((font_size / 24.0).max(0.5), 0.0);
            self.paint_text(text, style, font_size, style.fill, anchor + nudge, align);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32, width: f32) {
        self.painter
            .rect_stroke(self.rect(rect), 0.0, Stroke::new(width, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(self.rect(rect), 0.0, color);
    }
}

/// Measures text with egui's loaded fonts
pub struct EguiTextMeasure {
    ctx: Context,
}

impl EguiTextMeasure {
    pub fn new(ctx: &Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl TextMeasure for EguiTextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let font = font_id(style, style.font_size);
        let width = self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font, style.fill)
                .size()
                .x
        });
        TextMetrics {
            width,
            ascent: None,
            descent: None,
        }
    }
}
