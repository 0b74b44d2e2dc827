use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Line height relative to font size, used as the text box height
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Ascent estimate when the font metrics do not report one
pub const FALLBACK_ASCENT: f32 = 0.8;
/// Descent estimate when the font metrics do not report one
pub const FALLBACK_DESCENT: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
}

/// Horizontal placement of the text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of the text relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    Top,
    Hanging,
    #[default]
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

/// Visual attributes collected by the host's text form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_style: FontStyle,
    pub fill: Color32,
    pub stroke: Color32,
    pub stroke_width: f32,
    pub use_stroke: bool,
    pub shadow_color: Color32,
    pub shadow_blur: f32,
    pub shadow_offset: Vec2,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_owned(),
            font_size: 16.0,
            font_style: FontStyle::Normal,
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
            stroke_width: 1.0,
            use_stroke: false,
            shadow_color: Color32::BLACK,
            shadow_blur: 0.0,
            shadow_offset: Vec2::ZERO,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }
}

impl TextStyle {
    pub fn has_shadow(&self) -> bool {
        self.shadow_color.a() > 0 && (self.shadow_offset != Vec2::ZERO || self.shadow_blur > 0.0)
    }

    pub fn is_monospace(&self) -> bool {
        let family = self.font_family.to_lowercase();
        family.contains("mono") || family.contains("courier")
    }
}

/// Measured extent of a single line of text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    /// Height above the baseline; `None` when the font does not report it
    pub ascent: Option<f32>,
    /// Depth below the baseline; `None` when the font does not report it
    pub descent: Option<f32>,
}

/// Font metrics supplied by the host's rendering surface
pub trait TextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free estimate: every glyph is 0.6 em wide
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasure;

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * style.font_size * 0.6,
            ascent: None,
            descent: None,
        }
    }
}

/// Bounds of the text relative to its anchor point
pub fn text_bounds(metrics: &TextMetrics, style: &TextStyle) -> Rect {
    let size = style.font_size;
    let width = metrics.width;
    let height = size * LINE_HEIGHT_FACTOR;
    let ascent = metrics.ascent.unwrap_or(size * FALLBACK_ASCENT);
    let descent = metrics.descent.unwrap_or(size * FALLBACK_DESCENT);

    let (min_x, max_x) = match style.align {
        TextAlign::Left => (0.0, width),
        TextAlign::Center => (-width / 2.0, width / 2.0),
        TextAlign::Right => (-width, 0.0),
    };
    let (min_y, max_y) = match style.baseline {
        TextBaseline::Top | TextBaseline::Hanging => (0.0, height),
        TextBaseline::Middle => (-height / 2.0, height / 2.0),
        TextBaseline::Bottom | TextBaseline::Ideographic => (-height, 0.0),
        TextBaseline::Alphabetic => (-ascent, descent),
    };
    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// Payload of a text item
#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    text: String,
    style: TextStyle,
}

impl TextContent {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn measure_bounds(&self, measurer: &dyn TextMeasure) -> Rect {
        text_bounds(&measurer.measure(&self.text, &self.style), &self.style)
    }

    pub(crate) fn scale_font(&mut self, factor: f32) {
        self.style.font_size *= factor;
        self.style.stroke_width *= factor;
        self.style.shadow_offset *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(align: TextAlign, baseline: TextBaseline) -> TextStyle {
        TextStyle {
            font_size: 10.0,
            align,
            baseline,
            ..TextStyle::default()
        }
    }

    #[test]
    fn test_centered_middle_bounds() {
        let metrics = TextMetrics {
            width: 40.0,
            ..Default::default()
        };
        let bounds = text_bounds(&metrics, &style(TextAlign::Center, TextBaseline::Middle));
        assert_eq!(bounds.min, Pos2::new(-20.0, -6.0));
        assert_eq!(bounds.max, Pos2::new(20.0, 6.0));
    }

    #[test]
    fn test_alphabetic_uses_fallback_metrics() {
        let metrics = TextMetrics {
            width: 40.0,
            ..Default::default()
        };
        let bounds = text_bounds(&metrics, &style(TextAlign::Right, TextBaseline::Alphabetic));
        assert_eq!(bounds.min, Pos2::new(-40.0, -8.0));
        assert_eq!(bounds.max, Pos2::new(0.0, 2.0));
    }

    #[test]
    fn test_left_top_bounds_start_at_anchor() {
        let metrics = TextMetrics {
            width: 30.0,
            ascent: Some(7.0),
            descent: Some(3.0),
        };
        let bounds = text_bounds(&metrics, &style(TextAlign::Left, TextBaseline::Top));
        assert_eq!(bounds.min, Pos2::ZERO);
        assert_eq!(bounds.max, Pos2::new(30.0, 12.0));
    }

    #[test]
    fn test_estimated_measure() {
        let style = style(TextAlign::Left, TextBaseline::Top);
        let metrics = EstimatedTextMeasure.measure("abcd", &style);
        assert_eq!(metrics.width, 24.0);
    }
}
