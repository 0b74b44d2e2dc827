//! Canvas items: drawings, images and text.
//!
//! Every item keeps a world-space `position` and `bounds` relative to it, so
//! moving an item never touches its content.

pub mod drawing;
pub mod image;
pub mod text;

use egui::{Pos2, Rect, Vec2};

use crate::geometry::is_valid_bounds;
use crate::id_generator::{ItemId, generate_id};

pub use self::drawing::{Drawing, Line};
pub use self::image::{ImageContent, RasterImage};
pub use self::text::{TextContent, TextMeasure, TextStyle};

/// Content of an item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Drawing(Drawing),
    Image(ImageContent),
    Text(TextContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    position: Pos2,
    bounds: Rect,
    kind: ItemKind,
}

impl Item {
    /// Wrap a finished line. Points stay in world space, so the item sits at
    /// the origin and its bounds are the extent of the points.
    pub fn drawing(line: Line) -> Self {
        let drawing = Drawing::new(vec![line]);
        Self {
            id: generate_id(),
            position: Pos2::ZERO,
            bounds: drawing.bounds(),
            kind: ItemKind::Drawing(drawing),
        }
    }

    /// Place an image with its top-left corner at `at`, at its natural size
    pub fn image(raster: RasterImage, at: Pos2) -> Self {
        let content = ImageContent::new(raster);
        Self {
            id: generate_id(),
            position: at,
            bounds: content.bounds(),
            kind: ItemKind::Image(content),
        }
    }

    /// Anchor text at `at`; alignment and baseline decide where the box falls
    pub fn text(
        text: impl Into<String>,
        style: TextStyle,
        at: Pos2,
        measurer: &dyn TextMeasure,
    ) -> Self {
        let content = TextContent::new(text, style);
        Self {
            id: generate_id(),
            position: at,
            bounds: content.measure_bounds(measurer),
            kind: ItemKind::Text(content),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    /// Local bounds relative to `position`
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// World-space rect covered by the item
    pub fn frame(&self) -> Rect {
        self.bounds.translate(self.position.to_vec2())
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ItemKind::Drawing(_) => "drawing",
            ItemKind::Image(_) => "image",
            ItemKind::Text(_) => "text",
        }
    }

    pub fn as_image(&self) -> Option<&ImageContent> {
        match &self.kind {
            ItemKind::Image(content) => Some(content),
            _ => None,
        }
    }

    /// Swap the image content, keeping position. Returns false for non-images.
    pub(crate) fn set_image(&mut self, content: ImageContent) -> bool {
        match &mut self.kind {
            ItemKind::Image(current) => {
                *current = content;
                self.recompute_bounds();
                true
            }
            _ => false,
        }
    }

    /// Recompute bounds from geometry.
    ///
    /// Text bounds come from font metrics and are left as measured.
    pub fn recompute_bounds(&mut self) {
        match &self.kind {
            ItemKind::Drawing(drawing) => self.bounds = drawing.bounds(),
            ItemKind::Image(content) => self.bounds = content.bounds(),
            ItemKind::Text(_) => {}
        }
    }

    pub fn has_valid_bounds(&self) -> bool {
        is_valid_bounds(&self.bounds)
    }

    /// Text only scales uniformly, so resizes must keep its aspect ratio
    pub fn keeps_aspect(&self) -> bool {
        matches!(self.kind, ItemKind::Text(_))
    }

    /// Resize the content so that `frame()` becomes `rect`.
    ///
    /// A drawing axis with zero extent cannot stretch and keeps its position.
    /// Text scales by the smaller of the two ratios and sits at `rect.min`.
    pub fn set_frame(&mut self, rect: Rect) {
        let mut position = self.position;
        match &mut self.kind {
            ItemKind::Drawing(drawing) => {
                drawing.scale_to(self.bounds, rect.size());
                let bounds = drawing.bounds();
                if bounds.width() > 0.0 {
                    position.x = rect.min.x - bounds.min.x;
                }
                if bounds.height() > 0.0 {
                    position.y = rect.min.y - bounds.min.y;
                }
                self.bounds = bounds;
            }
            ItemKind::Image(content) => {
                content.set_size(rect.size());
                self.bounds = content.bounds();
                position = rect.min - self.bounds.min.to_vec2();
            }
            ItemKind::Text(content) => {
                let current = self.bounds.size();
                if current.x > 0.0 && current.y > 0.0 && rect.is_positive() {
                    let factor = (rect.width() / current.x).min(rect.height() / current.y);
                    content.scale_font(factor);
                    self.bounds = Rect::from_min_max(
                        (self.bounds.min.to_vec2() * factor).to_pos2(),
                        (self.bounds.max.to_vec2() * factor).to_pos2(),
                    );
                }
                position = rect.min - self.bounds.min.to_vec2();
            }
        }
        self.position = position;
    }

    /// Offset from the item position to a world point
    pub fn grab_offset(&self, world: Pos2) -> Vec2 {
        world - self.position
    }
}
