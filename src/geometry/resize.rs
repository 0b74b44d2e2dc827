use egui::{CursorIcon, Pos2, Rect, Vec2};

/// Represents a corner of a selection box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Handle order used for drawing and hit-testing, clockwise from top-left
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomRight => "bottom_right",
            Corner::BottomLeft => "bottom_left",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// Direction in which this corner grows the rect: +1 grows with the
    /// pointer, -1 grows against it.
    fn growth(&self) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(-1.0, -1.0),
            Corner::TopRight => Vec2::new(1.0, -1.0),
            Corner::BottomRight => Vec2::new(1.0, 1.0),
            Corner::BottomLeft => Vec2::new(-1.0, 1.0),
        }
    }

    /// Position of this corner on `rect`
    pub fn on(&self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomRight => rect.right_bottom(),
            Corner::BottomLeft => rect.left_bottom(),
        }
    }

    /// The corner that stays fixed while this one is dragged
    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }
}

/// Snapshot taken when a resize gesture begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    /// World-space frame of the item at grab time
    pub frame: Rect,
    /// World-space pointer position at grab time
    pub pointer: Pos2,
}

impl ResizeStart {
    pub fn aspect_ratio(&self) -> Option<f32> {
        let height = self.frame.height();
        (height > 0.0).then(|| self.frame.width() / height)
    }
}

/// Compute the frame produced by dragging `corner` to `pointer`.
///
/// The opposite corner stays fixed. With `aspect_lock` the height follows the
/// width using the starting aspect ratio. Returns `None` when either axis
/// would drop below `min_size`; the caller keeps the previous frame. An axis
/// that starts flat (a straight line) is exempt from the minimum.
pub fn resize_frame(
    start: &ResizeStart,
    corner: Corner,
    pointer: Pos2,
    aspect_lock: bool,
    min_size: f32,
) -> Option<Rect> {
    let delta = pointer - start.pointer;
    let growth = corner.growth();

    let width = start.frame.width() + growth.x * delta.x;
    let mut height = start.frame.height() + growth.y * delta.y;
    if aspect_lock {
        if let Some(ratio) = start.aspect_ratio() {
            height = width / ratio;
        }
    }

    let flat_x = start.frame.width() <= 0.0;
    let flat_y = start.frame.height() <= 0.0;
    let width = if flat_x { width.max(0.0) } else { width };
    let height = if flat_y { height.max(0.0) } else { height };
    if (!flat_x && !(width >= min_size)) || (!flat_y && !(height >= min_size)) {
        return None;
    }

    let anchor = corner.opposite().on(start.frame);
    let x = if growth.x < 0.0 { anchor.x - width } else { anchor.x };
    let y = if growth.y < 0.0 { anchor.y - height } else { anchor.y };
    Some(Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(start: &ResizeStart, corner: Corner, pointer: Pos2, aspect_lock: bool) -> Option<Rect> {
        resize_frame(start, corner, pointer, aspect_lock, 20.0)
    }

    fn start() -> ResizeStart {
        ResizeStart {
            frame: Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0)),
            pointer: Pos2::new(100.0, 100.0),
        }
    }

    #[test]
    fn test_bottom_right_grows_without_moving() {
        let rect = drag(&start(), Corner::BottomRight, Pos2::new(150.0, 130.0), false).unwrap();
        assert_eq!(rect.min, Pos2::ZERO);
        assert_eq!(rect.size(), Vec2::new(150.0, 130.0));
    }

    #[test]
    fn test_bottom_right_aspect_lock() {
        let rect = drag(&start(), Corner::BottomRight, Pos2::new(150.0, 130.0), true).unwrap();
        assert_eq!(rect.min, Pos2::ZERO);
        assert_eq!(rect.size(), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn test_top_left_shifts_position() {
        let start = ResizeStart {
            pointer: Pos2::ZERO,
            ..start()
        };
        let rect = drag(&start, Corner::TopLeft, Pos2::new(10.0, 30.0), false).unwrap();
        assert_eq!(rect.min, Pos2::new(10.0, 30.0));
        assert_eq!(rect.max, Pos2::new(100.0, 100.0));
    }

    #[test]
    fn test_top_right_and_bottom_left_keep_opposite_corner() {
        let top_right = ResizeStart {
            pointer: Pos2::new(100.0, 0.0),
            ..start()
        };
        let rect = drag(&top_right, Corner::TopRight, Pos2::new(120.0, -20.0), false).unwrap();
        assert_eq!(rect.left_bottom(), Pos2::new(0.0, 100.0));
        assert_eq!(rect.size(), Vec2::new(120.0, 120.0));

        let bottom_left = ResizeStart {
            pointer: Pos2::new(0.0, 100.0),
            ..start()
        };
        let rect = drag(&bottom_left, Corner::BottomLeft, Pos2::new(40.0, 90.0), false).unwrap();
        assert_eq!(rect.right_top(), Pos2::new(100.0, 0.0));
        assert_eq!(rect.size(), Vec2::new(60.0, 90.0));
    }

    #[test]
    fn test_top_left_aspect_lock_anchors_bottom_right() {
        let start = ResizeStart {
            frame: Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0)),
            pointer: Pos2::ZERO,
        };
        let rect = drag(&start, Corner::TopLeft, Pos2::new(100.0, 0.0), true).unwrap();
        assert_eq!(rect.size(), Vec2::new(100.0, 50.0));
        assert_eq!(rect.max, Pos2::new(200.0, 100.0));
    }

    #[test]
    fn test_below_minimum_is_rejected() {
        let result = drag(&start(), Corner::BottomRight, Pos2::new(15.0, 150.0), false);
        assert!(result.is_none());
    }

    #[test]
    fn test_flat_frame_ignores_aspect_lock() {
        let start = ResizeStart {
            frame: Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 0.0)),
            pointer: Pos2::new(100.0, 0.0),
        };
        let rect = drag(&start, Corner::BottomRight, Pos2::new(120.0, 40.0), true).unwrap();
        assert_eq!(rect.size(), Vec2::new(120.0, 40.0));
    }

    #[test]
    fn test_flat_line_resizes_along_its_length() {
        let start = ResizeStart {
            frame: Rect::from_min_max(Pos2::new(0.0, 50.0), Pos2::new(100.0, 50.0)),
            pointer: Pos2::new(0.0, 50.0),
        };
        let rect = drag(&start, Corner::TopLeft, Pos2::new(-50.0, 55.0), false).unwrap();
        assert_eq!(rect.min, Pos2::new(-50.0, 50.0));
        assert_eq!(rect.size(), Vec2::new(150.0, 0.0));
    }
}
