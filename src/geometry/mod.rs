use egui::{Pos2, Rect};

pub mod hit_testing;
pub mod resize;

pub use hit_testing::hit_test;
pub use resize::{Corner, ResizeStart, resize_frame};

/// Calculate the bounding box for a set of points
pub fn calculate_bounds<'a>(points: impl IntoIterator<Item = &'a Pos2>) -> Rect {
    let mut bounds = Rect::NOTHING;
    for point in points {
        bounds.extend_with(*point);
    }
    bounds
}

/// True when the rect is finite and not inverted
pub fn is_valid_bounds(rect: &Rect) -> bool {
    rect.min.x.is_finite()
        && rect.min.y.is_finite()
        && rect.max.x.is_finite()
        && rect.max.y.is_finite()
        && rect.min.x <= rect.max.x
        && rect.min.y <= rect.max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_points() {
        let points = [Pos2::new(3.0, 9.0), Pos2::new(-1.0, 4.0), Pos2::new(7.0, 5.0)];
        let bounds = calculate_bounds(&points);
        assert_eq!(bounds.min, Pos2::new(-1.0, 4.0));
        assert_eq!(bounds.max, Pos2::new(7.0, 9.0));
        assert!(is_valid_bounds(&bounds));
    }

    #[test]
    fn test_empty_points_give_invalid_bounds() {
        let empty: [Pos2; 0] = [];
        let bounds = calculate_bounds(&empty);
        assert!(!is_valid_bounds(&bounds));
    }
}
