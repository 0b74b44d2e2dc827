use egui::{Color32, Pos2, Rect, Vec2};

use crate::geometry::calculate_bounds;

/// A freehand polyline.
///
/// Points are appended while the line is being drawn; once it is committed to
/// an item it is only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

impl Line {
    /// Start a line at `start`
    pub fn new(start: Pos2, color: Color32, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width,
        }
    }

    pub fn from_points(points: Vec<Pos2>, color: Color32, width: f32) -> Self {
        Self {
            points,
            color,
            width,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        calculate_bounds(&self.points)
    }

    /// Copy of this line with every point shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
            color: self.color,
            width: self.width,
        }
    }
}

/// Payload of a drawing item: lines in item-local space
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    lines: Vec<Line>,
}

impl Drawing {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn bounds(&self) -> Rect {
        calculate_bounds(self.lines.iter().flat_map(|line| line.points.iter()))
    }

    /// Scale every point about `bounds.min` so the content spans `size`.
    /// Axes with zero extent are left as they are.
    pub(crate) fn scale_to(&mut self, bounds: Rect, size: Vec2) {
        let factor = Vec2::new(
            axis_factor(bounds.width(), size.x),
            axis_factor(bounds.height(), size.y),
        );
        for line in &mut self.lines {
            for point in &mut line.points {
                *point = bounds.min + (*point - bounds.min) * factor;
            }
        }
    }
}

fn axis_factor(current: f32, target: f32) -> f32 {
    if current > 0.0 && target.is_finite() {
        target / current
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_keeps_origin() {
        let line = Line::from_points(
            vec![Pos2::new(10.0, 10.0), Pos2::new(30.0, 50.0)],
            Color32::BLACK,
            2.0,
        );
        let mut drawing = Drawing::new(vec![line]);
        let bounds = drawing.bounds();
        drawing.scale_to(bounds, Vec2::new(40.0, 20.0));
        let scaled = drawing.bounds();
        assert_eq!(scaled.min, Pos2::new(10.0, 10.0));
        assert_eq!(scaled.size(), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn test_flat_axis_is_not_scaled() {
        let line = Line::from_points(
            vec![Pos2::new(0.0, 5.0), Pos2::new(50.0, 5.0)],
            Color32::BLACK,
            2.0,
        );
        let mut drawing = Drawing::new(vec![line]);
        let bounds = drawing.bounds();
        drawing.scale_to(bounds, Vec2::new(100.0, 30.0));
        let scaled = drawing.bounds();
        assert_eq!(scaled.width(), 100.0);
        assert_eq!(scaled.height(), 0.0);
    }
}
