use egui::{Pos2, Rect, Vec2};

use crate::config::EditorConfig;

/// Pan and zoom of the infinite canvas.
///
/// `screen = world * scale + pan` and `world = (screen - pan) / scale`.
/// Screen coordinates are relative to the canvas origin, not the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Vec2,
    scale: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            pan: Vec2::ZERO,
            scale: initial_scale(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zoom_bounds(&self) -> (f32, f32) {
        (self.min_zoom, self.max_zoom)
    }

    /// Translate the view by a screen-space delta
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiply the zoom by `factor` while keeping the world point under
    /// `screen_point` fixed. The scale is clamped silently and the pan is
    /// derived from the clamped scale.
    pub fn zoom_at(&mut self, screen_point: Pos2, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring zoom factor {factor}");
            return;
        }
        let anchor = self.to_world(screen_point);
        let new_scale = (self.scale * factor).clamp(self.min_zoom, self.max_zoom);
        if new_scale == self.scale {
            return;
        }
        self.scale = new_scale;
        self.pan = screen_point.to_vec2() - anchor.to_vec2() * new_scale;
    }

    pub fn to_world(&self, screen: Pos2) -> Pos2 {
        ((screen - self.pan).to_vec2() / self.scale).to_pos2()
    }

    pub fn to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.scale + self.pan).to_pos2()
    }

    pub fn rect_to_screen(&self, world: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(world.min), self.to_screen(world.max))
    }

    pub fn screen_delta_to_world(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Back to 100% (or the nearest allowed zoom) with the world origin at
    /// the canvas origin
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.scale = initial_scale(self.min_zoom, self.max_zoom);
    }
}

// 100% when allowed, else the nearest bound
fn initial_scale(min_zoom: f32, max_zoom: f32) -> f32 {
    1.0_f32.max(min_zoom).min(max_zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let viewport = Viewport::default();
        let p = Pos2::new(12.5, -3.0);
        assert_eq!(viewport.to_world(p), p);
        assert_eq!(viewport.to_screen(p), p);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Pos2::new(100.0, 100.0), 1000.0);
        assert_eq!(viewport.scale(), 5.0);
        viewport.zoom_at(Pos2::new(100.0, 100.0), 0.0001);
        assert!((viewport.scale() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_factor_ignored() {
        let mut viewport = Viewport::default();
        viewport.zoom_at(Pos2::ZERO, f32::NAN);
        viewport.zoom_at(Pos2::ZERO, -2.0);
        assert_eq!(viewport.scale(), 1.0);
    }
}
