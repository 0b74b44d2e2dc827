use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::error::CanvasError;

// Every distinct pixel buffer gets its own key so renderers can cache textures
static NEXT_RASTER_KEY: AtomicU64 = AtomicU64::new(1);

fn next_raster_key() -> u64 {
    NEXT_RASTER_KEY.fetch_add(1, Ordering::SeqCst)
}

/// Decoded RGBA pixels shared between items, commands and the texture cache
#[derive(Clone)]
pub struct RasterImage {
    key: u64,
    pixels: Arc<RgbaImage>,
}

// Custom Debug implementation so the pixel buffer is not dumped into logs
impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("key", &self.key)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for RasterImage {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl RasterImage {
    /// Wrap raw RGBA bytes, failing when the buffer does not match the size
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, CanvasError> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || bytes.len() != expected {
            return Err(CanvasError::InvalidRaster {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        let actual = bytes.len();
        let pixels = RgbaImage::from_raw(width, height, bytes).ok_or(CanvasError::InvalidRaster {
            width,
            height,
            expected,
            actual,
        })?;
        Ok(Self::from_image(pixels))
    }

    /// Decode an encoded image file (png, jpeg, ...)
    pub fn decode(bytes: &[u8]) -> Result<Self, CanvasError> {
        let decoded = image::load_from_memory(bytes)?;
        log::debug!("Decoded image: {}x{}", decoded.width(), decoded.height());
        let rgba = decoded.to_rgba8();
        Self::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
    }

    fn from_image(pixels: RgbaImage) -> Self {
        Self {
            key: next_raster_key(),
            pixels: Arc::new(pixels),
        }
    }

    /// Cache key; changes whenever the pixels change
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy of this image with a polyline painted into the pixels.
    ///
    /// `points` are in pixel coordinates. The original buffer is untouched.
    pub fn with_polyline(&self, points: &[Pos2], color: Color32, width: f32) -> Self {
        let mut pixels = (*self.pixels).clone();
        let radius = (width / 2.0).max(0.5);
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        let paint = Rgba([r, g, b, a]);

        match points {
            [] => {}
            [single] => stamp_disk(&mut pixels, *single, radius, paint),
            _ => {
                for segment in points.windows(2) {
                    let (from, to) = (segment[0], segment[1]);
                    let steps = ((to - from).length() / 0.5).ceil().max(1.0) as usize;
                    for step in 0..=steps {
                        let t = step as f32 / steps as f32;
                        stamp_disk(&mut pixels, from.lerp(to, t), radius, paint);
                    }
                }
            }
        }
        Self::from_image(pixels)
    }
}

fn stamp_disk(pixels: &mut RgbaImage, center: Pos2, radius: f32, paint: Rgba<u8>) {
    let (width, height) = (pixels.width() as i64, pixels.height() as i64);
    let min_x = ((center.x - radius).floor() as i64).max(0);
    let max_x = ((center.x + radius).ceil() as i64).min(width - 1);
    let min_y = ((center.y - radius).floor() as i64).max(0);
    let max_y = ((center.y + radius).ceil() as i64).min(height - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius * radius {
                let pixel = pixels.get_pixel_mut(x as u32, y as u32);
                *pixel = blend(*pixel, paint);
            }
        }
    }
}

fn blend(under: Rgba<u8>, over: Rgba<u8>) -> Rgba<u8> {
    let alpha = over[3] as u32;
    if alpha == 255 {
        return over;
    }
    let mix = |o: u8, u: u8| ((o as u32 * alpha + u as u32 * (255 - alpha)) / 255) as u8;
    Rgba([
        mix(over[0], under[0]),
        mix(over[1], under[1]),
        mix(over[2], under[2]),
        under[3].max(over[3]),
    ])
}

/// Payload of an image item
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    raster: RasterImage,
    /// Display size in world units
    size: Vec2,
}

impl ImageContent {
    pub fn new(raster: RasterImage) -> Self {
        let size = raster.size();
        Self { raster, size }
    }

    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    /// Size of the decoded image in pixels
    pub fn original_size(&self) -> Vec2 {
        self.raster.size()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size)
    }

    /// Same display size, new pixels
    pub fn with_raster(&self, raster: RasterImage) -> Self {
        Self {
            raster,
            size: self.size,
        }
    }

    /// Raster pixels per world unit on each axis
    pub fn pixels_per_unit(&self) -> Vec2 {
        let original = self.original_size();
        Vec2::new(
            if self.size.x > 0.0 { original.x / self.size.x } else { 1.0 },
            if self.size.y > 0.0 { original.y / self.size.y } else { 1.0 },
        )
    }

    /// Map an item-local point into pixel coordinates of the raster
    pub fn local_to_pixel(&self, local: Pos2) -> Pos2 {
        (local.to_vec2() * self.pixels_per_unit()).to_pos2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> RasterImage {
        RasterImage::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn test_malformed_buffer_fails_fast() {
        let result = RasterImage::from_rgba(4, 4, vec![0; 10]);
        assert!(matches!(
            result,
            Err(CanvasError::InvalidRaster { expected: 64, actual: 10, .. })
        ));
        assert!(RasterImage::from_rgba(0, 4, vec![]).is_err());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            RasterImage::decode(b"definitely not a png"),
            Err(CanvasError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_polyline_paints_copy() {
        let original = white(10, 10);
        let painted = original.with_polyline(
            &[Pos2::new(0.0, 5.0), Pos2::new(10.0, 5.0)],
            Color32::RED,
            2.0,
        );
        assert_ne!(original.key(), painted.key());
        assert_eq!(painted.pixels().get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(original.pixels().get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
        assert_eq!(painted.pixels().get_pixel(5, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_local_to_pixel_scales_with_display_size() {
        let mut content = ImageContent::new(white(100, 50));
        content.set_size(Vec2::new(200.0, 100.0));
        assert_eq!(content.local_to_pixel(Pos2::new(100.0, 50.0)), Pos2::new(50.0, 25.0));
    }
}
