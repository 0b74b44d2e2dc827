use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use thiserror::Error;

use crate::item::RasterImage;

/// Errors that can occur during texture generation
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// GPU textures for raster images, keyed by the raster's cache key.
///
/// Drawing onto an image produces a new key, so stale textures simply stop
/// being used and age out of the cache.
pub struct TextureCache {
    textures: HashMap<u64, TextureHandle>,
    /// Frame in which each texture was last used
    last_used: HashMap<u64, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureCache {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `image`, uploading it on first use
    pub fn get_or_create(
        &mut self,
        image: &RasterImage,
        ctx: &Context,
    ) -> Result<TextureId, TextureGenerationError> {
        let key = image.key();
        if let Some(handle) = self.textures.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return Ok(handle.id());
        }

        let color_image = to_color_image(image)?;
        let handle = ctx.load_texture(format!("raster_{key}"), color_image, TextureOptions::LINEAR);
        log::debug!("Uploaded texture for raster {key}");
        let id = handle.id();
        self.textures.insert(key, handle);
        self.last_used.insert(key, self.current_frame);
        self.prune_cache_if_needed();
        Ok(id)
    }

    /// Evicts the least recently used textures above the size limit
    fn prune_cache_if_needed(&mut self) {
        if self.textures.len() <= self.max_cache_size {
            return;
        }
        let mut entries: Vec<(u64, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.iter().take(to_remove) {
            self.textures.remove(key);
            self.last_used.remove(key);
        }
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.last_used.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn contains(&self, key: u64) -> bool {
        self.textures.contains_key(&key)
    }
}

fn to_color_image(image: &RasterImage) -> Result<ColorImage, TextureGenerationError> {
    let (width, height) = (image.width(), image.height());
    let raw = image.pixels().as_raw();
    if width == 0 || height == 0 || raw.len() != (width as usize) * (height as usize) * 4 {
        return Err(TextureGenerationError::InvalidDimensions { width, height });
    }
    Ok(ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        raw,
    ))
}
