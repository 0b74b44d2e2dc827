use std::sync::Arc;

use egui::{Align2, Color32, Id, LayerId, Order, Pos2, Rect};
use futures::channel::oneshot;

use crate::error::CanvasError;
use crate::item::RasterImage;

type DecodeResult = Result<RasterImage, CanvasError>;

/// A dropped image still being decoded
struct PendingImage {
    name: String,
    /// Canvas-local screen position of the drop
    drop_pos: Pos2,
    receiver: oneshot::Receiver<DecodeResult>,
}

/// A dropped image ready to be placed on the canvas
#[derive(Debug)]
pub struct DecodedImage {
    pub name: String,
    pub drop_pos: Pos2,
    pub raster: RasterImage,
}

/// Picks up files dropped onto the window and decodes images off the UI thread
#[derive(Default)]
pub struct FileHandler {
    pending: Vec<PendingImage>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start decoding any files dropped this frame.
    /// Returns true if any decode was started.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context, canvas_rect: Rect) -> bool {
        let (dropped, pointer) =
            ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.hover_pos()));
        if dropped.is_empty() {
            return false;
        }

        let drop_pos = pointer
            .filter(|pos| canvas_rect.contains(*pos))
            .unwrap_or_else(|| canvas_rect.center())
            - canvas_rect.min.to_vec2();

        let mut started = false;
        for file in &dropped {
            let name = file_name(file);
            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {name}");
                continue;
            }
            let Some(bytes) = read_bytes(file, &name) else {
                continue;
            };
            log::info!("Decoding dropped image {name} ({} bytes)", bytes.len());
            let receiver = spawn_decode(bytes, ctx.clone());
            self.pending.push(PendingImage {
                name,
                drop_pos,
                receiver,
            });
            started = true;
        }
        started
    }

    /// Collect finished decodes. Failures are logged and dropped.
    pub fn poll(&mut self) -> Vec<DecodedImage> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|pending| match pending.receiver.try_recv() {
            Ok(None) => true,
            Ok(Some(Ok(raster))) => {
                log::info!(
                    "Decoded {}: {}x{}",
                    pending.name,
                    raster.width(),
                    raster.height()
                );
                finished.push(DecodedImage {
                    name: pending.name.clone(),
                    drop_pos: pending.drop_pos,
                    raster,
                });
                false
            }
            Ok(Some(Err(err))) => {
                log::error!("Failed to decode {}: {err}", pending.name);
                false
            }
            Err(_) => {
                log::warn!("Decoder for {} went away", pending.name);
                false
            }
        });
        finished
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else if !file.mime.is_empty() {
                    text += &format!("\n{}", file.mime);
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            egui::TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let extension = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| {
            file.name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
        });
    matches!(
        extension.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn read_bytes(file: &egui::DroppedFile, name: &str) -> Option<Arc<[u8]>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.clone());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes.into()),
            Err(err) => {
                log::error!("Failed to read image file {name}: {err}");
                None
            }
        };
    }

    log::warn!("Dropped file has no accessible data: {name}");
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_decode(bytes: Arc<[u8]>, ctx: egui::Context) -> oneshot::Receiver<DecodeResult> {
    let (sender, receiver) = oneshot::channel();
    std::thread::spawn(move || {
        // The receiver is gone if the app shut down meanwhile
        let _ = sender.send(RasterImage::decode(&bytes));
        ctx.request_repaint();
    });
    receiver
}

#[cfg(target_arch = "wasm32")]
fn spawn_decode(bytes: Arc<[u8]>, ctx: egui::Context) -> oneshot::Receiver<DecodeResult> {
    let (sender, receiver) = oneshot::channel();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = sender.send(RasterImage::decode(&bytes));
        ctx.request_repaint();
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(name: &str, mime: &str) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file(&dropped("", "image/png")));
        assert!(!is_image_file(&dropped("notes.png", "text/plain")));
        assert!(is_image_file(&dropped("photo.JPG", "")));
        assert!(!is_image_file(&dropped("notes.txt", "")));
        assert!(!is_image_file(&dropped("", "")));
    }
}
