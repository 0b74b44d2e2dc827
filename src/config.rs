use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// Environment variable naming an optional JSON config file for the native app
pub const CONFIG_ENV_VAR: &str = "CANVAS_EDITOR_CONFIG";

/// Tunable limits of the editor core.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Lower zoom bound of the viewport
    pub min_zoom: f32,
    /// Upper zoom bound of the viewport
    pub max_zoom: f32,
    /// Zoom factor applied per wheel notch
    pub zoom_step: f32,
    /// World units added around item bounds when hit-testing
    pub hit_padding: f32,
    /// Smallest width/height a resize may produce, in world units
    pub min_item_size: f32,
    /// Grab radius of the resize handles, in screen pixels
    pub handle_radius: f32,
    pub default_stroke_width: f32,
    /// Screen distance between the selection box and the toolbar
    pub toolbar_gap: f32,
    /// Padding of the border drawn around drawing items
    pub border_padding: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 1.1,
            hit_padding: 5.0,
            min_item_size: 20.0,
            handle_radius: 8.0,
            default_stroke_width: 2.0,
            toolbar_gap: 10.0,
            border_padding: 5.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, CanvasError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Load from the file named by `CANVAS_EDITOR_CONFIG`, falling back to defaults
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => match Self::load(&path) {
                Ok(config) => {
                    log::info!("Loaded editor config from {path}");
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring editor config {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), CanvasError> {
        let finite = [
            self.min_zoom,
            self.max_zoom,
            self.zoom_step,
            self.hit_padding,
            self.min_item_size,
            self.handle_radius,
            self.default_stroke_width,
            self.toolbar_gap,
            self.border_padding,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CanvasError::InvalidConfig("values must be finite".to_owned()));
        }
        if self.min_zoom <= 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(CanvasError::InvalidConfig(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step <= 1.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "zoom_step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if self.hit_padding < 0.0
            || self.min_item_size < 0.0
            || self.handle_radius < 0.0
            || self.toolbar_gap < 0.0
            || self.border_padding < 0.0
            || self.default_stroke_width <= 0.0
        {
            return Err(CanvasError::InvalidConfig(
                "sizes must not be negative".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "max_zoom": 8.0 }"#).unwrap();
        assert_eq!(config.max_zoom, 8.0);
        assert_eq!(config.min_zoom, 0.1);
        assert_eq!(config.min_item_size, 20.0);
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let result = EditorConfig::from_json_str(r#"{ "min_zoom": 3.0, "max_zoom": 2.0 }"#);
        assert!(matches!(result, Err(CanvasError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = EditorConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(CanvasError::ConfigParse(_))));
    }
}
