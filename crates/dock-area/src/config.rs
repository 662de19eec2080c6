//! Layout constants, palette, and thresholds for a dock area.
//!
//! A [`DockConfig`] can be built in code or loaded from TOML or JSON (with the
//! `config-files` feature, on by default):
//!
//! ```toml
//! gizmo_size = 60
//! content_scale = 2.0
//! undock_threshold = 24
//!
//! [colors.docking_highlight]
//! r = 0.0
//! g = 0.5
//! b = 1.0
//! a = 0.4
//! ```
//!
//! Pixel values are logical; the `*_px` accessors multiply by
//! `content_scale` and round.

#[cfg(feature = "config-files")]
use std::path::Path;

use dock_core::geometry::{Extent, Position};
use dock_render::color::Rgba;
use dock_render::text::FontSize;
use serde::{Deserialize, Serialize};

#[cfg(feature = "config-files")]
use crate::error::DockConfigError;

/// Colors used for the dock area's own chrome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockColors {
    pub resize_handle: Rgba,
    /// Preview of the area a dock would fill.
    pub docking_highlight: Rgba,
    pub delete_layer_gizmo: Rgba,
    /// Inner and outer docking gizmos.
    pub gizmo: Rgba,
}

impl Default for DockColors {
    fn default() -> Self {
        let resize_handle = Rgba::new(1.0, 1.0, 1.0, 0.5);
        Self {
            resize_handle,
            docking_highlight: Rgba::new(0.0, 0.5, 1.0, 0.5),
            delete_layer_gizmo: Rgba::new(1.0, 0.0, 0.0, 0.75),
            gizmo: resize_handle,
        }
    }
}

/// Immutable configuration of a dock area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Side of every docking gizmo square.
    pub gizmo_size: u32,
    /// Distance of the directional inner gizmos from the center gizmo, in
    /// gizmo sizes.
    pub gizmo_offset_factor: f32,
    /// Horizontal padding on both sides of a tab title.
    pub tab_text_margin: u32,
    pub tab_font: FontSize,
    /// Size of a split's grab bar across the split line.
    pub resize_handle_thickness: u32,
    /// Size of a split's grab bar along the split line.
    pub resize_handle_length: u32,
    /// Extent of a freshly created floating layer.
    pub default_layer_extent: Extent,
    /// Offset applied to a new layer whose spawn point is already taken.
    pub spawn_offset: Position,
    /// How far past the titlebar band a held tab must be dragged before it
    /// tears off. `None` uses one titlebar height.
    pub undock_threshold: Option<u32>,
    /// Logical-to-physical pixel factor.
    pub content_scale: f32,
    /// Minimum extent reported by the dock area's size hint.
    pub min_size: Extent,
    pub colors: DockColors,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            gizmo_size: 75,
            gizmo_offset_factor: 1.0,
            tab_text_margin: 10,
            tab_font: FontSize(16),
            resize_handle_thickness: 50,
            resize_handle_length: 75,
            default_layer_extent: Extent::new(400, 400),
            spawn_offset: Position::new(150, 150),
            undock_threshold: None,
            content_scale: 1.0,
            min_size: Extent::new(400, 400),
            colors: DockColors::default(),
        }
    }
}

impl DockConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, DockConfigError> {
        toml::from_str(s).map_err(DockConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DockConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DockConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, DockConfigError> {
        serde_json::from_str(s).map_err(DockConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DockConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DockConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config-files")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.gizmo_size == 0 {
            errors.push("gizmo_size must be > 0".into());
        }
        if !self.gizmo_offset_factor.is_finite() || self.gizmo_offset_factor <= 0.0 {
            errors.push(format!(
                "gizmo_offset_factor must be finite and > 0, got {}",
                self.gizmo_offset_factor
            ));
        }
        if self.tab_font.0 == 0 {
            errors.push("tab_font must be > 0".into());
        }
        if self.resize_handle_thickness == 0 || self.resize_handle_length == 0 {
            errors.push(format!(
                "resize handle must be non-empty, got {}x{}",
                self.resize_handle_thickness, self.resize_handle_length
            ));
        }
        if self.default_layer_extent.is_empty() {
            errors.push(format!(
                "default_layer_extent must be non-empty, got {}x{}",
                self.default_layer_extent.width, self.default_layer_extent.height
            ));
        }
        if !self.content_scale.is_finite() || self.content_scale <= 0.0 {
            errors.push(format!(
                "content_scale must be finite and > 0, got {}",
                self.content_scale
            ));
        }

        let colors = [
            ("resize_handle", self.colors.resize_handle),
            ("docking_highlight", self.colors.docking_highlight),
            ("delete_layer_gizmo", self.colors.delete_layer_gizmo),
            ("gizmo", self.colors.gizmo),
        ];
        for (name, color) in colors {
            if !color.is_normalized() {
                errors.push(format!("colors.{name} channels must lie in [0, 1]"));
            }
        }

        errors
    }

    /// Scale a logical length to physical pixels.
    #[must_use]
    pub fn scale(&self, logical: u32) -> u32 {
        (logical as f32 * self.content_scale).round() as u32
    }

    #[must_use]
    pub fn gizmo_px(&self) -> u32 {
        self.scale(self.gizmo_size)
    }

    #[must_use]
    pub fn tab_text_margin_px(&self) -> u32 {
        self.scale(self.tab_text_margin)
    }

    #[must_use]
    pub fn tab_font_px(&self) -> FontSize {
        self.tab_font.scaled(self.content_scale)
    }

    #[must_use]
    pub fn resize_handle_thickness_px(&self) -> u32 {
        self.scale(self.resize_handle_thickness)
    }

    #[must_use]
    pub fn resize_handle_length_px(&self) -> u32 {
        self.scale(self.resize_handle_length)
    }

    #[must_use]
    pub fn default_layer_extent_px(&self) -> Extent {
        Extent::new(
            self.scale(self.default_layer_extent.width),
            self.scale(self.default_layer_extent.height),
        )
    }

    #[must_use]
    pub fn spawn_offset_px(&self) -> Position {
        let scale = |v: i32| (v as f32 * self.content_scale).round() as i32;
        Position::new(scale(self.spawn_offset.x), scale(self.spawn_offset.y))
    }

    #[must_use]
    pub fn undock_threshold_px(&self) -> Option<u32> {
        self.undock_threshold.map(|t| self.scale(t))
    }

    #[must_use]
    pub fn min_size_px(&self) -> Extent {
        Extent::new(self.scale(self.min_size.width), self.scale(self.min_size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(DockConfig::default().validate().is_empty());
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = DockConfig {
            gizmo_size: 0,
            content_scale: f32::NAN,
            colors: DockColors {
                gizmo: Rgba::new(2.0, 0.0, 0.0, 1.0),
                ..DockColors::default()
            },
            ..DockConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("gizmo_size")));
        assert!(errors.iter().any(|e| e.contains("content_scale")));
        assert!(errors.iter().any(|e| e.contains("colors.gizmo")));
    }

    #[test]
    fn pixel_accessors_apply_content_scale() {
        let config = DockConfig {
            content_scale: 1.5,
            undock_threshold: Some(20),
            ..DockConfig::default()
        };
        assert_eq!(config.gizmo_px(), 113);
        assert_eq!(config.tab_text_margin_px(), 15);
        assert_eq!(config.tab_font_px(), FontSize(24));
        assert_eq!(config.default_layer_extent_px(), Extent::new(600, 600));
        assert_eq!(config.spawn_offset_px(), Position::new(225, 225));
        assert_eq!(config.undock_threshold_px(), Some(30));
        assert_eq!(DockConfig::default().undock_threshold_px(), None);
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DockConfig::from_toml_str(
            r#"
            gizmo_size = 60
            undock_threshold = 24

            [colors.docking_highlight]
            r = 0.0
            g = 0.5
            b = 1.0
            a = 0.4
            "#,
        )
        .expect("parse");
        assert_eq!(config.gizmo_size, 60);
        assert_eq!(config.undock_threshold, Some(24));
        assert_eq!(config.colors.docking_highlight.a, 0.4);
        assert_eq!(config.colors.resize_handle, DockColors::default().resize_handle);
        assert_eq!(config.tab_font, FontSize(16));
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn toml_round_trip_preserves_config() {
        let config = DockConfig {
            spawn_offset: Position::new(-20, 40),
            undock_threshold: Some(8),
            ..DockConfig::default()
        };
        let text = config.to_toml_string().expect("serialize");
        assert_eq!(DockConfig::from_toml_str(&text).expect("parse"), config);
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn json_loader_reports_parse_errors() {
        let err = DockConfig::from_json_str("{ gizmo_size: }").unwrap_err();
        assert!(matches!(err, DockConfigError::Json(_)));

        let config = DockConfig::from_json_str(r#"{"tab_text_margin": 4}"#).expect("parse");
        assert_eq!(config.tab_text_margin, 4);
    }

    #[cfg(feature = "config-files")]
    #[test]
    fn missing_file_is_io_error() {
        let err = DockConfig::from_toml_file("/nonexistent/dock.toml").unwrap_err();
        assert!(matches!(err, DockConfigError::Io(_)));
    }
}
