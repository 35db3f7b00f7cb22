//! Configuration types for tikzlet conversion.
//!
//! This module provides configuration structures that control how diagrams
//! are placed on the canvas and how connectors are drawn. All types
//! implement [`serde::Deserialize`] for loading from external sources; every
//! field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Canvas scale and self-loop size.
//! - [`StyleConfig`] - Fallback connector command and note placement.
//!
//! # Example
//!
//! ```
//! # use tikzlet::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().scale(), 0.02);
//! assert_eq!(config.style().default_relation(), "umlassoc");
//! ```

use serde::Deserialize;

use tikzlet_core::geometry::{CoordinateTransform, DEFAULT_SCALE};

const DEFAULT_LOOP_SIZE: f32 = 1.5;
const DEFAULT_RELATION: &str = "umlassoc";
const DEFAULT_NOTE_OFFSET: f32 = 1.0;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Canvas placement settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Canvas units per editor pixel.
    #[serde(default = "default_scale")]
    scale: f32,

    /// Value of the `loop` argument of self-loop connectors.
    #[serde(default = "default_loop_size")]
    loop_size: f32,
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

fn default_loop_size() -> f32 {
    DEFAULT_LOOP_SIZE
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            loop_size: DEFAULT_LOOP_SIZE,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `scale` - Canvas units per editor pixel; must be positive.
    /// * `loop_size` - Size of self-loop connectors.
    pub fn new(scale: f32, loop_size: f32) -> Self {
        Self { scale, loop_size }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn loop_size(&self) -> f32 {
        self.loop_size
    }

    /// The editor-to-canvas transform for this scale.
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.scale)
    }
}

/// Drawing style settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Command used for connectors whose style token is unknown.
    #[serde(default = "default_relation")]
    default_relation: String,

    /// Horizontal distance of a note's pinned anchor from the note.
    #[serde(default = "default_note_offset")]
    note_offset: f32,
}

fn default_relation() -> String {
    DEFAULT_RELATION.to_string()
}

fn default_note_offset() -> f32 {
    DEFAULT_NOTE_OFFSET
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default_relation: default_relation(),
            note_offset: DEFAULT_NOTE_OFFSET,
        }
    }
}

impl StyleConfig {
    pub fn new(default_relation: impl Into<String>, note_offset: f32) -> Self {
        Self {
            default_relation: default_relation.into(),
            note_offset,
        }
    }

    /// Returns the fallback connector command, e.g. `umlassoc`.
    pub fn default_relation(&self) -> &str {
        &self.default_relation
    }

    pub fn note_offset(&self) -> f32 {
        self.note_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            scale = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().scale(), 0.05);
        assert_eq!(config.layout().loop_size(), 1.5);
        assert_eq!(config.style().default_relation(), "umlassoc");
        assert_eq!(config.style().note_offset(), 1.0);
    }

    #[test]
    fn test_full_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            scale = 0.01
            loop_size = 2.0

            [style]
            default_relation = "umldep"
            note_offset = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().loop_size(), 2.0);
        assert_eq!(config.style().default_relation(), "umldep");
        assert_eq!(config.style().note_offset(), 0.5);
        assert_eq!(config.layout().transform().scale(), 0.01);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout().scale(), AppConfig::default().layout().scale());
    }
}
