//! Container configuration with defaults and YAML loading.
//!
//! ```yaml
//! bg_color: "#ffffff"
//! horizontal_interval: 8
//! tag_mode: control
//! random_color: true
//! tag:
//!   text_color: "#666666"
//!   text_size: 14
//! ```

use crate::tag::{TagMode, TagShape, TagStyle};
use serde::{Deserialize, Serialize};
use taglayout_core::Color;
use taglayout_layout::FlowSpacing;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A dimension that must be non-negative is negative
    #[error("invalid value for '{field}': {value} (must be >= 0)")]
    Negative {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f32,
    },
    /// Fit mode with zero tags per line
    #[error("fit_count must be at least 1")]
    InvalidFitCount,
}

/// Colors are written as `#rrggbb` / `#rrggbbaa` strings.
mod hex_color {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use taglayout_core::Color;

    pub(super) fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        if (color.a - 1.0).abs() < f32::EPSILON {
            serializer.serialize_str(&color.to_hex())
        } else {
            serializer.serialize_str(&color.to_hex_with_alpha())
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Defaults applied to every tag the container creates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDefaults {
    /// Tag fill color
    #[serde(with = "hex_color")]
    pub bg_color: Color,
    /// Tag outline color
    #[serde(with = "hex_color")]
    pub border_color: Color,
    /// Tag label color
    #[serde(with = "hex_color")]
    pub text_color: Color,
    /// Tag outline width
    pub border_width: f32,
    /// Tag label font size
    pub text_size: f32,
    /// Tag corner radius
    pub radius: f32,
    /// Tag horizontal padding
    pub horizontal_padding: f32,
    /// Tag vertical padding
    pub vertical_padding: f32,
}

impl Default for TagDefaults {
    fn default() -> Self {
        let style = TagStyle::default();
        Self {
            bg_color: style.bg_color,
            border_color: style.border_color,
            text_color: style.text_color,
            border_width: style.border_width,
            text_size: style.text_size,
            radius: style.radius,
            horizontal_padding: style.horizontal_padding,
            vertical_padding: style.vertical_padding,
        }
    }
}

/// Container configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagLayoutConfig {
    /// Container fill color
    #[serde(with = "hex_color")]
    pub bg_color: Color,
    /// Container outline color
    #[serde(with = "hex_color")]
    pub border_color: Color,
    /// Container outline width
    pub border_width: f32,
    /// Container corner radius
    pub radius: f32,
    /// Gap between tags on a line, also the left/right padding
    pub horizontal_interval: f32,
    /// Gap between lines, also the top/bottom padding
    pub vertical_interval: f32,
    /// Tags per line in fit mode
    pub fit_count: Option<usize>,
    /// Shape of newly created tags
    pub tag_shape: TagShape,
    /// Normal, or control with a trailing action tag
    pub tag_mode: TagMode,
    /// Color new tags from the color provider
    pub random_color: bool,
    /// Invert tag colors while pressed
    pub press_feedback: bool,
    /// Gap between a tag icon and its label
    pub icon_padding: f32,
    /// Label of the control tag
    pub control_text: String,
    /// Per-tag defaults
    pub tag: TagDefaults,
}

impl Default for TagLayoutConfig {
    fn default() -> Self {
        Self {
            bg_color: Color::WHITE,
            border_color: Color::WHITE,
            border_width: 0.5,
            radius: 5.0,
            horizontal_interval: 5.0,
            vertical_interval: 5.0,
            fit_count: None,
            tag_shape: TagShape::RoundRect,
            tag_mode: TagMode::Normal,
            random_color: false,
            press_feedback: false,
            icon_padding: 3.0,
            control_text: "Change".to_string(),
            tag: TagDefaults::default(),
        }
    }
}

impl TagLayoutConfig {
    /// Parse and validate a YAML document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that dimensions are non-negative and fit mode is usable.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [
            ("border_width", self.border_width),
            ("radius", self.radius),
            ("horizontal_interval", self.horizontal_interval),
            ("vertical_interval", self.vertical_interval),
            ("icon_padding", self.icon_padding),
            ("tag.border_width", self.tag.border_width),
            ("tag.text_size", self.tag.text_size),
            ("tag.radius", self.tag.radius),
            ("tag.horizontal_padding", self.tag.horizontal_padding),
            ("tag.vertical_padding", self.tag.vertical_padding),
        ];
        for (field, value) in dims {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.fit_count == Some(0) {
            return Err(ConfigError::InvalidFitCount);
        }
        Ok(())
    }

    /// Flow spacing derived from the intervals.
    #[must_use]
    pub const fn spacing(&self) -> FlowSpacing {
        FlowSpacing::from_intervals(self.horizontal_interval, self.vertical_interval)
    }

    /// Style for a newly created tag.
    #[must_use]
    pub const fn tag_style(&self) -> TagStyle {
        TagStyle {
            bg_color: self.tag.bg_color,
            border_color: self.tag.border_color,
            text_color: self.tag.text_color,
            border_width: self.tag.border_width,
            text_size: self.tag.text_size,
            radius: self.tag.radius,
            horizontal_padding: self.tag.horizontal_padding,
            vertical_padding: self.tag.vertical_padding,
            icon_padding: self.icon_padding,
        }
    }

    /// Tag width in fit mode for the given container width, if fit mode is on.
    ///
    /// `fit_count` tags and `fit_count - 1` gaps fill the available width.
    #[must_use]
    pub fn fit_width(&self, container_width: f32) -> Option<f32> {
        let count = self.fit_count.filter(|&n| n > 0)?;
        if !container_width.is_finite() {
            return None;
        }
        let available = self.spacing().available_width(container_width);
        let gaps = (count - 1) as f32 * self.horizontal_interval;
        Some(((available - gaps) / count as f32).max(0.0))
    }
}
