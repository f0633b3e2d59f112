// src/config.rs

//! Configuration for the graphics context: transform stack depth, color
//! defaults and the initial surface setup.
//!
//! Every struct derives `Deserialize` with `#[serde(default)]`, so a config
//! file only needs the keys it wants to change. Colors may be written as a
//! packed number (`4278190080`), a hex string (`"#RRGGBB"` or `"#AARRGGBB"`)
//! or an HTML color keyword (`"navy"`).

use crate::color::{named, rgb, PColor};
use crate::stack::DEFAULT_STACK_CAPACITY;
use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON config file for [`CONFIG`].
pub const CONFIG_ENV_VAR: &str = "SKETCH_CORE_CONFIG";

/// Process-wide configuration, loaded on first access from the file named by
/// `SKETCH_CORE_CONFIG`, or the defaults when it is unset or unreadable.
pub static CONFIG: Lazy<Config> = Lazy::new(|| match std::env::var(CONFIG_ENV_VAR) {
    Ok(path) => Config::load_or_default(path),
    Err(_) => Config::default(),
});

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub transform: TransformConfig,
    pub color: ColorConfig,
    pub surface: SurfaceConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Like [`Config::load`], but logs the failure and returns the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{:#}; using default configuration", e);
            Self::default()
        })
    }
}

// --- Transform Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Maximum number of nested `push_matrix` calls.
    pub stack_capacity: usize,
}

impl Default for TransformConfig {
    fn default() -> Self {
        TransformConfig {
            stack_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

// --- Color Configuration ---

/// A packed color that deserializes from a number, a hex string or a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorSpec", into = "u32")]
pub struct ConfigColor(pub PColor);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Packed(u32),
    Text(String),
}

impl TryFrom<ColorSpec> for ConfigColor {
    type Error = String;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Packed(v) => Ok(ConfigColor(v)),
            ColorSpec::Text(s) => parse_color(&s)
                .map(ConfigColor)
                .ok_or_else(|| format!("unrecognized color '{}'", s)),
        }
    }
}

impl From<ConfigColor> for u32 {
    fn from(c: ConfigColor) -> u32 {
        c.0
    }
}

/// Parses `#RRGGBB` (opaque), `#AARRGGBB`, or a color keyword.
pub fn parse_color(text: &str) -> Option<PColor> {
    let text = text.trim();
    match text.strip_prefix('#') {
        Some(hex) if hex.len() == 6 => u32::from_str_radix(hex, 16).ok().map(rgb),
        Some(hex) if hex.len() == 8 => u32::from_str_radix(hex, 16).ok(),
        Some(_) => None,
        None => named::by_name(text),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// When false, `has_alpha` is never raised and colors are treated as
    /// opaque by the surface.
    pub track_alpha: bool,
    pub fill: ConfigColor,
    pub stroke: ConfigColor,
    pub background: ConfigColor,
    pub tint: ConfigColor,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            track_alpha: true,
            fill: ConfigColor(named::WHITE),
            stroke: ConfigColor(named::BLACK),
            background: ConfigColor(0xFFCC_CCCC),
            tint: ConfigColor(named::WHITE),
        }
    }
}

// --- Surface Configuration ---

/// Which matrix the graphics context keeps as its active transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Planar 3x2 transforms; 3D operations are rejected.
    #[default]
    Flat,
    /// 4x4 homogeneous transforms.
    Spatial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub stroke_weight: f32,
    pub mode: RenderMode,
    /// Segments used to approximate a full ellipse.
    pub ellipse_segments: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 100,
            height: 100,
            stroke_weight: 1.0,
            mode: RenderMode::Flat,
            ellipse_segments: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_json_yields_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.transform.stack_capacity, 32);
        assert!(config.color.track_alpha);
        assert_eq!(config.surface.mode, RenderMode::Flat);
    }

    #[test]
    fn partial_json_overrides_only_named_keys() {
        let config = Config::from_json_str(
            r##"{
                "transform": { "stack_capacity": 4 },
                "color": { "fill": "#FF0000", "stroke": "navy", "tint": 2147483648 },
                "surface": { "mode": "spatial", "width": 640 }
            }"##,
        )
        .unwrap();
        assert_eq!(config.transform.stack_capacity, 4);
        assert_eq!(config.color.fill, ConfigColor(0xFFFF0000));
        assert_eq!(config.color.stroke, ConfigColor(named::NAVY));
        assert_eq!(config.color.tint, ConfigColor(0x80000000));
        assert_eq!(config.color.background, ColorConfig::default().background);
        assert_eq!(config.surface.mode, RenderMode::Spatial);
        assert_eq!(config.surface.width, 640);
        assert_eq!(config.surface.height, 100);
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = Config::from_json_str(r#"{ "color": { "fill": "not-a-color" } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn parse_color_forms() {
        assert_eq!(parse_color("#00ff00"), Some(0xFF00FF00));
        assert_eq!(parse_color("#8000ff00"), Some(0x8000FF00));
        assert_eq!(parse_color(" teal "), Some(named::TEAL));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn serializes_colors_as_numbers() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["color"]["fill"], serde_json::json!(0xFFFFFFFFu32));
        let back: Config = serde_json::from_value(json).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/nonexistent/sketch-core.json");
        assert_eq!(config, Config::default());
    }
}
