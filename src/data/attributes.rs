//! Construction-time widget attributes.
//!
//! Widgets are styled from a key/value table (the `attrs` table of a widget in
//! the TOML config). Every key is optional; a missing or mistyped key falls back
//! to the documented default, mirroring how a styled-attribute lookup behaves.

use super::{Color, ProgressConfig, ProgressError, ProgressValue};

pub const ATTR_BACKGROUND_COLOR: &str = "progress_background_color";
pub const ATTR_PROGRESS_COLOR: &str = "progress_color";
pub const ATTR_PROGRESS: &str = "progress";
pub const ATTR_ENABLE_ANIMATION: &str = "enable_animation";
pub const ATTR_ANIMATE_FROM_ZERO: &str = "animate_from_zero";
pub const ATTR_ANIMATION_DURATION: &str = "animation_duration";
pub const ATTR_PROGRESS_HEIGHT: &str = "progress_height";
pub const ATTR_CORNER_RADIUS: &str = "corner_radius";

/// Typed lookup over an opaque attribute store.
pub trait AttributeSource {
    fn color(&self, key: &str) -> Option<Color>;
    fn float(&self, key: &str) -> Option<f64>;
    fn integer(&self, key: &str) -> Option<i64>;
    fn boolean(&self, key: &str) -> Option<bool>;
}

impl AttributeSource for toml::Table {
    fn color(&self, key: &str) -> Option<Color> {
        let raw = self.get(key)?;
        match raw.as_str().and_then(Color::parse_hex) {
            Some(color) => Some(color),
            None => {
                tracing::warn!("Attribute '{}' is not a hex color: {}", key, raw);
                None
            }
        }
    }

    fn float(&self, key: &str) -> Option<f64> {
        let raw = self.get(key)?;
        match raw {
            toml::Value::Float(f) => Some(*f),
            toml::Value::Integer(i) => Some(*i as f64),
            other => {
                tracing::warn!("Attribute '{}' is not a number: {}", key, other);
                None
            }
        }
    }

    fn integer(&self, key: &str) -> Option<i64> {
        let raw = self.get(key)?;
        match raw.as_integer() {
            Some(i) => Some(i),
            None => {
                tracing::warn!("Attribute '{}' is not an integer: {}", key, raw);
                None
            }
        }
    }

    fn boolean(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        match raw.as_bool() {
            Some(b) => Some(b),
            None => {
                tracing::warn!("Attribute '{}' is not a boolean: {}", key, raw);
                None
            }
        }
    }
}

/// Everything a widget needs at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAttributes {
    pub config: ProgressConfig,
    /// Applied through the animator after construction when non-zero.
    pub initial_progress: Option<ProgressValue>,
    /// Bar height or ring stroke width; each shape has its own default.
    pub progress_height: Option<f32>,
}

impl ResolvedAttributes {
    pub fn resolve(source: &impl AttributeSource) -> Result<Self, ProgressError> {
        let defaults = ProgressConfig::default();

        let animation_duration_ms = match source.integer(ATTR_ANIMATION_DURATION) {
            Some(ms) if ms >= 0 => ms as u64,
            Some(ms) => {
                tracing::warn!("Negative animation_duration {} clamped to 0", ms);
                0
            }
            None => defaults.animation_duration_ms,
        };

        let config = ProgressConfig {
            background_color: source
                .color(ATTR_BACKGROUND_COLOR)
                .unwrap_or(defaults.background_color),
            progress_color: source
                .color(ATTR_PROGRESS_COLOR)
                .unwrap_or(defaults.progress_color),
            animation_enabled: source
                .boolean(ATTR_ENABLE_ANIMATION)
                .unwrap_or(defaults.animation_enabled),
            animate_from_zero: source
                .boolean(ATTR_ANIMATE_FROM_ZERO)
                .unwrap_or(defaults.animate_from_zero),
            animation_duration_ms,
            corner_radius: source
                .float(ATTR_CORNER_RADIUS)
                .map(|r| r as f32)
                .unwrap_or(defaults.corner_radius),
        };

        let progress = source.float(ATTR_PROGRESS).unwrap_or(0.0);
        // Zero means unset; anything else, NaN included, must be in range
        let initial_progress = if progress == 0.0 {
            None
        } else {
            Some(ProgressValue::try_from(progress)?)
        };

        Ok(Self {
            config,
            initial_progress,
            progress_height: source
                .float(ATTR_PROGRESS_HEIGHT)
                .map(|h| h as f32)
                .filter(|h| *h > 0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        src.parse().unwrap()
    }

    #[test]
    fn test_empty_table_uses_defaults() {
        let resolved = ResolvedAttributes::resolve(&toml::Table::new()).unwrap();
        assert_eq!(resolved.config, ProgressConfig::default());
        assert_eq!(resolved.initial_progress, None);
        assert_eq!(resolved.progress_height, None);
    }

    #[test]
    fn test_all_keys() {
        let attrs = table(
            r##"
            progress_background_color = "#E8F5E9"
            progress_color = "#4CAF50"
            progress = 72
            enable_animation = false
            animate_from_zero = false
            animation_duration = 2500
            progress_height = 3
            corner_radius = 20.0
            "##,
        );
        let resolved = ResolvedAttributes::resolve(&attrs).unwrap();
        assert_eq!(resolved.config.background_color, Color::from_rgb(0xE8, 0xF5, 0xE9));
        assert_eq!(resolved.config.progress_color, Color::from_rgb(0x4C, 0xAF, 0x50));
        assert!(!resolved.config.animation_enabled);
        assert!(!resolved.config.animate_from_zero);
        assert_eq!(resolved.config.animation_duration_ms, 2500);
        assert_eq!(resolved.config.corner_radius, 20.0);
        assert_eq!(resolved.initial_progress.map(|v| v.magnitude()), Some(72.0));
        assert_eq!(resolved.progress_height, Some(3.0));
    }

    #[test]
    fn test_mistyped_keys_fall_back() {
        let attrs = table(
            r#"
            progress_color = "orange"
            enable_animation = "yes"
            animation_duration = 1.5
            "#,
        );
        let resolved = ResolvedAttributes::resolve(&attrs).unwrap();
        assert_eq!(resolved.config, ProgressConfig::default());
    }

    #[test]
    fn test_out_of_range_progress_is_rejected() {
        assert_eq!(
            ResolvedAttributes::resolve(&table("progress = 140")),
            Err(ProgressError::InvalidProgress(140.0))
        );
        assert_eq!(
            ResolvedAttributes::resolve(&table("progress = -5")),
            Err(ProgressError::InvalidProgress(-5.0))
        );
    }

    #[test]
    fn test_nan_progress_is_rejected() {
        assert!(matches!(
            ResolvedAttributes::resolve(&table("progress = nan")),
            Err(ProgressError::InvalidProgress(v)) if v.is_nan()
        ));
    }
}
