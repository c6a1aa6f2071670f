//! Animation and style policy applied to one animator.

use super::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_background_color() -> Color {
    Color::LIGHT_GRAY
}

fn default_progress_color() -> Color {
    Color::ACCENT_ORANGE
}

fn default_true() -> bool {
    true
}

fn default_animation_duration_ms() -> u64 {
    1000
}

fn default_corner_radius() -> f32 {
    360.0
}

/// Immutable style/animation policy. Setters on the widgets replace the whole
/// value, so the builder methods here consume and return `Self`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_progress_color")]
    pub progress_color: Color,
    #[serde(default = "default_true")]
    pub animation_enabled: bool,
    /// Restart every animation at 0 instead of the displayed value.
    #[serde(default = "default_true")]
    pub animate_from_zero: bool,
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,
    /// Ignored by the ring, which always draws a full circle.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            progress_color: default_progress_color(),
            animation_enabled: true,
            animate_from_zero: true,
            animation_duration_ms: default_animation_duration_ms(),
            corner_radius: default_corner_radius(),
        }
    }
}

impl ProgressConfig {
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn progress_color(mut self, color: Color) -> Self {
        self.progress_color = color;
        self
    }

    pub fn animation_enabled(mut self, enabled: bool) -> Self {
        self.animation_enabled = enabled;
        self
    }

    pub fn animate_from_zero(mut self, from_zero: bool) -> Self {
        self.animate_from_zero = from_zero;
        self
    }

    pub fn animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// True when `other` differs only in colors or corner radius, i.e. a
    /// running animation does not need to be restarted to apply it.
    pub fn timing_matches(&self, other: &ProgressConfig) -> bool {
        self.animation_enabled == other.animation_enabled
            && self.animate_from_zero == other.animate_from_zero
            && self.animation_duration_ms == other.animation_duration_ms
    }
}
