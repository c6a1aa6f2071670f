//! Presentation geometry shared by the bar and the ring.
//!
//! Shapes are pure functions of a [`ProgressView`] snapshot and the bounds the
//! host gives them; they never touch animator state.

use crate::core::ProgressAnimator;
use crate::data::{Color, ResolvedAttributes, MAX_PROGRESS};

/// Axis-aligned rectangle in host units (pixels, cells, ...), y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// What a shape needs to know about an animator at redraw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressView {
    pub progress: f32,
    pub fill_color: Color,
    pub background_color: Color,
    pub corner_radius: f32,
}

impl ProgressView {
    pub fn of(animator: &ProgressAnimator) -> Self {
        let config = animator.config();
        Self {
            progress: animator.current_progress(),
            fill_color: animator.fill_color(),
            background_color: config.background_color,
            corner_radius: config.corner_radius,
        }
    }

    /// Filled share in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        (self.progress / MAX_PROGRESS).clamp(0.0, 1.0)
    }
}

/// Maps a progress snapshot to something drawable.
pub trait Shape {
    type Geometry;

    fn from_attributes(attributes: &ResolvedAttributes) -> Self;

    fn layout(&self, view: &ProgressView, bounds: Bounds) -> Self::Geometry;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_is_clamped() {
        let mut view = ProgressView {
            progress: 45.0,
            fill_color: Color::ACCENT_ORANGE,
            background_color: Color::LIGHT_GRAY,
            corner_radius: 0.0,
        };
        assert_eq!(view.fraction(), 0.45);
        view.progress = 120.0;
        assert_eq!(view.fraction(), 1.0);
    }

    #[test]
    fn test_bounds_never_negative() {
        let bounds = Bounds::new(2.0, 3.0, -4.0, 10.0);
        assert_eq!(bounds.width, 0.0);
        assert!(bounds.is_empty());
        assert_eq!(Bounds::new(0.0, 0.0, 10.0, 4.0).center(), (5.0, 2.0));
    }
}
