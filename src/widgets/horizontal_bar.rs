//! Horizontal bar: a rounded track with a rounded fill growing from the left.

use super::shape::{Bounds, ProgressView, Shape};
use crate::data::{Color, ResolvedAttributes};

pub const DEFAULT_BAR_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub bounds: Bounds,
    /// Already clamped to half the shorter side.
    pub radius: f32,
}

impl RoundedRect {
    fn new(bounds: Bounds, radius: f32) -> Self {
        let max_radius = bounds.width.min(bounds.height) / 2.0;
        Self {
            bounds,
            radius: radius.clamp(0.0, max_radius.max(0.0)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub track: RoundedRect,
    pub track_color: Color,
    /// None while nothing is filled.
    pub fill: Option<RoundedRect>,
    pub fill_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarShape {
    pub height: f32,
}

impl Default for BarShape {
    fn default() -> Self {
        Self {
            height: DEFAULT_BAR_HEIGHT,
        }
    }
}

impl Shape for BarShape {
    type Geometry = BarGeometry;

    fn from_attributes(attributes: &ResolvedAttributes) -> Self {
        Self {
            height: attributes.progress_height.unwrap_or(DEFAULT_BAR_HEIGHT),
        }
    }

    fn layout(&self, view: &ProgressView, bounds: Bounds) -> BarGeometry {
        let height = self.height.min(bounds.height);
        let top = bounds.y + (bounds.height - height) / 2.0;
        let track_bounds = Bounds::new(bounds.x, top, bounds.width, height);

        let fill_width = bounds.width * view.fraction();
        let fill = (view.progress > 0.0 && fill_width > 0.0).then(|| {
            RoundedRect::new(
                Bounds::new(bounds.x, top, fill_width, height),
                view.corner_radius,
            )
        });

        BarGeometry {
            track: RoundedRect::new(track_bounds, view.corner_radius),
            track_color: view.background_color,
            fill,
            fill_color: view.fill_color,
        }
    }
}
