//! Circular ring: a full background circle plus an arc that starts at the top
//! and sweeps clockwise. Corner radius does not apply.

use super::shape::{Bounds, ProgressView, Shape};
use crate::data::{Color, ResolvedAttributes};

pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;
/// Top of the circle, in degrees with y pointing down.
pub const START_ANGLE: f32 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: (f32, f32),
    /// Radius of the stroke's center line.
    pub radius: f32,
    pub stroke_width: f32,
    pub track_color: Color,
    pub start_angle: f32,
    /// Degrees, clockwise. Zero while nothing is filled.
    pub sweep_angle: f32,
    pub fill_color: Color,
}

impl RingGeometry {
    /// Point on the center line at `angle` degrees (y down, clockwise).
    pub fn point_at(&self, angle: f32) -> (f32, f32) {
        let radians = angle.to_radians();
        (
            self.center.0 + self.radius * radians.cos(),
            self.center.1 + self.radius * radians.sin(),
        )
    }

    /// Where the progress arc ends.
    pub fn arc_end(&self) -> (f32, f32) {
        self.point_at(self.start_angle + self.sweep_angle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingShape {
    pub stroke_width: f32,
}

impl Default for RingShape {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl Shape for RingShape {
    type Geometry = RingGeometry;

    fn from_attributes(attributes: &ResolvedAttributes) -> Self {
        Self {
            stroke_width: attributes.progress_height.unwrap_or(DEFAULT_STROKE_WIDTH),
        }
    }

    fn layout(&self, view: &ProgressView, bounds: Bounds) -> RingGeometry {
        let size = bounds.width.min(bounds.height);
        let radius = ((size - self.stroke_width) / 2.0).max(0.0);
        let sweep_angle = if view.progress > 0.0 {
            360.0 * view.fraction()
        } else {
            0.0
        };

        RingGeometry {
            center: bounds.center(),
            radius,
            stroke_width: self.stroke_width,
            track_color: view.background_color,
            start_angle: START_ANGLE,
            sweep_angle,
            fill_color: view.fill_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn view(progress: f32) -> ProgressView {
        ProgressView {
            progress,
            fill_color: Color::ACCENT_ORANGE,
            background_color: Color::LIGHT_GRAY,
            corner_radius: 360.0,
        }
    }

    #[test]
    fn test_sweep_is_share_of_full_turn() {
        let ring = RingShape { stroke_width: 10.0 };
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(ring.layout(&view(0.0), bounds).sweep_angle, 0.0);
        assert_eq!(ring.layout(&view(25.0), bounds).sweep_angle, 90.0);
        assert_eq!(ring.layout(&view(100.0), bounds).sweep_angle, 360.0);
    }

    #[test]
    fn test_radius_fits_shorter_side() {
        let ring = RingShape { stroke_width: 10.0 };
        let geometry = ring.layout(&view(50.0), Bounds::new(0.0, 0.0, 120.0, 80.0));
        assert_eq!(geometry.radius, 35.0);
        assert_eq!(geometry.center, (60.0, 40.0));
    }

    #[test]
    fn test_arc_starts_at_top_and_runs_clockwise() {
        let ring = RingShape { stroke_width: 0.0 };
        let geometry = ring.layout(&view(25.0), Bounds::new(0.0, 0.0, 100.0, 100.0));

        let (top_x, top_y) = geometry.point_at(geometry.start_angle);
        assert_abs_diff_eq!(top_x, 50.0, epsilon = 1e-4);
        assert_abs_diff_eq!(top_y, 0.0, epsilon = 1e-4);

        // A quarter turn clockwise from the top lands on the right edge.
        let (end_x, end_y) = geometry.arc_end();
        assert_abs_diff_eq!(end_x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(end_y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_stroke_wider_than_bounds_collapses() {
        let geometry = RingShape { stroke_width: 50.0 }.layout(&view(10.0), Bounds::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(geometry.radius, 0.0);
    }
}
