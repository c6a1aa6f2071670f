//! Circular progress ring drawn on a braille canvas.
//!
//! Ring geometry is laid out in a fixed square of canvas units; the canvas maps
//! that square onto the cell area, so callers should hand it an area about
//! twice as wide as it is tall to keep the ring round.

use super::{percent_label, to_terminal_color};
use crate::widgets::{Bounds, CircularProgressBar, RingGeometry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, BorderType, Borders, Widget,
    },
};

/// Side of the square the ring geometry is laid out in.
const CANVAS_SIZE: f32 = 100.0;

/// One colored stretch of the ring's stroke.
struct Stroke<'a> {
    geometry: &'a RingGeometry,
    start_angle: f32,
    sweep_angle: f32,
    color: Color,
}

impl Shape for Stroke<'_> {
    fn draw(&self, painter: &mut Painter) {
        let g = self.geometry;
        let half = (g.stroke_width / 2.0).max(0.5);
        let inner = (g.radius - half).max(0.0);
        let outer = g.radius + half;
        // Half-degree steps are dense enough for braille resolution
        let steps = (self.sweep_angle.abs() * 2.0).ceil().max(1.0) as usize;

        let mut radius = inner;
        while radius <= outer {
            for i in 0..=steps {
                let angle =
                    (self.start_angle + self.sweep_angle * i as f32 / steps as f32).to_radians();
                let x = g.center.0 + radius * angle.cos();
                let y = g.center.1 + radius * angle.sin();
                // Geometry has y pointing down, the canvas has it pointing up
                if let Some((px, py)) = painter.get_point(x as f64, (CANVAS_SIZE - y) as f64) {
                    painter.paint(px, py, self.color);
                }
            }
            radius += 1.0;
        }
    }
}

pub struct ProgressRing<'a> {
    title: &'a str,
    ring: &'a CircularProgressBar,
    border_color: Color,
}

impl<'a> ProgressRing<'a> {
    pub fn new(title: &'a str, ring: &'a CircularProgressBar) -> Self {
        Self {
            title,
            ring,
            border_color: Color::DarkGray,
        }
    }

    pub fn geometry(&self) -> RingGeometry {
        self.ring
            .geometry(Bounds::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border_color))
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        let canvas_area = square_cells(inner);
        if canvas_area.is_empty() {
            return;
        }

        let geometry = self.geometry();
        let track = Stroke {
            geometry: &geometry,
            start_angle: 0.0,
            sweep_angle: 360.0,
            color: to_terminal_color(geometry.track_color),
        };
        let arc = Stroke {
            geometry: &geometry,
            start_angle: geometry.start_angle,
            sweep_angle: geometry.sweep_angle,
            color: to_terminal_color(geometry.fill_color),
        };
        let has_arc = geometry.sweep_angle > 0.0;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, CANVAS_SIZE as f64])
            .y_bounds([0.0, CANVAS_SIZE as f64])
            .paint(|ctx| {
                ctx.draw(&track);
                if has_arc {
                    ctx.layer();
                    ctx.draw(&arc);
                }
            })
            .render(canvas_area, buf);

        let label = percent_label(self.ring.current_progress());
        let label_width = label.len() as u16;
        if label_width <= canvas_area.width {
            let x = canvas_area.x + (canvas_area.width - label_width) / 2;
            let y = canvas_area.y + canvas_area.height / 2;
            buf.set_string(x, y, &label, Style::default().fg(Color::White));
        }
    }
}

/// Largest centered area of `2h x h` cells that fits, which is square on a
/// terminal with 2:1 cells.
fn square_cells(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PreviewScheduler;
    use crate::data::{Color as ArgbColor, ProgressConfig};
    use crate::widgets::RingShape;

    const FILL: Color = Color::Rgb(0xFF, 0x57, 0x22);

    fn ring(progress: f32) -> CircularProgressBar {
        let mut ring = CircularProgressBar::new(
            "ring",
            PreviewScheduler::new(),
            ProgressConfig::default().background_color(ArgbColor::from_rgb(0x30, 0x30, 0x30)),
            RingShape::default(),
        );
        ring.set_progress_value(progress).unwrap();
        ring
    }

    fn cells_with_fg(buf: &Buffer, area: Rect, color: Color) -> Vec<(u16, u16)> {
        let mut found = Vec::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if buf[(x, y)].fg == color && buf[(x, y)].symbol() != " " {
                    found.push((x, y));
                }
            }
        }
        found
    }

    #[test]
    fn test_square_cells() {
        assert_eq!(square_cells(Rect::new(0, 0, 40, 10)), Rect::new(10, 0, 20, 10));
        assert_eq!(square_cells(Rect::new(2, 2, 10, 20)), Rect::new(2, 9, 10, 5));
    }

    #[test]
    fn test_quarter_arc_stays_in_top_right() {
        let ring = ring(25.0);
        let area = Rect::new(0, 0, 22, 12);
        let mut buf = Buffer::empty(area);
        ProgressRing::new("KPI", &ring).render(area, &mut buf);

        // Canvas is the 20x10 square inside the border
        let filled = cells_with_fg(&buf, area, FILL);
        assert!(!filled.is_empty());
        assert!(filled.iter().all(|(x, y)| *x >= 9 && *y <= 7), "{:?}", filled);

        let track = cells_with_fg(&buf, area, Color::Rgb(0x30, 0x30, 0x30));
        assert!(track.iter().any(|(x, _)| *x < 6));
    }

    #[test]
    fn test_empty_ring_has_no_arc() {
        let ring = ring(0.0);
        let area = Rect::new(0, 0, 22, 12);
        let mut buf = Buffer::empty(area);
        ProgressRing::new("KPI", &ring).render(area, &mut buf);
        assert!(cells_with_fg(&buf, area, FILL).is_empty());
    }

    #[test]
    fn test_label_is_centered() {
        let ring = ring(72.0);
        let area = Rect::new(0, 0, 22, 12);
        let mut buf = Buffer::empty(area);
        ProgressRing::new("KPI", &ring).render(area, &mut buf);

        // Canvas area is (1, 1, 20, 10): label row 6, starting at column 9
        assert_eq!(buf[(9, 6)].symbol(), "7");
        assert_eq!(buf[(10, 6)].symbol(), "2");
        assert_eq!(buf[(11, 6)].symbol(), "%");
    }

    #[test]
    fn test_geometry_uses_canvas_square() {
        let ring = ring(50.0);
        let geometry = ProgressRing::new("KPI", &ring).geometry();
        assert_eq!(geometry.center, (50.0, 50.0));
        assert_eq!(geometry.radius, 44.0);
        assert_eq!(geometry.sweep_angle, 180.0);
    }
}
