//! Horizontal progress bar drawn with terminal cells.
//!
//! The fill is the bar geometry's fill width rounded to whole cells, with the
//! live percentage centered on the middle row of the track.

use super::{percent_label, to_terminal_color};
use crate::widgets::{Bounds, HorizontalProgressBar};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Widget},
};

pub struct ProgressBar<'a> {
    title: &'a str,
    bar: &'a HorizontalProgressBar,
    show_border: bool,
    border_color: Color,
    text_color: Color,
}

impl<'a> ProgressBar<'a> {
    pub fn new(title: &'a str, bar: &'a HorizontalProgressBar) -> Self {
        Self {
            title,
            bar,
            show_border: true,
            border_color: Color::DarkGray,
            text_color: Color::White,
        }
    }

    pub fn show_border(mut self, show: bool) -> Self {
        self.show_border = show;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Rounded corners whenever the configured radius is non-zero.
    fn border_type(&self) -> BorderType {
        if self.bar.corner_radius() > 0.0 {
            BorderType::Rounded
        } else {
            BorderType::Plain
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if (self.show_border && (area.width < 3 || area.height < 3)) || area.is_empty() {
            return;
        }

        let inner = if self.show_border {
            let target = percent_label(self.bar.target_progress());
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(self.border_type())
                .border_style(Style::default().fg(self.border_color))
                .title(self.title)
                .title(Line::from(target).right_aligned());
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let geometry = self.bar.geometry(Bounds::new(
            inner.x as f32,
            inner.y as f32,
            inner.width as f32,
            inner.height as f32,
        ));
        let track_color = to_terminal_color(geometry.track_color);
        let fill_color = to_terminal_color(geometry.fill_color);
        let fill_end = geometry
            .fill
            .map(|fill| inner.x + (fill.bounds.width.round() as u16).min(inner.width))
            .unwrap_or(inner.x);

        let top = geometry.track.bounds.y.floor() as u16;
        let bottom = (geometry.track.bounds.y + geometry.track.bounds.height).ceil() as u16;
        let bottom = bottom.min(inner.y + inner.height).max(top + 1);

        for y in top..bottom {
            for x in inner.x..inner.x + inner.width {
                if x < buf.area().width && y < buf.area().height {
                    let cell = &mut buf[(x, y)];
                    cell.set_char(' ');
                    cell.set_bg(if x < fill_end { fill_color } else { track_color });
                }
            }
        }

        // Label centered on the middle row of the track
        let label = percent_label(self.bar.current_progress());
        let label_width = label.len() as u16;
        if label_width > inner.width {
            return;
        }
        let y = top + (bottom - top - 1) / 2;
        let start_x = inner.x + (inner.width - label_width) / 2;
        for (i, c) in label.chars().enumerate() {
            let x = start_x + i as u16;
            if x < buf.area().width && y < buf.area().height {
                let cell = &mut buf[(x, y)];
                cell.set_char(c);
                cell.set_fg(if x < fill_end { self.text_color } else { Color::Black });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PreviewScheduler;
    use crate::data::{Color as ArgbColor, ProgressConfig};
    use crate::widgets::BarShape;

    fn bar(progress: f32, corner_radius: f32) -> HorizontalProgressBar {
        let mut bar = HorizontalProgressBar::new(
            "bar",
            PreviewScheduler::new(),
            ProgressConfig::default()
                .progress_color(ArgbColor::from_rgb(0, 128, 0))
                .corner_radius(corner_radius),
            BarShape::default(),
        );
        bar.set_progress_value(progress).unwrap();
        bar
    }

    #[test]
    fn test_fill_and_centered_label() {
        let bar = bar(50.0, 360.0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 3));
        ProgressBar::new("Item", &bar).render(Rect::new(0, 0, 20, 3), &mut buf);

        let fill = Color::Rgb(0, 128, 0);
        let track = Color::Rgb(0xF3, 0xF3, 0xF3);
        assert_eq!(buf[(1, 1)].bg, fill);
        assert_eq!(buf[(9, 1)].bg, fill);
        assert_eq!(buf[(10, 1)].bg, track);
        assert_eq!(buf[(18, 1)].bg, track);

        assert_eq!(buf[(8, 1)].symbol(), "5");
        assert_eq!(buf[(9, 1)].symbol(), "0");
        assert_eq!(buf[(10, 1)].symbol(), "%");
    }

    #[test]
    fn test_border_follows_corner_radius() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 3));
        ProgressBar::new("a", &bar(10.0, 360.0)).render(Rect::new(0, 0, 12, 3), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "╭");

        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 3));
        ProgressBar::new("a", &bar(10.0, 0.0)).render(Rect::new(0, 0, 12, 3), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "┌");
    }

    #[test]
    fn test_empty_bar_shows_only_track() {
        let bar = bar(0.0, 0.0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        ProgressBar::new("a", &bar)
            .show_border(false)
            .render(Rect::new(0, 0, 10, 1), &mut buf);

        let track = Color::Rgb(0xF3, 0xF3, 0xF3);
        assert!((0..10).all(|x| buf[(x, 0)].bg == track));
        assert_eq!(buf[(4, 0)].symbol(), "0");
        assert_eq!(buf[(5, 0)].symbol(), "%");
    }

    #[test]
    fn test_too_small_area_is_skipped() {
        let bar = bar(50.0, 0.0);
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 2));
        ProgressBar::new("a", &bar).render(Rect::new(0, 0, 2, 2), &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 2, 2)));
    }
}
