//! Full-screen demo dashboard: a row of KPI rings, the item bars, the
//! showcase bar with its percent counter, and a key help footer.

use super::progress_bar::ProgressBar;
use super::progress_ring::ProgressRing;
use crate::core::{AppCore, Clock};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const RING_ROWS: u16 = 12;
const BAR_ROWS: u16 = 3;

/// Rects for every dashboard section, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub rings: Vec<Rect>,
    pub bars: Vec<Rect>,
    pub footer: Rect,
}

impl DashboardLayout {
    /// Sections that don't fit are given empty rects and skipped when drawn.
    pub fn calculate(area: Rect, ring_count: usize, bar_count: usize) -> Self {
        let header = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let footer_y = area.y + area.height.saturating_sub(1);
        let footer = Rect::new(area.x, footer_y, area.width, area.height.saturating_sub(1).min(1));
        let mut y = header.y + header.height;

        let ring_height = RING_ROWS.min(footer_y.saturating_sub(y));
        let mut rings = Vec::with_capacity(ring_count);
        if ring_count > 0 {
            let width = area.width / ring_count as u16;
            for i in 0..ring_count as u16 {
                rings.push(Rect::new(area.x + i * width, y, width, ring_height));
            }
            y += ring_height;
        }

        let mut bars = Vec::with_capacity(bar_count);
        for _ in 0..bar_count {
            let height = BAR_ROWS.min(footer_y.saturating_sub(y));
            bars.push(Rect::new(area.x, y, area.width, height));
            y += height;
        }

        Self {
            header,
            rings,
            bars,
            footer,
        }
    }
}

pub fn render_dashboard<C: Clock + 'static>(core: &AppCore<C>, area: Rect, buf: &mut Buffer) {
    let layout = DashboardLayout::calculate(area, core.rings.len(), core.bars.len());

    let header = Line::from(vec![
        Span::styled("progress-gauge", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  completed animations: {}", core.completed_animations())),
    ]);
    Paragraph::new(header).render(layout.header, buf);

    for (gauge, rect) in core.rings.iter().zip(&layout.rings) {
        ProgressRing::new(&gauge.title, &gauge.widget).render(*rect, buf);
    }

    for (idx, (gauge, rect)) in core.bars.iter().zip(&layout.bars).enumerate() {
        if Some(idx) == core.showcase {
            let title = match core.showcase_percent() {
                Some(percent) => format!("{} {}%", gauge.title, percent),
                None => gauge.title.clone(),
            };
            ProgressBar::new(&title, &gauge.widget)
                .border_color(Color::Cyan)
                .render(*rect, buf);
        } else {
            ProgressBar::new(&gauge.title, &gauge.widget).render(*rect, buf);
        }
    }

    let kb = &core.config.keybinds;
    let help = format!(
        "[{}] randomize  [{}] showcase  [{}] pause  [{}] resume  [{}] reset  [{}] quit",
        kb.randomize.join("/"),
        kb.showcase.join("/"),
        kb.pause.join("/"),
        kb.resume.join("/"),
        kb.reset.join("/"),
        kb.quit.join("/"),
    );
    Paragraph::new(Line::from(help))
        .style(Style::default().fg(Color::DarkGray))
        .render(layout.footer, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::demo_actions::DemoAction;
    use crate::core::ManualClock;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area().width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = DashboardLayout::calculate(Rect::new(0, 0, 90, 40), 3, 5);
        assert_eq!(layout.header, Rect::new(0, 0, 90, 1));
        assert_eq!(layout.rings[0], Rect::new(0, 1, 30, 12));
        assert_eq!(layout.rings[2], Rect::new(60, 1, 30, 12));
        assert_eq!(layout.bars[0], Rect::new(0, 13, 90, 3));
        assert_eq!(layout.bars[4], Rect::new(0, 25, 90, 3));
        assert_eq!(layout.footer, Rect::new(0, 39, 90, 1));
    }

    #[test]
    fn test_layout_runs_out_of_rows() {
        let layout = DashboardLayout::calculate(Rect::new(0, 0, 60, 20), 3, 5);
        assert_eq!(layout.rings[0].height, 12);
        assert_eq!(layout.bars[1].height, 3);
        assert_eq!(layout.bars[2].height, 0);
        assert_eq!(layout.footer, Rect::new(0, 19, 60, 1));
    }

    #[test]
    fn test_render_dashboard() {
        let mut core =
            AppCore::with_clock(Config::embedded().unwrap(), ManualClock::new(), 3).unwrap();
        core.apply(DemoAction::Showcase);

        let area = Rect::new(0, 0, 90, 40);
        let mut buf = Buffer::empty(area);
        render_dashboard(&core, area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("progress-gauge  completed animations: 0"));
        assert!(row_text(&buf, 39).starts_with("[r] randomize  [t] showcase"));
        assert!(row_text(&buf, 1).contains("Completion"));
        // Showcase bar is the fifth bar; its title carries the counter
        assert!(row_text(&buf, 25).contains("Loading 0%"));
    }
}
