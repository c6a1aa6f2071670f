//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod dashboard;
pub mod progress_bar;
pub mod progress_ring;

pub use app::TuiFrontend;

use crate::data::Color as ArgbColor;
use ratatui::style::Color;

/// Map an ARGB color onto the terminal palette. Terminals have no alpha, so a
/// fully transparent color falls back to the terminal default.
pub fn to_terminal_color(color: ArgbColor) -> Color {
    if color.alpha() == 0 {
        Color::Reset
    } else {
        Color::Rgb(color.red(), color.green(), color.blue())
    }
}

/// "72%" style label, rounded to whole percent
pub fn percent_label(progress: f32) -> String {
    format!("{:.0}%", progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_terminal_color() {
        assert_eq!(to_terminal_color(ArgbColor::from_rgb(0x4C, 0xAF, 0x50)), Color::Rgb(0x4C, 0xAF, 0x50));
        assert_eq!(to_terminal_color(ArgbColor::from_argb(0x00FF_FFFF)), Color::Reset);
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(72.0), "72%");
        assert_eq!(percent_label(49.6), "50%");
        assert_eq!(percent_label(0.0), "0%");
    }
}
