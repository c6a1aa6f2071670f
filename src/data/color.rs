//! ARGB color value shared by configs, progress values and renderers.
//!
//! Colors travel through config files as `#RRGGBB` or `#AARRGGBB` hex strings
//! and are stored as a packed `0xAARRGGBB` word.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packed `0xAARRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Light neutral gray used for the unfilled track.
    pub const LIGHT_GRAY: Color = Color(0xFFF3F3F3);
    /// Accent orange used for the fill.
    pub const ACCENT_ORANGE: Color = Color(0xFFFF5722);

    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`. The leading `#` is optional.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(|rgb| Self(0xFF00_0000 | rgb)),
            8 => u32::from_str_radix(hex, 16).ok().map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_is_opaque() {
        let color = Color::parse_hex("#4CAF50").unwrap();
        assert_eq!(color.argb(), 0xFF4CAF50);
        assert_eq!(color.alpha(), 0xFF);
        assert_eq!((color.red(), color.green(), color.blue()), (0x4C, 0xAF, 0x50));
    }

    #[test]
    fn test_parse_argb_keeps_alpha() {
        let color: Color = "80E8F5E9".parse().unwrap();
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.to_string(), "#80E8F5E9");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Color::parse_hex("#12345").is_none());
        assert!(Color::parse_hex("#GG0000").is_none());
        assert!(Color::parse_hex("+12345").is_none());
        assert!("orange".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_opaque_drops_alpha() {
        assert_eq!(Color::ACCENT_ORANGE.to_string(), "#FF5722");
        assert_eq!(Color::from_rgb(0xF3, 0xF3, 0xF3), Color::LIGHT_GRAY);
    }
}
