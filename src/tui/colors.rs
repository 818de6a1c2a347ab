//! Palette for the card interface

use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(18, 18, 24);
pub const TEXT_PRIMARY: Color = Color::Rgb(230, 230, 235);
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 140, 155);

/// Keep affordances (progress, kept counters).
pub const ACCENT_KEEP: Color = Color::Rgb(120, 200, 120);
/// Trash affordances (trash counters, destructive confirms).
pub const ACCENT_TRASH: Color = Color::Rgb(225, 95, 95);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(110, 160, 255);
