//! Centralized Pokédex red & yellow color theme.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Pokédex red: primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0xEF, 0x53, 0x50);
/// Light red: highlights, hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xFF, 0x8A, 0x80);
/// Dark red: pressed states, header background.
pub const PRIMARY_DARK: Color = Color::Rgb(0xB7, 0x1C, 0x1C);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Yellow: score, titles, calls to action.
pub const ACCENT: Color = Color::Rgb(0xFA, 0xCC, 0x15);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x11, 0x18, 0x27);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE5, 0xE7, 0xEB);
pub const TEXT_MUTED: Color = Color::Rgb(0x9C, 0xA3, 0xAF);
pub const TEXT_DIM: Color = Color::Rgb(0x4B, 0x55, 0x63);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x10, 0xB9, 0x81);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x3B, 0x82, 0xF6);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Badge color for types missing from the table.
pub const TYPE_FALLBACK: Color = Color::Rgb(0x6B, 0x72, 0x80);

/// Badge color per elemental type.
pub const TYPE_COLORS: [(&str, Color); 17] = [
    ("normal", Color::Rgb(0x9C, 0xA3, 0xAF)),
    ("fire", Color::Rgb(0xEF, 0x44, 0x44)),
    ("water", Color::Rgb(0x3B, 0x82, 0xF6)),
    ("electric", Color::Rgb(0xFA, 0xCC, 0x15)),
    ("grass", Color::Rgb(0x22, 0xC5, 0x5E)),
    ("ice", Color::Rgb(0x67, 0xE8, 0xF9)),
    ("fighting", Color::Rgb(0xB9, 0x1C, 0x1C)),
    ("poison", Color::Rgb(0xA8, 0x55, 0xF7)),
    ("ground", Color::Rgb(0xCA, 0x8A, 0x04)),
    ("flying", Color::Rgb(0x81, 0x8C, 0xF8)),
    ("psychic", Color::Rgb(0xEC, 0x48, 0x99)),
    ("bug", Color::Rgb(0x84, 0xCC, 0x16)),
    ("rock", Color::Rgb(0x85, 0x4D, 0x0E)),
    ("ghost", Color::Rgb(0x6B, 0x21, 0xA8)),
    ("dragon", Color::Rgb(0x43, 0x38, 0xCA)),
    ("steel", Color::Rgb(0x6B, 0x72, 0x80)),
    ("fairy", Color::Rgb(0xF9, 0xA8, 0xD4)),
];

pub fn type_color(type_name: &str) -> Color {
    TYPE_COLORS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, color)| *color)
        .unwrap_or(TYPE_FALLBACK)
}

/// Bar color for a base statistic value.
pub fn stat_color(value: u32) -> Color {
    if value > 90 {
        SUCCESS
    } else if value > 60 {
        INFO
    } else {
        ERROR
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Type badge: dark text on the type's color.
pub fn type_badge(type_name: &str) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(type_color(type_name))
        .add_modifier(Modifier::BOLD)
}
