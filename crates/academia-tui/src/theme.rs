//! Colour palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ─────────────────────────────────────────────────────────

pub const INK: Color = Color::Rgb(24, 26, 38); // #181a26
pub const PANEL: Color = Color::Rgb(36, 39, 56); // #242738
pub const SLATE: Color = Color::Rgb(104, 116, 156); // #68749c
pub const PAPER: Color = Color::Rgb(200, 204, 218); // #c8ccda
pub const TEAL: Color = Color::Rgb(94, 234, 212); // #5eead4
pub const VIOLET: Color = Color::Rgb(167, 139, 250); // #a78bfa
pub const AMBER: Color = Color::Rgb(251, 191, 36); // #fbbf24
pub const GREEN: Color = Color::Rgb(74, 222, 128); // #4ade80
pub const RED: Color = Color::Rgb(248, 113, 113); // #f87171

// ── Semantic styles ─────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(VIOLET)
}

pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

pub fn text() -> Style {
    Style::default().fg(PAPER)
}

/// Placeholder and other de-emphasised text.
pub fn muted() -> Style {
    Style::default().fg(SLATE)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Highlighted row in tables and option lists.
pub fn row_highlight() -> Style {
    Style::default()
        .fg(VIOLET)
        .bg(PANEL)
        .add_modifier(Modifier::BOLD)
}

/// Course codes in tables.
pub fn code() -> Style {
    Style::default().fg(TEAL)
}

pub fn faculty() -> Style {
    Style::default().fg(AMBER)
}

pub fn checkmark() -> Style {
    Style::default().fg(GREEN).add_modifier(Modifier::BOLD)
}

pub fn badge() -> Style {
    Style::default().fg(INK).bg(TEAL)
}

pub fn badge_focused() -> Style {
    Style::default()
        .fg(INK)
        .bg(AMBER)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default().fg(VIOLET).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(PAPER)
}

pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn overlay_bg() -> Style {
    Style::default().bg(INK)
}
