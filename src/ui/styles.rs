//! Style definitions for the UI components.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use super::modal::ButtonStyle;

const ACCENT: Color = Color::Rgb(0xfd, 0x64, 0x71);
const ACCENT_CONTRAST: Color = Color::Black;
const SECONDARY_BACKGROUND: Color = Color::Rgb(0x24, 0x24, 0x24);
const PRIMARY_BACKGROUND: Color = Color::Rgb(0x19, 0x19, 0x19);
const ERROR: Color = Color::Rgb(0xed, 0x42, 0x45);

const AVATAR_PALETTE: [Color; 6] = [
    Color::Rgb(0x58, 0x65, 0xf2),
    Color::Rgb(0x3b, 0xa5, 0x5c),
    Color::Rgb(0xfa, 0xa6, 0x1a),
    Color::Rgb(0xeb, 0x45, 0x9e),
    Color::Rgb(0x74, 0x7f, 0x8d),
    Color::Rgb(0x1a, 0xbc, 0x9c),
];

// =============================================================================
// Panels
// =============================================================================

pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn selected_row_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

pub fn status_line_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// User identity
// =============================================================================

/// Parses a role colour (`#rrggbb`, named or indexed colour).
/// CSS-only values such as gradients yield `None`.
pub fn parse_colour(raw: &str) -> Option<Color> {
    Color::from_str(raw.trim()).ok()
}

/// Root style of a username: caller attributes with the role colour on top.
pub fn username_style(attrs: Style, colour: Option<&str>) -> Style {
    match colour.and_then(parse_colour) {
        Some(fg) => attrs.fg(fg),
        None => attrs,
    }
}

pub fn bot_badge_style() -> Style {
    Style::default()
        .fg(ACCENT_CONTRAST)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Avatar background picked deterministically from the user id.
pub fn avatar_style(seed: &str) -> Style {
    let hash = seed
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    Style::default()
        .fg(Color::White)
        .bg(AVATAR_PALETTE[hash % AVATAR_PALETTE.len()])
        .add_modifier(Modifier::BOLD)
}

pub fn unknown_avatar_style() -> Style {
    Style::default().fg(Color::Gray).bg(Color::DarkGray)
}

// =============================================================================
// Modal
// =============================================================================

pub fn modal_overlay_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

pub fn modal_content_style(no_background: bool) -> Style {
    if no_background {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::White).bg(PRIMARY_BACKGROUND)
    }
}

pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn modal_actions_style() -> Style {
    Style::default().bg(SECONDARY_BACKGROUND)
}

pub fn button_style(style: ButtonStyle, disabled: bool) -> Style {
    let base = match style {
        ButtonStyle::Default => Style::default().fg(Color::White).bg(Color::DarkGray),
        ButtonStyle::Contrast => Style::default().fg(Color::White).bg(PRIMARY_BACKGROUND),
        ButtonStyle::Error => Style::default().fg(Color::White).bg(ERROR),
        ButtonStyle::ContrastError => Style::default().fg(ERROR).bg(PRIMARY_BACKGROUND),
    };

    if disabled {
        base.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        base
    }
}

// =============================================================================
// Message input
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
