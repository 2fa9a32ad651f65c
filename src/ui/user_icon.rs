//! Avatar glyph rendered before a username.

use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::domain::{
    display::{IdentitySources, ServerIdentity},
    user::{Masquerade, User},
};

use super::{styles, username::Username};

pub const DEFAULT_ICON_SIZE: u16 = 24;

/// Pixel-ish size → terminal cells, one cell per 8 units, clamped to 1..=5.
pub fn icon_cells(size: u16) -> u16 {
    size.div_ceil(8).clamp(1, 5)
}

#[derive(Debug, Clone, Copy)]
pub struct UserIcon<'a> {
    pub target: Option<&'a User>,
    pub size: u16,
    pub masquerade: Option<&'a Masquerade>,
    pub show_server_identity: ServerIdentity,
}

impl<'a> UserIcon<'a> {
    pub fn new(target: Option<&'a User>, size: u16) -> Self {
        Self {
            target,
            size,
            masquerade: None,
            show_server_identity: ServerIdentity::Off,
        }
    }

    pub fn width(&self) -> u16 {
        icon_cells(self.size)
    }

    pub fn span(&self, sources: IdentitySources<'_>) -> Span<'static> {
        let cells = usize::from(self.width());

        let Some(user) = self.target else {
            return Span::styled(frame_glyph('?', cells), styles::unknown_avatar_style());
        };

        let name = Username::new(Some(user))
            .masquerade(self.masquerade)
            .show_server_identity(self.show_server_identity)
            .resolve(sources);
        let initial = name
            .text
            .chars()
            .find(|ch| ch.is_alphanumeric())
            .map_or('?', |ch| ch.to_uppercase().next().unwrap_or(ch));

        // A masquerade avatar replaces the user's own picture.
        let seed = self
            .masquerade
            .and_then(|masquerade| masquerade.avatar.as_deref())
            .unwrap_or(user.id.as_str());

        Span::styled(frame_glyph(initial, cells), styles::avatar_style(seed))
    }
}

/// Exactly `cells` columns wide. The frame is dropped when a wide initial
/// would not fit inside it.
fn frame_glyph(initial: char, cells: usize) -> String {
    let (initial, width) = match initial.width() {
        Some(width) if width > 0 && width <= cells => (initial, width),
        _ => ('?', 1),
    };

    if cells < width + 2 {
        return format!("{initial}{}", " ".repeat(cells.saturating_sub(width)));
    }

    let pad = cells - 2 - width;
    let left = pad / 2;
    format!(
        "({}{initial}{})",
        " ".repeat(left),
        " ".repeat(pad - left)
    )
}
