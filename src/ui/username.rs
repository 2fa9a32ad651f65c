//! Username rendering: display name, role colour and bot badge.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::domain::{
    display::{self, DisplayName, IdentitySources, ServerIdentity},
    locale,
    user::{Masquerade, User},
};

use super::styles;

#[derive(Debug, Clone, Copy, Default)]
pub struct Username<'a> {
    pub user: Option<&'a User>,
    pub prefix_at: bool,
    pub masquerade: Option<&'a Masquerade>,
    pub show_server_identity: ServerIdentity,
    /// Extra style merged into the root span; the role colour wins over its foreground.
    pub attrs: Style,
}

impl<'a> Username<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn prefix_at(mut self, prefix_at: bool) -> Self {
        self.prefix_at = prefix_at;
        self
    }

    pub fn masquerade(mut self, masquerade: Option<&'a Masquerade>) -> Self {
        self.masquerade = masquerade;
        self
    }

    pub fn show_server_identity(mut self, identity: ServerIdentity) -> Self {
        self.show_server_identity = identity;
        self
    }

    pub fn attrs(mut self, attrs: Style) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn resolve(&self, sources: IdentitySources<'_>) -> DisplayName {
        display::resolve_display_name(
            self.user,
            self.masquerade,
            self.show_server_identity,
            sources,
        )
    }

    /// Name span, followed by a separate badge span for bots.
    pub fn spans(&self, sources: IdentitySources<'_>) -> Vec<Span<'static>> {
        let name = self.resolve(sources);
        let style = styles::username_style(self.attrs, name.colour.as_deref());

        if name.is_bot {
            let badge = sources.locale.text(locale::BOT_BADGE).to_uppercase();
            return vec![
                Span::styled(name.text, style),
                Span::raw(" "),
                Span::styled(format!(" {badge} "), styles::bot_badge_style()),
            ];
        }

        let text = if self.prefix_at {
            format!("@{}", name.text)
        } else {
            name.text
        };
        vec![Span::styled(text, style)]
    }

    pub fn line(&self, sources: IdentitySources<'_>) -> Line<'static> {
        Line::from(self.spans(sources))
    }
}
