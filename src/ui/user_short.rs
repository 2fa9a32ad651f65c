//! Icon + username composite with profile, mention and context-menu wiring.

use std::ops::Range;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::domain::{
    composer::mention_token,
    display::{IdentitySources, ServerIdentity},
    events::{PointerButton, PointerInput},
    navigation::{ContextMenuPayload, InteractionServices, Screen, USER_MENU_ID},
    user::{ChannelId, Masquerade, User},
};

use super::{
    user_icon::{UserIcon, DEFAULT_ICON_SIZE},
    username::Username,
};

const MENTION_SEND_FAILED: &str = "UI_MENTION_SEND_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Shift-click: default action suppressed, mention sent to the composer.
    MentionQueued,
    ProfileOpened,
    ContextMenuOpened,
    Ignored,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserShort<'a> {
    pub user: Option<&'a User>,
    pub size: Option<u16>,
    pub prefix_at: bool,
    pub masquerade: Option<&'a Masquerade>,
    pub show_server_identity: ServerIdentity,
    pub channel: Option<&'a ChannelId>,
}

/// Rendered row plus the column ranges (relative to the row start) that
/// accept pointer input.
#[derive(Debug, Clone, PartialEq)]
pub struct UserShortLine {
    pub line: Line<'static>,
    pub icon: Range<u16>,
    pub name: Range<u16>,
}

impl UserShortLine {
    pub fn hit(&self, relative_column: u16) -> bool {
        self.icon.contains(&relative_column) || self.name.contains(&relative_column)
    }
}

impl<'a> UserShort<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    fn icon(&self) -> UserIcon<'a> {
        UserIcon {
            masquerade: self.masquerade,
            show_server_identity: self.show_server_identity,
            ..UserIcon::new(self.user, self.size.unwrap_or(DEFAULT_ICON_SIZE))
        }
    }

    pub fn username(&self) -> Username<'a> {
        Username::new(self.user)
            .prefix_at(self.prefix_at)
            .masquerade(self.masquerade)
            .show_server_identity(self.show_server_identity)
    }

    pub fn render(&self, sources: IdentitySources<'_>) -> UserShortLine {
        let icon = self.icon();
        let icon_width = icon.width();
        let name_spans = self.username().spans(sources);
        let name_width = name_spans
            .iter()
            .map(|span| u16::try_from(span.content.width()).unwrap_or(u16::MAX))
            .fold(0u16, u16::saturating_add);

        let mut spans = Vec::with_capacity(name_spans.len() + 2);
        spans.push(icon.span(sources));
        spans.push(Span::raw(" "));
        spans.extend(name_spans);

        let name_start = icon_width.saturating_add(1);
        UserShortLine {
            line: Line::from(spans),
            icon: 0..icon_width,
            name: name_start..name_start.saturating_add(name_width),
        }
    }

    pub fn handle_pointer(
        &self,
        pointer: PointerInput,
        services: &mut InteractionServices<'_>,
    ) -> ClickOutcome {
        match pointer.button {
            PointerButton::Primary => self.handle_click(pointer.shift, services),
            PointerButton::Secondary => {
                self.handle_context_menu(services);
                ClickOutcome::ContextMenuOpened
            }
        }
    }

    /// Shift-click appends a mention to the draft; a plain click opens the profile.
    pub fn handle_click(&self, shift: bool, services: &mut InteractionServices<'_>) -> ClickOutcome {
        if let (true, Some(user)) = (shift, self.user) {
            if let Err(error) = services
                .composer
                .append_mention(mention_token(user.id.as_str()))
            {
                tracing::warn!(
                    code = MENTION_SEND_FAILED,
                    error = %error,
                    "composer is gone; mention dropped"
                );
            }
            return ClickOutcome::MentionQueued;
        }

        match self.user {
            Some(user) => {
                services.screens.open_screen(Screen::Profile {
                    user_id: user.id.clone(),
                });
                ClickOutcome::ProfileOpened
            }
            None => ClickOutcome::Ignored,
        }
    }

    pub fn handle_context_menu(&self, services: &mut InteractionServices<'_>) {
        services.menus.open(
            USER_MENU_ID,
            ContextMenuPayload {
                user: self.user.map(|user| user.id.clone()),
                contextual_channel: self.channel.cloned(),
            },
        );
    }
}
