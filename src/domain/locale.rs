use std::collections::HashMap;

pub const UNKNOWN_USER: &str = "app.main.channel.unknown_user";
pub const BOT_BADGE: &str = "app.main.channel.bot";
pub const CLOSE: &str = "app.special.modals.actions.close";
pub const PROFILE_TITLE: &str = "app.special.popovers.user_profile.title";
pub const MENU_MENTION: &str = "app.context_menu.mention";
pub const MENU_VIEW_PROFILE: &str = "app.context_menu.view_profile";
pub const MENU_CLEAR_NICKNAME: &str = "app.context_menu.clear_nickname";
pub const MENU_CANCEL: &str = "app.special.modals.actions.cancel";

const DEFAULT_ENTRIES: [(&str, &str); 8] = [
    (UNKNOWN_USER, "Unknown User"),
    (BOT_BADGE, "Bot"),
    (CLOSE, "Close"),
    (PROFILE_TITLE, "Profile"),
    (MENU_MENTION, "Mention"),
    (MENU_VIEW_PROFILE, "View Profile"),
    (MENU_CLEAR_NICKNAME, "Clear Nickname"),
    (MENU_CANCEL, "Cancel"),
];

/// Resolves symbolic text ids to display strings.
pub trait Localizer {
    fn text(&self, id: &str) -> String;
}

/// Flat id → string table with the built-in English defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(id, text)| ((*id).to_owned(), (*text).to_owned()))
                .collect(),
        }
    }
}

impl Catalog {
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        catalog
            .entries
            .extend(overrides.iter().map(|(id, text)| (id.clone(), text.clone())));
        catalog
    }
}

impl Localizer for Catalog {
    fn text(&self, id: &str) -> String {
        self.entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_owned())
    }
}
