//! Navigation context, screen stack and context-menu requests.

use super::{
    composer::ComposerSender,
    user::{ChannelId, ServerId, UserId},
};

pub const USER_MENU_ID: &str = "Menu";

pub trait NavigationContext {
    fn current_server(&self) -> Option<&ServerId>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    server: Option<ServerId>,
}

impl Navigation {
    pub fn new(server: Option<ServerId>) -> Self {
        Self { server }
    }
}

impl NavigationContext for Navigation {
    fn current_server(&self) -> Option<&ServerId> {
        self.server.as_ref()
    }
}

/// Overlay screens pushed on top of the main view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Profile { user_id: UserId },
}

pub trait ScreenStack {
    fn open_screen(&mut self, screen: Screen);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenStackState {
    screens: Vec<Screen>,
}

impl ScreenStackState {
    pub fn top(&self) -> Option<&Screen> {
        self.screens.last()
    }

    pub fn close_top(&mut self) -> Option<Screen> {
        self.screens.pop()
    }
}

impl ScreenStack for ScreenStackState {
    fn open_screen(&mut self, screen: Screen) {
        tracing::debug!(screen = ?screen, depth = self.screens.len() + 1, "opening screen");
        self.screens.push(screen);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuPayload {
    pub user: Option<UserId>,
    pub contextual_channel: Option<ChannelId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenContextMenu {
    pub menu_id: String,
    pub payload: ContextMenuPayload,
}

pub trait ContextMenu {
    fn open(&mut self, menu_id: &str, payload: ContextMenuPayload);
}

/// Holds at most one open context menu; opening another replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextMenuState {
    open: Option<OpenContextMenu>,
}

impl ContextMenuState {
    pub fn current(&self) -> Option<&OpenContextMenu> {
        self.open.as_ref()
    }

    pub fn close(&mut self) -> Option<OpenContextMenu> {
        self.open.take()
    }
}

impl ContextMenu for ContextMenuState {
    fn open(&mut self, menu_id: &str, payload: ContextMenuPayload) {
        tracing::debug!(menu_id, payload = ?payload, "opening context menu");
        self.open = Some(OpenContextMenu {
            menu_id: menu_id.to_owned(),
            payload,
        });
    }
}

/// Services a user widget writes to when interacted with.
pub struct InteractionServices<'s> {
    pub screens: &'s mut dyn ScreenStack,
    pub menus: &'s mut dyn ContextMenu,
    pub composer: &'s ComposerSender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_stack_pushes_and_pops_in_lifo_order() {
        let mut stack = ScreenStackState::default();
        stack.open_screen(Screen::Profile {
            user_id: UserId::new("U1"),
        });
        stack.open_screen(Screen::Profile {
            user_id: UserId::new("U2"),
        });

        assert_eq!(
            stack.close_top(),
            Some(Screen::Profile {
                user_id: UserId::new("U2")
            })
        );
        assert_eq!(
            stack.top(),
            Some(&Screen::Profile {
                user_id: UserId::new("U1")
            })
        );
        assert!(stack.close_top().is_some());
        assert!(stack.top().is_none());
        assert!(stack.close_top().is_none());
    }

    #[test]
    fn opening_a_context_menu_replaces_the_previous_one() {
        let mut menu = ContextMenuState::default();
        menu.open(
            USER_MENU_ID,
            ContextMenuPayload {
                user: Some(UserId::new("U1")),
                contextual_channel: None,
            },
        );
        menu.open(
            USER_MENU_ID,
            ContextMenuPayload {
                user: Some(UserId::new("U2")),
                contextual_channel: Some(ChannelId::new("C1")),
            },
        );

        let open = menu.current().expect("menu should be open");
        assert_eq!(open.payload.user, Some(UserId::new("U2")));
        assert_eq!(open.payload.contextual_channel, Some(ChannelId::new("C1")));

        menu.close();
        assert!(menu.current().is_none());
    }

    #[test]
    fn navigation_reports_current_server() {
        assert!(Navigation::default().current_server().is_none());

        let navigation = Navigation::new(Some(ServerId::new("S1")));

        assert_eq!(navigation.current_server(), Some(&ServerId::new("S1")));
    }
}
