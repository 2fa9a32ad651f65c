use super::{
    member_list_state::MemberListState,
    message_input_state::MessageInputState,
    navigation::{ContextMenuState, ScreenStackState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePane {
    #[default]
    Members,
    MessageInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    active_pane: ActivePane,
    members: MemberListState,
    message_input: MessageInputState,
    screens: ScreenStackState,
    context_menu: ContextMenuState,
    last_sent: Option<String>,
    /// Bumped whenever a watched store entry changes.
    identity_revision: u64,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            active_pane: ActivePane::default(),
            members: MemberListState::default(),
            message_input: MessageInputState::default(),
            screens: ScreenStackState::default(),
            context_menu: ContextMenuState::default(),
            last_sent: None,
            identity_revision: 0,
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn set_active_pane(&mut self, pane: ActivePane) {
        self.active_pane = pane;
    }

    pub fn members(&self) -> &MemberListState {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut MemberListState {
        &mut self.members
    }

    pub fn message_input(&self) -> &MessageInputState {
        &self.message_input
    }

    pub fn message_input_mut(&mut self) -> &mut MessageInputState {
        &mut self.message_input
    }

    pub fn screens(&self) -> &ScreenStackState {
        &self.screens
    }

    pub fn screens_mut(&mut self) -> &mut ScreenStackState {
        &mut self.screens
    }

    pub fn context_menu(&self) -> &ContextMenuState {
        &self.context_menu
    }

    pub fn context_menu_mut(&mut self) -> &mut ContextMenuState {
        &mut self.context_menu
    }

    /// Splits out the two services user widgets write to.
    pub fn overlays_mut(&mut self) -> (&mut ScreenStackState, &mut ContextMenuState) {
        (&mut self.screens, &mut self.context_menu)
    }

    /// True while a screen or context menu covers the main view.
    pub fn has_overlay(&self) -> bool {
        self.context_menu.current().is_some() || self.screens.top().is_some()
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    pub fn record_sent(&mut self, text: String) {
        self.last_sent = Some(text);
    }

    pub fn identity_revision(&self) -> u64 {
        self.identity_revision
    }

    pub fn bump_identity_revision(&mut self) {
        self.identity_revision = self.identity_revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        navigation::{ContextMenu, ContextMenuPayload, Screen, ScreenStack, USER_MENU_ID},
        user::UserId,
    };

    #[test]
    fn default_state_runs_with_members_focused() {
        let state = ShellState::default();

        assert!(state.is_running());
        assert_eq!(state.active_pane(), ActivePane::Members);
        assert!(!state.has_overlay());
    }

    #[test]
    fn overlays_report_open_screens_and_menus() {
        let mut state = ShellState::default();
        let (screens, menu) = state.overlays_mut();
        screens.open_screen(Screen::Profile {
            user_id: UserId::new("U1"),
        });
        menu.open(
            USER_MENU_ID,
            ContextMenuPayload {
                user: None,
                contextual_channel: None,
            },
        );

        assert!(state.has_overlay());
        state.context_menu_mut().close();
        state.screens_mut().close_top();
        assert!(!state.has_overlay());
    }
}
