use std::sync::mpsc::Receiver;

use anyhow::Result;

use crate::{
    domain::{
        composer::{composer_channel, mention_token, ComposerCommand, ComposerSender},
        display::{self, IdentitySources},
        events::{AppEvent, KeyInput, ShellCommand},
        locale::Catalog,
        member_list_state::MemberEntry,
        navigation::{InteractionServices, Navigation, NavigationContext, Screen, ScreenStack},
        shell_state::{ActivePane, ShellState},
        store::{ClientStore, MemoryStore, StoreKey, StoreObserver, Subscription},
        user::{ChannelId, Masquerade, User, UserId},
    },
    infra::{config::DisplayConfig, contracts::MessageSink},
};

use super::contracts::ShellOrchestrator;

const COMPOSER_MENTION_REJECTED: &str = "COMPOSER_MENTION_REJECTED";
const COMPOSER_CLOSED: &str = "COMPOSER_CLOSED";
const MESSAGE_SEND_FAILED: &str = "MESSAGE_SEND_FAILED";

/// Client state and settings handed over to the orchestrator.
#[derive(Debug)]
pub struct ShellParts {
    pub store: MemoryStore,
    pub navigation: Navigation,
    pub locale: Catalog,
    pub display: DisplayConfig,
    pub channel: Option<ChannelId>,
    /// Extra member rows showing a user under a masquerade.
    pub masquerades: Vec<(UserId, Masquerade)>,
}

pub struct DefaultShellOrchestrator<M>
where
    M: MessageSink,
{
    state: ShellState,
    store: MemoryStore,
    navigation: Navigation,
    locale: Catalog,
    display: DisplayConfig,
    channel: Option<ChannelId>,
    masquerades: Vec<(UserId, Masquerade)>,
    sink: M,
    composer: ComposerSender,
    composer_rx: Receiver<ComposerCommand>,
    subscription: Option<Subscription>,
}

impl<M> DefaultShellOrchestrator<M>
where
    M: MessageSink,
{
    pub fn new(parts: ShellParts, sink: M) -> Self {
        let (composer, composer_rx) = composer_channel();
        let mut orchestrator = Self {
            state: ShellState::default(),
            store: parts.store,
            navigation: parts.navigation,
            locale: parts.locale,
            display: parts.display,
            channel: parts.channel,
            masquerades: parts.masquerades,
            sink,
            composer,
            composer_rx,
            subscription: None,
        };
        orchestrator.refresh_members();
        orchestrator
    }

    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    #[cfg(test)]
    pub fn sink(&self) -> &M {
        &self.sink
    }

    /// Rebuilds the member rows and re-subscribes to every store entry
    /// their rendering reads.
    fn refresh_members(&mut self) {
        let mut entries: Vec<MemberEntry> = match self.navigation.current_server() {
            Some(server) => self
                .store
                .members_of(server)
                .into_iter()
                .map(|member| MemberEntry::plain(member.key.user.clone()))
                .collect(),
            None => self
                .store
                .users()
                .into_iter()
                .map(|user| MemberEntry::plain(user.id.clone()))
                .collect(),
        };
        entries.extend(
            self.masquerades
                .iter()
                .map(|(user_id, masquerade)| MemberEntry {
                    user_id: user_id.clone(),
                    masquerade: Some(masquerade.clone()),
                }),
        );

        let mut keys: Vec<StoreKey> = Vec::new();
        for entry in &entries {
            for key in display::watch_keys(
                &entry.user_id,
                self.display.show_server_identity,
                &self.navigation,
            ) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }

        tracing::debug!(
            rows = entries.len(),
            watched = keys.len(),
            "member list refreshed"
        );
        self.subscription = Some(self.store.subscribe(keys));
        self.state.members_mut().set_ready(entries);
    }

    fn handle_members_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "q" => self.state.stop(),
            "j" | "down" => self.state.members_mut().select_next(),
            "k" | "up" => self.state.members_mut().select_previous(),
            "i" => self.state.set_active_pane(ActivePane::MessageInput),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "esc" => {
                self.state.set_active_pane(ActivePane::Members);
                return;
            }
            "enter" => {
                self.submit_draft();
                return;
            }
            _ => {}
        }

        let input = self.state.message_input_mut();
        match key.key.as_str() {
            "backspace" => input.delete_char_before(),
            "delete" => input.delete_char_at(),
            "left" => input.move_cursor_left(),
            "right" => input.move_cursor_right(),
            "home" => input.move_cursor_home(),
            "end" => input.move_cursor_end(),
            other if !key.ctrl => {
                let mut chars = other.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    input.insert_char(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_draft(&mut self) {
        let draft = self.state.message_input().text().trim().to_owned();
        if draft.is_empty() {
            return;
        }

        match self.sink.send(self.channel.as_ref(), &draft) {
            Ok(()) => {
                self.state.message_input_mut().clear();
                self.state.record_sent(draft);
            }
            Err(error) => {
                tracing::warn!(
                    code = MESSAGE_SEND_FAILED,
                    error = ?error,
                    "message sink rejected draft; keeping it in the composer"
                );
            }
        }
    }
}

impl<M> ShellOrchestrator for DefaultShellOrchestrator<M>
where
    M: MessageSink,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn display(&self) -> &DisplayConfig {
        &self.display
    }

    fn channel(&self) -> Option<&ChannelId> {
        self.channel.as_ref()
    }

    fn identity(&self) -> IdentitySources<'_> {
        IdentitySources {
            store: &self.store,
            navigation: &self.navigation,
            locale: &self.locale,
        }
    }

    fn user(&self, id: &UserId) -> Option<&User> {
        self.store.user(id)
    }

    fn interactions(&mut self) -> InteractionServices<'_> {
        let (screens, menus) = self.state.overlays_mut();
        InteractionServices {
            screens,
            menus,
            composer: &self.composer,
        }
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.sync()?,
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => match self.state.active_pane() {
                ActivePane::Members => self.handle_members_key(&key),
                ActivePane::MessageInput => self.handle_input_key(&key),
            },
            AppEvent::Pointer(_) => {}
        }

        Ok(())
    }

    fn apply(&mut self, command: ShellCommand) -> Result<()> {
        tracing::debug!(command = ?command, "applying shell command");
        match command {
            ShellCommand::CloseScreen => {
                self.state.screens_mut().close_top();
            }
            ShellCommand::CloseMenu => {
                self.state.context_menu_mut().close();
            }
            ShellCommand::OpenProfile(user_id) => {
                self.state.context_menu_mut().close();
                self.state
                    .screens_mut()
                    .open_screen(Screen::Profile { user_id });
            }
            ShellCommand::Mention(user_id) => {
                if let Err(error) = self.composer.append_mention(mention_token(user_id.as_str())) {
                    tracing::warn!(code = COMPOSER_CLOSED, error = %error, "mention dropped");
                }
            }
            ShellCommand::ClearNickname(key) => {
                let cleared = self.store.update_member(&key, |member| member.nickname = None);
                tracing::info!(member = ?key, cleared, "nickname cleared");
            }
        }

        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        for command in self.composer_rx.try_iter() {
            match command {
                ComposerCommand::AppendMention { token } => {
                    if !self.state.message_input_mut().append_mention(&token) {
                        tracing::warn!(
                            code = COMPOSER_MENTION_REJECTED,
                            token = %token,
                            "mention would overflow the draft"
                        );
                    }
                }
            }
        }

        let changed = self
            .subscription
            .as_ref()
            .map(Subscription::drain)
            .unwrap_or_default();
        if !changed.is_empty() {
            self.state.bump_identity_revision();
            tracing::debug!(
                changed = changed.len(),
                revision = self.state.identity_revision(),
                "watched store entries changed"
            );
            self.refresh_members();
        }

        Ok(())
    }
}
