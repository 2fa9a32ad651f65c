use anyhow::Result;

use crate::{
    domain::{
        display::IdentitySources,
        events::{AppEvent, ShellCommand},
        navigation::InteractionServices,
        shell_state::ShellState,
        user::{ChannelId, User, UserId},
    },
    infra::config::DisplayConfig,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    fn display(&self) -> &DisplayConfig;
    fn channel(&self) -> Option<&ChannelId>;
    fn identity(&self) -> IdentitySources<'_>;
    fn user(&self, id: &UserId) -> Option<&User>;
    /// Borrows the overlay state and composer for a user widget handler.
    fn interactions(&mut self) -> InteractionServices<'_>;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
    fn apply(&mut self, command: ShellCommand) -> Result<()>;
    /// Pulls queued composer commands and store notifications into state.
    fn sync(&mut self) -> Result<()>;
}
