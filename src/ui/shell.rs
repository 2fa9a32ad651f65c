use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;
use ratatui::{backend::Backend, Frame, Terminal};

use crate::{
    domain::{
        events::{AppEvent, KeyInput, PointerInput, ShellCommand},
        shell_state::ActivePane,
    },
    usecases::contracts::{AppEventSource, ShellOrchestrator},
};

use super::{
    keyboard::KeyboardHub,
    modal::{Modal, ModalProps},
    overlay::{self, OverlayKey},
    terminal::TerminalSession,
    user_short::UserShort,
    view::{self, RowHit},
};

struct ActiveOverlay {
    key: OverlayKey,
    props: ModalProps,
}

/// Frame-to-frame UI state: the modal and its key listener, the rows drawn
/// last frame and the queue overlay actions write to.
pub struct ShellView {
    hub: KeyboardHub,
    modal: Modal,
    overlay: Option<ActiveOverlay>,
    rows: Vec<RowHit>,
    commands_tx: Sender<ShellCommand>,
    commands_rx: Receiver<ShellCommand>,
}

impl Default for ShellView {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellView {
    pub fn new() -> Self {
        let hub = KeyboardHub::default();
        let (commands_tx, commands_rx) = mpsc::channel();
        Self {
            modal: Modal::new(hub.clone()),
            hub,
            overlay: None,
            rows: Vec::new(),
            commands_tx,
            commands_rx,
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, orchestrator: &dyn ShellOrchestrator) {
        self.rows = view::render(frame, orchestrator);
        self.sync_overlay(orchestrator);

        match &self.overlay {
            Some(active) => {
                let area = frame.area();
                self.modal.render(&active.props, area, frame.buffer_mut());
            }
            None => self.modal.unmount(),
        }
    }

    /// Rebuilds props (and with them the callbacks) only when the overlay
    /// changes; the body is refreshed every frame.
    fn sync_overlay(&mut self, orchestrator: &dyn ShellOrchestrator) {
        let Some(key) = overlay::overlay_key(orchestrator.state()) else {
            self.overlay = None;
            return;
        };

        if let Some(active) = self.overlay.as_mut().filter(|active| active.key == key) {
            active.props.children = overlay::body(&key, orchestrator);
            return;
        }

        tracing::debug!(overlay = ?key, "showing overlay");
        let props = overlay::build_props(&key, orchestrator, &self.commands_tx);
        self.overlay = Some(ActiveOverlay { key, props });
    }

    pub fn handle_event(
        &mut self,
        event: AppEvent,
        orchestrator: &mut dyn ShellOrchestrator,
    ) -> Result<()> {
        match event {
            AppEvent::InputKey(key) => {
                self.hub.dispatch(&key);
                if self.overlay.is_some() {
                    self.handle_overlay_key(&key);
                } else if !self.handle_row_key(&key, orchestrator) {
                    orchestrator.handle_event(AppEvent::InputKey(key))?;
                }
            }
            AppEvent::Pointer(pointer) => self.handle_pointer(pointer, orchestrator),
            other => orchestrator.handle_event(other)?,
        }

        self.apply_commands(orchestrator)?;
        orchestrator.sync()
    }

    fn handle_overlay_key(&self, key: &KeyInput) {
        let Some(active) = &self.overlay else {
            return;
        };
        if key.key == "esc" && !active.props.disallow_closing {
            (active.props.on_close)();
        }
    }

    /// Member-row shortcuts that act like clicks on the selected row.
    fn handle_row_key(&self, key: &KeyInput, orchestrator: &mut dyn ShellOrchestrator) -> bool {
        if orchestrator.state().active_pane() != ActivePane::Members || key.ctrl {
            return false;
        }
        if !matches!(key.key.as_str(), "enter" | "m" | "c") {
            return false;
        }
        let Some(entry) = orchestrator.state().members().selected_entry().cloned() else {
            return false;
        };

        let user = orchestrator.user(&entry.user_id).cloned();
        let channel = orchestrator.channel().cloned();
        let short = UserShort {
            masquerade: entry.masquerade.as_ref(),
            channel: channel.as_ref(),
            ..UserShort::new(user.as_ref())
        };
        let mut services = orchestrator.interactions();

        match key.key.as_str() {
            "enter" => {
                short.handle_click(key.shift, &mut services);
            }
            "m" => {
                short.handle_click(true, &mut services);
            }
            _ => short.handle_context_menu(&mut services),
        }
        true
    }

    fn handle_pointer(&self, pointer: PointerInput, orchestrator: &mut dyn ShellOrchestrator) {
        if let Some(active) = &self.overlay {
            self.modal.handle_pointer(&active.props, pointer);
            return;
        }

        let Some(hit) = self
            .rows
            .iter()
            .find(|hit| hit.contains(pointer.column, pointer.row))
        else {
            return;
        };
        orchestrator.state_mut().members_mut().select(hit.index);
        if !hit.hits_user(pointer.column) {
            return;
        }

        let Some(entry) = orchestrator.state().members().entries().get(hit.index).cloned() else {
            return;
        };
        let user = orchestrator.user(&entry.user_id).cloned();
        let channel = orchestrator.channel().cloned();
        let short = UserShort {
            masquerade: entry.masquerade.as_ref(),
            channel: channel.as_ref(),
            ..UserShort::new(user.as_ref())
        };

        let outcome = short.handle_pointer(pointer, &mut orchestrator.interactions());
        tracing::debug!(row = hit.index, outcome = ?outcome, "member row clicked");
    }

    fn apply_commands(&self, orchestrator: &mut dyn ShellOrchestrator) -> Result<()> {
        for command in self.commands_rx.try_iter() {
            orchestrator.apply(command)?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn is_listening(&self) -> bool {
        self.modal.is_listening()
    }
}

pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &mut ShellView,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    while orchestrator.state().is_running() {
        terminal.draw(|frame| view.render(frame, &*orchestrator))?;

        if let Some(event) = event_source.next_event()? {
            view.handle_event(event, orchestrator)?;
        }
    }

    Ok(())
}

pub fn start(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        identity = ?orchestrator.display().show_server_identity,
        members = orchestrator.state().members().entries().len(),
        "starting TUI shell"
    );

    let mut session = TerminalSession::new()?;
    let mut view = ShellView::new();
    run(session.terminal(), &mut view, event_source, orchestrator)?;

    tracing::info!("TUI shell stopped");
    Ok(())
}
