//! UI layer: rendering and interaction entry points (TUI).

mod event_source;
mod keyboard;
mod message_input;
mod modal;
mod overlay;
pub mod shell;
mod styles;
mod terminal;
mod user_icon;
mod user_short;
mod username;
mod view;

pub(crate) use event_source::CrosstermEventSource;
pub use user_icon::DEFAULT_ICON_SIZE;
#[cfg(test)]
pub(crate) use user_short::{ClickOutcome, UserShort};

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
