use super::user::{MemberKey, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    Pointer(PointerInput),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift: false,
        }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn is_enter(&self) -> bool {
        self.key == "enter"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left click.
    Primary,
    /// Right click, opens context menus.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub column: u16,
    pub row: u16,
    pub button: PointerButton,
    pub shift: bool,
}

impl PointerInput {
    pub fn primary(column: u16, row: u16) -> Self {
        Self {
            column,
            row,
            button: PointerButton::Primary,
            shift: false,
        }
    }

    pub fn secondary(column: u16, row: u16) -> Self {
        Self {
            button: PointerButton::Secondary,
            ..Self::primary(column, row)
        }
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// Requests raised by overlay actions, applied by the shell orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    CloseScreen,
    CloseMenu,
    OpenProfile(UserId),
    Mention(UserId),
    ClearNickname(MemberKey),
}
