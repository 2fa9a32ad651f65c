//! Modal dialog: overlay, title, content, action bar and Enter-to-confirm.

use std::{fmt, rc::Rc};

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::domain::events::{PointerButton, PointerInput};

use super::{
    keyboard::{KeyboardHub, ListenerHandle},
    styles,
};

const MIN_CONTAINER_WIDTH: u16 = 24;
const SCREEN_MARGIN: u16 = 2;
const ACTIONS_PADDING_X: u16 = 2;
const ACTIONS_HEIGHT: u16 = 3;
const BUTTON_GAP: u16 = 1;

pub type Callback = Rc<dyn Fn()>;

pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + 'static,
{
    Rc::new(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    Default,
    #[default]
    Contrast,
    Error,
    ContrastError,
}

#[derive(Clone)]
pub struct ModalAction {
    pub text: String,
    pub on_click: Callback,
    /// Also triggered by Enter while the modal is shown.
    pub confirmation: bool,
    pub style: Option<ButtonStyle>,
}

impl ModalAction {
    pub fn new(text: impl Into<String>, on_click: Callback) -> Self {
        Self {
            text: text.into(),
            on_click,
            confirmation: false,
            style: None,
        }
    }

    pub fn confirmation(mut self) -> Self {
        self.confirmation = true;
        self
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }

    fn label(&self) -> String {
        format!(" {} ", self.text)
    }
}

impl fmt::Debug for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalAction")
            .field("text", &self.text)
            .field("confirmation", &self.confirmation)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ModalProps {
    pub visible: bool,
    pub title: Option<String>,
    pub children: Text<'static>,
    pub disallow_closing: bool,
    pub no_background: bool,
    /// Render the content block inline, without overlay or actions.
    pub dont_modal: bool,
    pub on_close: Callback,
    pub actions: Option<Vec<ModalAction>>,
    pub disabled: bool,
    pub border: bool,
}

impl ModalProps {
    pub fn new(visible: bool, on_close: Callback) -> Self {
        Self {
            visible,
            title: None,
            children: Text::default(),
            disallow_closing: false,
            no_background: false,
            dont_modal: false,
            on_close,
            actions: None,
            disabled: false,
            border: false,
        }
    }

    pub fn confirmation_action(&self) -> Option<&ModalAction> {
        self.actions
            .as_ref()
            .and_then(|actions| actions.iter().find(|action| action.confirmation))
    }

    fn attachment(&self) -> bool {
        self.actions.is_some()
    }
}

impl fmt::Debug for ModalProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalProps")
            .field("visible", &self.visible)
            .field("title", &self.title)
            .field("dont_modal", &self.dont_modal)
            .field("disallow_closing", &self.disallow_closing)
            .field("actions", &self.actions)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

struct InstalledConfirmation {
    action: Callback,
    _listener: ListenerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ModalLayout {
    container: Rect,
    /// Button rectangles paired with the index of their action.
    buttons: Vec<(Rect, usize)>,
}

/// Stateful part of a modal: the confirmation key listener and the layout
/// of the last frame, used for pointer hit testing.
pub struct Modal {
    hub: KeyboardHub,
    confirmation: Option<InstalledConfirmation>,
    layout: Option<ModalLayout>,
}

impl Modal {
    pub fn new(hub: KeyboardHub) -> Self {
        Self {
            hub,
            confirmation: None,
            layout: None,
        }
    }

    /// Installs, swaps or releases the Enter listener so that one is
    /// registered exactly while a confirmation action is shown as a modal.
    pub fn sync(&mut self, props: &ModalProps) {
        let wanted = props
            .confirmation_action()
            .filter(|_| props.visible && !props.dont_modal);

        let Some(action) = wanted else {
            if self.confirmation.take().is_some() {
                tracing::debug!("released modal confirmation listener");
            }
            return;
        };

        let unchanged = self
            .confirmation
            .as_ref()
            .is_some_and(|installed| Rc::ptr_eq(&installed.action, &action.on_click));
        if unchanged {
            return;
        }

        self.confirmation = None;
        let on_click = Rc::clone(&action.on_click);
        let listener = self.hub.add_listener(move |key| {
            if key.is_enter() {
                on_click();
            }
        });
        tracing::debug!(action = %action.text, "installed modal confirmation listener");
        self.confirmation = Some(InstalledConfirmation {
            action: Rc::clone(&action.on_click),
            _listener: listener,
        });
    }

    /// Releases the listener and forgets the layout.
    pub fn unmount(&mut self) {
        self.confirmation = None;
        self.layout = None;
    }

    #[cfg(test)]
    pub fn is_listening(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Renders `props`. Inline content goes to `area`; a full modal covers
    /// the whole buffer.
    pub fn render(&mut self, props: &ModalProps, area: Rect, buf: &mut Buffer) {
        self.sync(props);
        self.layout = None;

        if !props.visible {
            return;
        }

        if props.dont_modal {
            render_content(props, area, buf);
            return;
        }

        let screen = buf.area;
        buf.set_style(screen, styles::modal_overlay_style());

        let container = container_rect(props, screen);
        Clear.render(container, buf);

        let actions_height = if props.attachment() {
            ACTIONS_HEIGHT.min(container.height)
        } else {
            0
        };
        let content = Rect {
            height: container.height - actions_height,
            ..container
        };
        render_content(props, content, buf);

        let buttons = match &props.actions {
            Some(actions) => {
                let bar = Rect {
                    y: content.bottom(),
                    height: actions_height,
                    ..container
                };
                render_actions(actions, props.disabled, bar, buf)
            }
            None => Vec::new(),
        };

        self.layout = Some(ModalLayout { container, buttons });
    }

    /// Routes a pointer event. Returns true when the modal consumed it.
    pub fn handle_pointer(&self, props: &ModalProps, pointer: PointerInput) -> bool {
        if !props.visible || props.dont_modal {
            return false;
        }
        let Some(layout) = &self.layout else {
            return false;
        };

        let position = Position::new(pointer.column, pointer.row);
        let primary = pointer.button == PointerButton::Primary;

        if layout.container.contains(position) {
            if primary && !props.disabled {
                let clicked = layout
                    .buttons
                    .iter()
                    .find(|(rect, _)| rect.contains(position))
                    .and_then(|(_, index)| props.actions.as_ref()?.get(*index));
                if let Some(action) = clicked {
                    (action.on_click)();
                }
            }
            return true;
        }

        if primary && !props.disallow_closing {
            (props.on_close)();
        }
        true
    }
}

fn content_text(props: &ModalProps) -> Text<'static> {
    let mut lines = Vec::with_capacity(props.children.lines.len() + 2);
    if let Some(title) = &props.title {
        lines.push(Line::styled(title.clone(), styles::modal_title_style()));
        lines.push(Line::default());
    }
    lines.extend(props.children.lines.iter().cloned());
    Text::from(lines)
}

fn content_borders(props: &ModalProps) -> Borders {
    match (props.border, props.attachment()) {
        (false, _) => Borders::NONE,
        (true, true) => Borders::TOP | Borders::LEFT | Borders::RIGHT,
        (true, false) => Borders::ALL,
    }
}

fn render_content(props: &ModalProps, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(content_borders(props))
        .padding(Padding::new(2, 2, 1, 1))
        .style(styles::modal_content_style(props.no_background));

    Paragraph::new(content_text(props))
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

fn container_rect(props: &ModalProps, screen: Rect) -> Rect {
    let text = content_text(props);
    let borders = content_borders(props);
    let border_x = u16::from(borders.contains(Borders::LEFT)) + u16::from(borders.contains(Borders::RIGHT));
    let border_y = u16::from(borders.contains(Borders::TOP)) + u16::from(borders.contains(Borders::BOTTOM));

    let content_width = clamp_u16(text.width()) + 4 + border_x;
    let content_height = clamp_u16(text.lines.len()) + 2 + border_y;

    let (actions_width, actions_height) = match &props.actions {
        Some(actions) => (buttons_width(actions) + 2 * ACTIONS_PADDING_X, ACTIONS_HEIGHT),
        None => (0, 0),
    };

    let max_width = screen.width.saturating_sub(SCREEN_MARGIN);
    let width = content_width
        .max(actions_width)
        .max(MIN_CONTAINER_WIDTH)
        .min(max_width);
    let height = content_height
        .saturating_add(actions_height)
        .min(screen.height);

    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

fn buttons_width(actions: &[ModalAction]) -> u16 {
    let labels: u16 = actions
        .iter()
        .map(|action| clamp_u16(Span::raw(action.label()).width()))
        .fold(0, u16::saturating_add);
    let gaps = clamp_u16(actions.len().saturating_sub(1)) * BUTTON_GAP;
    labels.saturating_add(gaps)
}

/// Lays buttons out from the right edge in list order, so the first action
/// ends up rightmost and the row reads in reverse.
fn render_actions(
    actions: &[ModalAction],
    disabled: bool,
    bar: Rect,
    buf: &mut Buffer,
) -> Vec<(Rect, usize)> {
    buf.set_style(bar, styles::modal_actions_style());
    if bar.height == 0 {
        return Vec::new();
    }

    let row = bar.y + bar.height / 2;
    let mut right = bar.right().saturating_sub(ACTIONS_PADDING_X);
    let left_limit = bar.x + ACTIONS_PADDING_X;
    let mut placed = Vec::with_capacity(actions.len());

    for (index, action) in actions.iter().enumerate() {
        let label = action.label();
        let width = clamp_u16(Span::raw(label.as_str()).width());
        let Some(x) = right.checked_sub(width).filter(|x| *x >= left_limit) else {
            break;
        };

        let rect = Rect::new(x, row, width, 1);
        let style = styles::button_style(action.style.unwrap_or_default(), disabled);
        buf.set_stringn(x, row, &label, usize::from(width), style);
        placed.push((rect, index));

        right = x.saturating_sub(BUTTON_GAP);
    }

    placed
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
