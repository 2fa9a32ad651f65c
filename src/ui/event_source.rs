use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::{
    domain::events::{AppEvent, KeyInput, PointerInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Default)]
pub struct CrosstermEventSource;

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        Ok(map_event(event::read()?))
    }
}

fn map_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(..) => Some(AppEvent::Tick),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppEvent::QuitRequested);
    }

    let name = match key.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Esc => "esc".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Up => "up".to_owned(),
        KeyCode::Down => "down".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(
        KeyInput::new(name, ctrl).with_shift(key.modifiers.contains(KeyModifiers::SHIFT)),
    ))
}

fn map_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    let pointer = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerInput::primary(mouse.column, mouse.row),
        MouseEventKind::Down(MouseButton::Right) => {
            PointerInput::secondary(mouse.column, mouse.row)
        }
        _ => return None,
    };

    Some(AppEvent::Pointer(
        pointer.with_shift(mouse.modifiers.contains(KeyModifiers::SHIFT)),
    ))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 2,
            modifiers,
        })
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(map_event(event), Some(AppEvent::QuitRequested));
    }

    #[test]
    fn named_keys_map_to_lowercase_names() {
        let event = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(
            map_event(event),
            Some(AppEvent::InputKey(KeyInput::new("enter", false)))
        );
    }

    #[test]
    fn shift_is_carried_on_keys_and_clicks() {
        let key = Event::Key(KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT));
        let click = mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::SHIFT);

        assert_eq!(
            map_event(key),
            Some(AppEvent::InputKey(KeyInput::new("M", false).with_shift(true)))
        );
        assert_eq!(
            map_event(click),
            Some(AppEvent::Pointer(PointerInput::primary(4, 2).with_shift(true)))
        );
    }

    #[test]
    fn right_click_is_secondary_and_other_mouse_events_are_dropped() {
        let right = mouse(MouseEventKind::Down(MouseButton::Right), KeyModifiers::NONE);
        let moved = mouse(MouseEventKind::Moved, KeyModifiers::NONE);

        assert_eq!(
            map_event(right),
            Some(AppEvent::Pointer(PointerInput::secondary(4, 2)))
        );
        assert_eq!(map_event(moved), None);
    }

    #[test]
    fn mock_source_drains_in_order() {
        let mut source = MockEventSource::from(vec![AppEvent::Tick, AppEvent::QuitRequested]);

        assert_eq!(source.next_event().expect("event"), Some(AppEvent::Tick));
        assert_eq!(
            source.next_event().expect("event"),
            Some(AppEvent::QuitRequested)
        );
        assert_eq!(source.next_event().expect("event"), None);
    }
}
