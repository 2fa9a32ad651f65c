//! Composer rendering.

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{message_input_state::MessageInputState, shell_state::ActivePane};

use super::styles;

const PLACEHOLDER_TEXT: &str = "Press 'i' to write, 'm' or shift-click a member to mention";

const PROMPT_SYMBOL: &str = "> ";

pub fn render_message_input(
    frame: &mut Frame<'_>,
    area: Rect,
    input_state: &MessageInputState,
    active_pane: ActivePane,
) {
    let is_focused = active_pane == ActivePane::MessageInput;

    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let paragraph = Paragraph::new(build_input_line(input_state, is_focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if is_focused {
        frame.set_cursor_position(cursor_position(area, input_state));
    }
}

/// Cursor cell inside the bordered box, measured in display columns.
fn cursor_position(area: Rect, input_state: &MessageInputState) -> Position {
    let before_cursor: String = input_state
        .text()
        .chars()
        .take(input_state.cursor_position())
        .collect();
    let offset = PROMPT_SYMBOL.width() + before_cursor.width();

    Position::new(
        area.x
            .saturating_add(1)
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX)),
        area.y.saturating_add(1),
    )
}

fn build_input_line(input_state: &MessageInputState, is_focused: bool) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if !is_focused && input_state.is_empty() {
        return Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ]);
    }

    Line::from(vec![
        prompt,
        Span::styled(input_state.text().to_owned(), styles::input_text_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn placeholder_shows_when_empty_and_unfocused() {
        let state = MessageInputState::default();

        let text = line_text(&build_input_line(&state, false));

        assert!(text.starts_with(PROMPT_SYMBOL));
        assert!(text.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn focused_empty_input_shows_bare_prompt() {
        let state = MessageInputState::default();

        assert_eq!(line_text(&build_input_line(&state, true)), PROMPT_SYMBOL);
    }

    #[test]
    fn appended_mention_is_shown_unfocused() {
        let mut state = MessageInputState::default();
        state.append_mention("<@U1>");

        let text = line_text(&build_input_line(&state, false));

        assert_eq!(text, "> <@U1> ");
    }

    #[test]
    fn cursor_counts_wide_characters_as_two_columns() {
        let mut state = MessageInputState::default();
        state.insert_char('日');
        state.insert_char('a');
        state.move_cursor_left();

        let position = cursor_position(Rect::new(0, 10, 40, 3), &state);

        assert_eq!(position, Position::new(1 + 2 + 2, 11));
    }
}
