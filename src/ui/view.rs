use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    domain::{
        member_list_state::MemberListUiState,
        shell_state::{ActivePane, ShellState},
    },
    usecases::contracts::ShellOrchestrator,
};

use super::{
    message_input::render_message_input,
    styles,
    user_short::{UserShort, UserShortLine},
};

/// Where a member row landed on screen, for pointer routing.
#[derive(Debug, Clone, PartialEq)]
pub struct RowHit {
    pub index: usize,
    pub area: Rect,
    pub line: UserShortLine,
}

impl RowHit {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.area.y && column >= self.area.x && column < self.area.right()
    }

    /// True when the pointer is over the icon or the name.
    pub fn hits_user(&self, column: u16) -> bool {
        column
            .checked_sub(self.area.x)
            .is_some_and(|relative| self.line.hit(relative))
    }
}

pub fn render(frame: &mut Frame<'_>, orchestrator: &dyn ShellOrchestrator) -> Vec<RowHit> {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let [members_area, channel_with_input_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(content_area);

    let [channel_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(channel_with_input_area);

    let state = orchestrator.state();
    let hits = render_members_panel(frame, members_area, orchestrator);
    render_channel_panel(frame, channel_area, orchestrator);
    render_message_input(frame, input_area, state.message_input(), state.active_pane());

    frame.render_widget(
        Paragraph::new(status_line(state)).style(styles::status_line_style()),
        status_area,
    );

    hits
}

fn panel_border_style(state: &ShellState, pane: ActivePane) -> Style {
    if state.active_pane() == pane {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    }
}

fn render_members_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    orchestrator: &dyn ShellOrchestrator,
) -> Vec<RowHit> {
    let state = orchestrator.state();
    let members = state.members();
    let block = Block::default()
        .title(members_title(orchestrator))
        .borders(Borders::ALL)
        .border_style(panel_border_style(state, ActivePane::Members));

    let placeholder = match members.ui_state() {
        MemberListUiState::Loading => Some("Loading members..."),
        MemberListUiState::Empty => Some("Nobody here yet."),
        MemberListUiState::Ready => None,
    };
    if let Some(message) = placeholder {
        frame.render_widget(Paragraph::new(message).block(block), area);
        return Vec::new();
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = usize::from(inner.height);
    if visible == 0 {
        return Vec::new();
    }
    let offset = members
        .selected_index()
        .map_or(0, |selected| (selected + 1).saturating_sub(visible));

    let display = orchestrator.display();
    let sources = orchestrator.identity();
    let mut hits = Vec::with_capacity(visible);

    for (row, (index, entry)) in members
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .enumerate()
    {
        let short = UserShort {
            size: Some(display.icon_size),
            prefix_at: display.prefix_at,
            masquerade: entry.masquerade.as_ref(),
            show_server_identity: display.show_server_identity,
            channel: orchestrator.channel(),
            ..UserShort::new(orchestrator.user(&entry.user_id))
        };
        let rendered = short.render(sources);

        let row_area = Rect {
            y: inner.y + u16::try_from(row).unwrap_or(u16::MAX),
            height: 1,
            ..inner
        };
        let row_style = if members.selected_index() == Some(index) {
            styles::selected_row_style()
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(rendered.line.clone()).style(row_style),
            row_area,
        );

        hits.push(RowHit {
            index,
            area: row_area,
            line: rendered,
        });
    }

    hits
}

fn members_title(orchestrator: &dyn ShellOrchestrator) -> String {
    let sources = orchestrator.identity();
    let server = sources
        .navigation
        .current_server()
        .and_then(|server| sources.store.server(server))
        .map_or("Members", |server| server.name.as_str());

    format!("{server} ({})", orchestrator.state().members().entries().len())
}

fn render_channel_panel(frame: &mut Frame<'_>, area: Rect, orchestrator: &dyn ShellOrchestrator) {
    let title = orchestrator
        .channel()
        .map_or_else(|| "Channel".to_owned(), |channel| format!("#{channel}"));

    let lines: Vec<Line<'static>> = match orchestrator.state().last_sent() {
        Some(text) => vec![
            Line::styled("Last sent", styles::input_placeholder_style()),
            Line::raw(text.to_owned()),
        ],
        None => vec![Line::styled(
            "Nothing sent yet.",
            styles::input_placeholder_style(),
        )],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(panel_border_style(
                        orchestrator.state(),
                        ActivePane::MessageInput,
                    )),
            ),
        area,
    );
}

fn status_line(state: &ShellState) -> String {
    if state.has_overlay() {
        return "Enter: confirm | Esc: close | click outside to dismiss".to_owned();
    }

    match state.active_pane() {
        ActivePane::Members => {
            "j/k: navigate | Enter: profile | m: mention | c: menu | i: compose | q: quit"
                .to_owned()
        }
        ActivePane::MessageInput => "Enter: send | Esc: back to members".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        domain::navigation::{Screen, ScreenStack},
        domain::user::UserId,
        test_support::shell_orchestrator,
    };

    fn draw(orchestrator: &dyn ShellOrchestrator) -> (Terminal<TestBackend>, Vec<RowHit>) {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");
        let mut hits = Vec::new();
        terminal
            .draw(|frame| hits = render(frame, orchestrator))
            .expect("draw");
        (terminal, hits)
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn members_panel_lists_rows_with_server_title() {
        let orchestrator = shell_orchestrator();

        let (terminal, hits) = draw(&orchestrator);

        assert!(row_text(&terminal, 0).contains("Lounge (3)"));
        assert!(row_text(&terminal, 1).contains("(H) helper  BOT "));
        assert!(row_text(&terminal, 2).contains("(A) Ali (alice)"));
        assert!(row_text(&terminal, 3).contains("(B) bob"));
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[1].area.y, 2);
    }

    #[test]
    fn row_hits_cover_icon_and_name_only() {
        let orchestrator = shell_orchestrator();
        let (_, hits) = draw(&orchestrator);
        let bob = &hits[2];

        assert!(bob.contains(bob.area.x + 20, bob.area.y));
        assert!(bob.hits_user(bob.area.x));
        assert!(bob.hits_user(bob.area.x + 4));
        assert!(!bob.hits_user(bob.area.x + 3));
        assert!(!bob.hits_user(bob.area.x + 20));
    }

    #[test]
    fn status_line_follows_focus_and_overlays() {
        let mut state = ShellState::default();
        assert!(status_line(&state).contains("m: mention"));

        state.set_active_pane(ActivePane::MessageInput);
        assert!(status_line(&state).contains("Enter: send"));

        state.screens_mut().open_screen(Screen::Profile {
            user_id: UserId::new("U1"),
        });
        assert!(status_line(&state).contains("Esc: close"));
    }

    #[test]
    fn selection_scrolls_long_lists() {
        let mut orchestrator = shell_orchestrator();
        let mut terminal = Terminal::new(TestBackend::new(80, 5)).expect("terminal");
        orchestrator.state_mut().members_mut().select(2);

        let mut hits = Vec::new();
        terminal
            .draw(|frame| hits = render(frame, &orchestrator))
            .expect("draw");

        assert_eq!(hits.iter().map(|hit| hit.index).collect::<Vec<_>>(), vec![1, 2]);
    }
}
