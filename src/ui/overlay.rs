//! Modal props for the profile screen and the user context menu.

use std::sync::mpsc::Sender;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use crate::{
    domain::{
        display::ServerIdentity,
        events::ShellCommand,
        locale,
        navigation::{OpenContextMenu, Screen},
        shell_state::ShellState,
        user::{MemberKey, UserId},
    },
    usecases::contracts::ShellOrchestrator,
};

use super::{
    modal::{callback, ButtonStyle, Callback, ModalAction, ModalProps},
    styles,
    user_short::UserShort,
    username::Username,
};

const SHELL_COMMAND_DROPPED: &str = "UI_SHELL_COMMAND_DROPPED";

/// What the modal is currently showing. An open context menu takes
/// precedence over the screen stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayKey {
    Profile(UserId),
    Menu(OpenContextMenu),
}

pub fn overlay_key(state: &ShellState) -> Option<OverlayKey> {
    if let Some(menu) = state.context_menu().current() {
        return Some(OverlayKey::Menu(menu.clone()));
    }

    state.screens().top().map(|screen| match screen {
        Screen::Profile { user_id } => OverlayKey::Profile(user_id.clone()),
    })
}

/// Full props, callbacks included. Build once per key so the confirmation
/// listener stays installed across frames.
pub fn build_props(
    key: &OverlayKey,
    orchestrator: &dyn ShellOrchestrator,
    commands: &Sender<ShellCommand>,
) -> ModalProps {
    match key {
        OverlayKey::Profile(user_id) => profile_props(user_id, orchestrator, commands),
        OverlayKey::Menu(menu) => menu_props(menu, orchestrator, commands),
    }
}

/// Content that depends on store state and is refreshed every frame.
pub fn body(key: &OverlayKey, orchestrator: &dyn ShellOrchestrator) -> Text<'static> {
    match key {
        OverlayKey::Profile(user_id) => profile_body(user_id, orchestrator),
        OverlayKey::Menu(menu) => menu_body(menu, orchestrator),
    }
}

fn send(commands: &Sender<ShellCommand>, batch: Vec<ShellCommand>) -> Callback {
    let tx = commands.clone();
    callback(move || {
        for command in &batch {
            if tx.send(command.clone()).is_err() {
                tracing::warn!(
                    code = SHELL_COMMAND_DROPPED,
                    command = ?command,
                    "shell command channel closed"
                );
            }
        }
    })
}

fn profile_props(
    user_id: &UserId,
    orchestrator: &dyn ShellOrchestrator,
    commands: &Sender<ShellCommand>,
) -> ModalProps {
    let text = |id: &str| orchestrator.identity().locale.text(id);
    let close = send(commands, vec![ShellCommand::CloseScreen]);

    let mut actions =
        vec![ModalAction::new(text(locale::CLOSE), close.clone()).confirmation()];
    if orchestrator.user(user_id).is_some() {
        actions.push(
            ModalAction::new(
                text(locale::MENU_MENTION),
                send(
                    commands,
                    vec![ShellCommand::CloseScreen, ShellCommand::Mention(user_id.clone())],
                ),
            )
            .style(ButtonStyle::Default),
        );
    }

    ModalProps {
        title: Some(text(locale::PROFILE_TITLE)),
        children: profile_body(user_id, orchestrator),
        actions: Some(actions),
        border: true,
        ..ModalProps::new(true, close)
    }
}

fn profile_body(user_id: &UserId, orchestrator: &dyn ShellOrchestrator) -> Text<'static> {
    let sources = orchestrator.identity();
    let user = orchestrator.user(user_id);
    let short = UserShort {
        size: Some(orchestrator.display().icon_size),
        show_server_identity: ServerIdentity::Both,
        ..UserShort::new(user)
    };

    let handle = user.map_or_else(
        || sources.locale.text(locale::UNKNOWN_USER),
        |user| format!("@{}", user.username),
    );
    let mut lines = vec![
        short.render(sources).line,
        Line::styled(handle, styles::input_placeholder_style()),
        Line::styled(format!("id {user_id}"), styles::input_placeholder_style()),
    ];

    let member = sources.navigation.current_server().and_then(|server| {
        let member = sources
            .store
            .member(&MemberKey::new(server.clone(), user_id.clone()))?;
        Some((member, sources.store.server(server)?))
    });
    if let Some((member, server)) = member {
        let mut chips = Vec::new();
        for role in member.roles.iter().filter_map(|role| server.role(role)) {
            if !chips.is_empty() {
                chips.push(Span::raw(" "));
            }
            chips.push(Span::styled(
                role.name.clone(),
                styles::username_style(Style::default(), role.colour.as_deref()),
            ));
        }
        if !chips.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(chips));
        }
    }

    Text::from(lines)
}

fn menu_props(
    menu: &OpenContextMenu,
    orchestrator: &dyn ShellOrchestrator,
    commands: &Sender<ShellCommand>,
) -> ModalProps {
    let text = |id: &str| orchestrator.identity().locale.text(id);
    let close = send(commands, vec![ShellCommand::CloseMenu]);
    let cancel = ModalAction::new(text(locale::MENU_CANCEL), close.clone())
        .style(ButtonStyle::Default);

    let actions = match &menu.payload.user {
        Some(user_id) => {
            let mut actions = vec![
                ModalAction::new(
                    text(locale::MENU_VIEW_PROFILE),
                    send(commands, vec![ShellCommand::OpenProfile(user_id.clone())]),
                )
                .confirmation(),
                ModalAction::new(
                    text(locale::MENU_MENTION),
                    send(
                        commands,
                        vec![ShellCommand::CloseMenu, ShellCommand::Mention(user_id.clone())],
                    ),
                ),
            ];
            if let Some(key) = nicknamed_member(user_id, orchestrator) {
                actions.push(
                    ModalAction::new(
                        text(locale::MENU_CLEAR_NICKNAME),
                        send(
                            commands,
                            vec![ShellCommand::CloseMenu, ShellCommand::ClearNickname(key)],
                        ),
                    )
                    .style(ButtonStyle::ContrastError),
                );
            }
            actions.push(cancel);
            actions
        }
        None => vec![cancel],
    };

    ModalProps {
        children: menu_body(menu, orchestrator),
        actions: Some(actions),
        border: true,
        ..ModalProps::new(true, close)
    }
}

fn menu_body(menu: &OpenContextMenu, orchestrator: &dyn ShellOrchestrator) -> Text<'static> {
    let user = menu
        .payload
        .user
        .as_ref()
        .and_then(|user_id| orchestrator.user(user_id));
    let header = Username::new(user)
        .show_server_identity(orchestrator.display().show_server_identity)
        .attrs(Style::new().add_modifier(Modifier::BOLD));

    let mut lines = vec![header.line(orchestrator.identity())];
    if let Some(channel) = &menu.payload.contextual_channel {
        lines.push(Line::styled(
            format!("#{channel}"),
            styles::input_placeholder_style(),
        ));
    }
    Text::from(lines)
}

/// Member key of `user_id` in the current server, if it has a nickname.
fn nicknamed_member(user_id: &UserId, orchestrator: &dyn ShellOrchestrator) -> Option<MemberKey> {
    let sources = orchestrator.identity();
    let key = MemberKey::new(sources.navigation.current_server()?.clone(), user_id.clone());
    sources
        .store
        .member(&key)?
        .nickname
        .as_deref()
        .filter(|nickname| !nickname.is_empty())
        .map(|_| key)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::{
        domain::navigation::{ContextMenu, ContextMenuPayload, ScreenStack, USER_MENU_ID},
        test_support::{shell_orchestrator, text_lines},
    };

    fn menu_for(user: Option<&str>) -> OpenContextMenu {
        OpenContextMenu {
            menu_id: USER_MENU_ID.to_owned(),
            payload: ContextMenuPayload {
                user: user.map(UserId::new),
                contextual_channel: None,
            },
        }
    }

    fn labels(props: &ModalProps) -> Vec<String> {
        props
            .actions
            .iter()
            .flatten()
            .map(|action| action.text.clone())
            .collect()
    }

    #[test]
    fn context_menu_takes_precedence_over_screens() {
        let mut orchestrator = shell_orchestrator();
        let state = orchestrator.state_mut();
        state.screens_mut().open_screen(Screen::Profile {
            user_id: UserId::new("U1"),
        });
        assert_eq!(
            overlay_key(state),
            Some(OverlayKey::Profile(UserId::new("U1")))
        );

        state
            .context_menu_mut()
            .open(USER_MENU_ID, menu_for(Some("U2")).payload);

        assert_eq!(overlay_key(state), Some(OverlayKey::Menu(menu_for(Some("U2")))));
    }

    #[test]
    fn menu_offers_clear_nickname_only_for_nicknamed_members() {
        let orchestrator = shell_orchestrator();
        let (tx, _rx) = mpsc::channel();

        let alice = build_props(&OverlayKey::Menu(menu_for(Some("U1"))), &orchestrator, &tx);
        let bob = build_props(&OverlayKey::Menu(menu_for(Some("U2"))), &orchestrator, &tx);

        assert_eq!(
            labels(&alice),
            vec!["View Profile", "Mention", "Clear Nickname", "Cancel"]
        );
        assert_eq!(labels(&bob), vec!["View Profile", "Mention", "Cancel"]);
        assert_eq!(
            alice.confirmation_action().map(|action| action.text.as_str()),
            Some("View Profile")
        );
    }

    #[test]
    fn menu_header_names_the_member_in_bold() {
        let orchestrator = shell_orchestrator();

        let body = body(&OverlayKey::Menu(menu_for(Some("U1"))), &orchestrator);

        assert_eq!(text_lines(&body)[0], "Ali (alice)");
        assert!(body.lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn menu_without_user_only_cancels() {
        let orchestrator = shell_orchestrator();
        let (tx, rx) = mpsc::channel();

        let props = build_props(&OverlayKey::Menu(menu_for(None)), &orchestrator, &tx);

        assert_eq!(labels(&props), vec!["Cancel"]);
        assert!(props.confirmation_action().is_none());
        (props.on_close)();
        assert_eq!(rx.try_recv(), Ok(ShellCommand::CloseMenu));
    }

    #[test]
    fn mention_action_closes_menu_then_mentions() {
        let orchestrator = shell_orchestrator();
        let (tx, rx) = mpsc::channel();
        let props = build_props(&OverlayKey::Menu(menu_for(Some("U2"))), &orchestrator, &tx);

        let mention = props
            .actions
            .iter()
            .flatten()
            .find(|action| action.text == "Mention")
            .expect("mention action");
        (mention.on_click)();

        let sent: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            sent,
            vec![
                ShellCommand::CloseMenu,
                ShellCommand::Mention(UserId::new("U2"))
            ]
        );
    }

    #[test]
    fn profile_shows_identity_handle_and_coloured_roles() {
        let orchestrator = shell_orchestrator();
        let (tx, _rx) = mpsc::channel();

        let props = build_props(
            &OverlayKey::Profile(UserId::new("U1")),
            &orchestrator,
            &tx,
        );
        let lines = text_lines(&props.children);

        assert_eq!(props.title.as_deref(), Some("Profile"));
        assert_eq!(lines[0], "(A) Ali (alice)");
        assert_eq!(lines[1], "@alice");
        assert_eq!(lines[2], "id U1");
        assert_eq!(lines[4], "Red");
        assert_eq!(labels(&props), vec!["Close", "Mention"]);
        assert_eq!(
            props.confirmation_action().map(|action| action.text.as_str()),
            Some("Close")
        );
    }

    #[test]
    fn profile_of_unknown_user_only_closes() {
        let orchestrator = shell_orchestrator();
        let (tx, _rx) = mpsc::channel();

        let props = build_props(
            &OverlayKey::Profile(UserId::new("nobody")),
            &orchestrator,
            &tx,
        );

        assert_eq!(text_lines(&props.children)[1], "Unknown User");
        assert_eq!(labels(&props), vec!["Close"]);
    }
}
