use std::collections::HashMap;

use ratatui::text::Text;

use crate::{
    domain::{
        display::{IdentitySources, ServerIdentity},
        locale::Catalog,
        navigation::Navigation,
        store::MemoryStore,
        user::{ChannelId, MemberKey, Role, RoleId, Server, ServerId, ServerMember, User, UserId},
    },
    infra::{config::DisplayConfig, outbox::TracingOutbox},
    usecases::shell::{DefaultShellOrchestrator, ShellParts},
};

pub struct TestWorld {
    pub store: MemoryStore,
    pub navigation: Navigation,
    pub locale: Catalog,
}

impl TestWorld {
    pub fn new(store: MemoryStore, server: Option<&str>) -> Self {
        Self {
            store,
            navigation: Navigation::new(server.map(ServerId::new)),
            locale: Catalog::default(),
        }
    }

    pub fn sources(&self) -> IdentitySources<'_> {
        IdentitySources {
            store: &self.store,
            navigation: &self.navigation,
            locale: &self.locale,
        }
    }
}

pub fn user(id: &str, username: &str, bot: bool) -> User {
    User {
        id: UserId::new(id),
        username: username.to_owned(),
        bot,
    }
}

pub fn member_with_roles(
    server: &str,
    user: &str,
    nickname: Option<&str>,
    roles: &[&str],
) -> ServerMember {
    ServerMember {
        key: MemberKey::new(ServerId::new(server), UserId::new(user)),
        nickname: nickname.map(str::to_owned),
        roles: roles.iter().map(|role| RoleId::new(*role)).collect(),
    }
}

fn role(name: &str, colour: Option<&str>) -> Role {
    Role {
        name: name.to_owned(),
        colour: colour.map(str::to_owned),
    }
}

/// Server `S1` with four roles, users alice (`U1`, nickname "Ali", red role),
/// bob (`U2`, plain member) and the bot helper (`B1`).
pub fn sample_store() -> MemoryStore {
    let mut store = MemoryStore::default();

    store.insert_server(Server {
        id: ServerId::new("S1"),
        name: "Lounge".to_owned(),
        roles: HashMap::from([
            (RoleId::new("red"), role("Red", Some("#ff0000"))),
            (RoleId::new("blue"), role("Blue", Some("#0000ff"))),
            (RoleId::new("uncoloured"), role("Plain", None)),
            (RoleId::new("empty"), role("Empty", Some(""))),
        ]),
    });

    store.insert_user(user("U1", "alice", false));
    store.insert_user(user("U2", "bob", false));
    store.insert_user(user("B1", "helper", true));

    store.insert_member(member_with_roles("S1", "U1", Some("Ali"), &["red"]));
    store.insert_member(member_with_roles("S1", "U2", None, &[]));
    store.insert_member(member_with_roles("S1", "B1", None, &["blue"]));

    store
}

/// Orchestrator over [`sample_store`] in server `S1`, showing nickname and
/// username, with a local outbox.
pub fn shell_orchestrator() -> DefaultShellOrchestrator<TracingOutbox> {
    DefaultShellOrchestrator::new(
        ShellParts {
            store: sample_store(),
            navigation: Navigation::new(Some(ServerId::new("S1"))),
            locale: Catalog::default(),
            display: DisplayConfig {
                show_server_identity: ServerIdentity::Both,
                ..DisplayConfig::default()
            },
            channel: Some(ChannelId::new("C1")),
            masquerades: Vec::new(),
        },
        TracingOutbox::default(),
    )
}

pub fn text_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}
