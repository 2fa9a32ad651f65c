//! Client state snapshots loaded from TOML.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    domain::{
        store::MemoryStore,
        user::{ChannelId, Masquerade, Server, ServerId, ServerMember, User, UserId},
    },
    infra::error::AppError,
};

const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo.toml");
const DEMO_ORIGIN: &str = "built-in demo";

#[derive(Debug, Deserialize, Default)]
struct FixtureFile {
    channel: Option<ChannelId>,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    servers: Vec<Server>,
    #[serde(default)]
    members: Vec<ServerMember>,
    #[serde(default)]
    masquerades: Vec<MasqueradeRow>,
}

#[derive(Debug, Deserialize)]
struct MasqueradeRow {
    user: UserId,
    #[serde(flatten)]
    masquerade: Masquerade,
}

#[derive(Debug)]
pub struct Fixture {
    pub store: MemoryStore,
    pub channel: Option<ChannelId>,
    /// Servers in file order.
    pub servers: Vec<ServerId>,
    /// Extra rows showing a user under a masquerade.
    pub masquerades: Vec<(UserId, Masquerade)>,
}

impl Fixture {
    pub fn default_server(&self) -> Option<&ServerId> {
        self.servers.first()
    }
}

pub fn load(path: Option<&Path>) -> Result<Fixture, AppError> {
    let Some(path) = path else {
        return parse(DEMO_FIXTURE, DEMO_ORIGIN);
    };

    let raw = fs::read_to_string(path).map_err(|source| AppError::FixtureRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw, &path.display().to_string())
}

pub fn parse(raw: &str, origin: &str) -> Result<Fixture, AppError> {
    let file: FixtureFile = toml::from_str(raw).map_err(|source| AppError::FixtureParse {
        origin: origin.to_owned(),
        source,
    })?;

    let servers: Vec<ServerId> = file.servers.iter().map(|server| server.id.clone()).collect();
    if let Some(member) = file
        .members
        .iter()
        .find(|member| !servers.contains(&member.key.server))
    {
        return Err(AppError::FixtureUnknownServer {
            server: member.key.server.to_string(),
        });
    }

    let mut store = MemoryStore::default();
    for user in file.users {
        store.insert_user(user);
    }
    for server in file.servers {
        store.insert_server(server);
    }
    for member in file.members {
        store.insert_member(member);
    }

    tracing::debug!(
        origin,
        servers = servers.len(),
        masquerades = file.masquerades.len(),
        "fixture loaded"
    );

    Ok(Fixture {
        store,
        channel: file.channel,
        servers,
        masquerades: file
            .masquerades
            .into_iter()
            .map(|row| (row.user, row.masquerade))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        store::ClientStore,
        user::{MemberKey, RoleId},
    };

    #[test]
    fn demo_fixture_parses() {
        let fixture = load(None).expect("demo fixture must parse");
        let lounge = ServerId::new("01HSERVERLOUNGE");

        assert_eq!(fixture.default_server(), Some(&lounge));
        assert_eq!(fixture.store.members_of(&lounge).len(), 5);
        assert!(fixture
            .store
            .server(&lounge)
            .and_then(|server| server.role(&RoleId::new("admin")))
            .is_some());
        assert_eq!(fixture.masquerades.len(), 1);
        assert_eq!(
            fixture.masquerades[0].1.name.as_deref(),
            Some("GitHub")
        );
    }

    #[test]
    fn parses_members_and_nicknames() {
        let fixture = parse(
            r#"
[[users]]
id = "U1"
username = "alice"

[[servers]]
id = "S1"
name = "Lounge"

[[members]]
server = "S1"
user = "U1"
nickname = "Ali"
"#,
            "test",
        )
        .expect("fixture must parse");

        let member = fixture
            .store
            .member(&MemberKey::new(ServerId::new("S1"), UserId::new("U1")))
            .expect("member should exist");
        assert_eq!(member.nickname.as_deref(), Some("Ali"));
        assert!(fixture.channel.is_none());
    }

    #[test]
    fn rejects_member_of_unknown_server() {
        let error = parse(
            r#"
[[members]]
server = "S404"
user = "U1"
"#,
            "test",
        )
        .expect_err("fixture must be rejected");

        assert!(matches!(error, AppError::FixtureUnknownServer { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = load(Some(Path::new("./no-such-fixture.toml"))).expect_err("must fail");

        assert!(matches!(error, AppError::FixtureRead { .. }));
    }
}
