//! Display name and colour resolution for a user in the current server.

use serde::Deserialize;

use super::{
    locale::{self, Localizer},
    navigation::NavigationContext,
    store::{ClientStore, StoreKey},
    user::{MemberKey, Masquerade, ServerMember, User, UserId},
};

/// How much of a member's per-server identity to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerIdentity {
    #[default]
    Off,
    /// Nickname replaces the username.
    Nickname,
    /// `nickname (username)`.
    Both,
}

impl ServerIdentity {
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Everything identity rendering reads from the outside world.
#[derive(Clone, Copy)]
pub struct IdentitySources<'a> {
    pub store: &'a dyn ClientStore,
    pub navigation: &'a dyn NavigationContext,
    pub locale: &'a dyn Localizer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName {
    pub text: String,
    /// Raw role colour, if any role provided one.
    pub colour: Option<String>,
    pub is_bot: bool,
}

pub fn resolve_display_name(
    user: Option<&User>,
    masquerade: Option<&Masquerade>,
    identity: ServerIdentity,
    sources: IdentitySources<'_>,
) -> DisplayName {
    let mut username = user.map(|user| user.username.clone());
    let mut colour = None;

    if let Some(member) = user.and_then(|user| lookup_member(user, identity, sources)) {
        if let Some(nickname) = member.nickname.as_deref().filter(|nick| !nick.is_empty()) {
            username = Some(match (identity, username.as_deref()) {
                (ServerIdentity::Both, Some(name)) => format!("{nickname} ({name})"),
                _ => nickname.to_owned(),
            });
        }

        colour = role_colour(member, sources.store);
    }

    let text = masquerade
        .and_then(|masquerade| masquerade.name.clone())
        .or(username)
        .unwrap_or_else(|| sources.locale.text(locale::UNKNOWN_USER));

    DisplayName {
        text,
        colour,
        is_bot: user.is_some_and(|user| user.bot),
    }
}

/// Store entries whose changes affect the resolved name of `user_id`. The
/// user itself may not be loaded yet.
pub fn watch_keys(
    user_id: &UserId,
    identity: ServerIdentity,
    navigation: &dyn NavigationContext,
) -> Vec<StoreKey> {
    let mut keys = vec![StoreKey::User(user_id.clone())];
    if let Some(server) = navigation.current_server().filter(|_| identity.is_enabled()) {
        keys.push(StoreKey::Member(MemberKey::new(server.clone(), user_id.clone())));
        keys.push(StoreKey::ServerRoles(server.clone()));
    }
    keys
}

fn lookup_member<'a>(
    user: &User,
    identity: ServerIdentity,
    sources: IdentitySources<'a>,
) -> Option<&'a ServerMember> {
    if !identity.is_enabled() {
        return None;
    }

    let server = sources.navigation.current_server()?;
    sources
        .store
        .member(&MemberKey::new(server.clone(), user.id.clone()))
}

/// Scans every role in assignment order; each non-empty colour replaces the
/// previous one, so the last coloured role wins.
fn role_colour(member: &ServerMember, store: &dyn ClientStore) -> Option<String> {
    if member.roles.is_empty() {
        return None;
    }

    let server = store.server(&member.key.server)?;
    let mut colour = None;
    for role in &member.roles {
        if let Some(c) = server
            .role(role)
            .and_then(|role| role.colour.as_deref())
            .filter(|c| !c.is_empty())
        {
            colour = Some(c.to_owned());
        }
    }
    colour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{member_with_roles, sample_store, user, TestWorld};

    #[test]
    fn missing_user_renders_unknown_text_without_colour_or_badge() {
        let world = TestWorld::new(sample_store(), Some("S1"));

        for identity in [ServerIdentity::Off, ServerIdentity::Nickname, ServerIdentity::Both] {
            let name = resolve_display_name(None, None, identity, world.sources());

            assert_eq!(name.text, "Unknown User");
            assert_eq!(name.colour, None);
            assert!(!name.is_bot);
        }
    }

    #[test]
    fn identity_off_ignores_nickname_and_roles() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);

        let name = resolve_display_name(Some(&alice), None, ServerIdentity::Off, world.sources());

        assert_eq!(name.text, "alice");
        assert_eq!(name.colour, None);
    }

    #[test]
    fn nickname_mode_replaces_username() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);

        let name =
            resolve_display_name(Some(&alice), None, ServerIdentity::Nickname, world.sources());

        assert_eq!(name.text, "Ali");
    }

    #[test]
    fn both_mode_joins_nickname_and_username() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);

        let name = resolve_display_name(Some(&alice), None, ServerIdentity::Both, world.sources());

        assert_eq!(name.text, "Ali (alice)");
    }

    #[test]
    fn both_mode_without_nickname_keeps_username() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let bob = user("U2", "bob", false);

        let name = resolve_display_name(Some(&bob), None, ServerIdentity::Both, world.sources());

        assert_eq!(name.text, "bob");
    }

    #[test]
    fn empty_nickname_is_ignored() {
        let mut store = sample_store();
        store.insert_member(member_with_roles("S1", "U2", Some(""), &[]));
        let world = TestWorld::new(store, Some("S1"));
        let bob = user("U2", "bob", false);

        let name = resolve_display_name(Some(&bob), None, ServerIdentity::Both, world.sources());

        assert_eq!(name.text, "bob");
    }

    #[test]
    fn masquerade_name_beats_nickname_and_username() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);
        let masquerade = Masquerade {
            name: Some("Bridge".to_owned()),
            avatar: None,
        };

        for identity in [ServerIdentity::Off, ServerIdentity::Nickname, ServerIdentity::Both] {
            let name =
                resolve_display_name(Some(&alice), Some(&masquerade), identity, world.sources());

            assert_eq!(name.text, "Bridge");
        }
    }

    #[test]
    fn masquerade_without_name_falls_through() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);
        let masquerade = Masquerade::default();

        let name = resolve_display_name(
            Some(&alice),
            Some(&masquerade),
            ServerIdentity::Nickname,
            world.sources(),
        );

        assert_eq!(name.text, "Ali");
    }

    #[test]
    fn last_coloured_role_wins() {
        let mut store = sample_store();
        store.insert_member(member_with_roles(
            "S1",
            "U2",
            None,
            &["red", "uncoloured", "blue", "empty"],
        ));
        let world = TestWorld::new(store, Some("S1"));
        let bob = user("U2", "bob", false);

        let name =
            resolve_display_name(Some(&bob), None, ServerIdentity::Nickname, world.sources());

        assert_eq!(name.colour.as_deref(), Some("#0000ff"));
    }

    #[test]
    fn unknown_roles_are_skipped() {
        let mut store = sample_store();
        store.insert_member(member_with_roles("S1", "U2", None, &["red", "ghost"]));
        let world = TestWorld::new(store, Some("S1"));
        let bob = user("U2", "bob", false);

        let name =
            resolve_display_name(Some(&bob), None, ServerIdentity::Nickname, world.sources());

        assert_eq!(name.colour.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn no_current_server_means_no_member_lookup() {
        let world = TestWorld::new(sample_store(), None);
        let alice = user("U1", "alice", false);

        let name = resolve_display_name(Some(&alice), None, ServerIdentity::Both, world.sources());

        assert_eq!(name.text, "alice");
        assert_eq!(name.colour, None);
    }

    #[test]
    fn bot_flag_is_reported() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let bot = user("B1", "helper", true);

        let name = resolve_display_name(Some(&bot), None, ServerIdentity::Off, world.sources());

        assert!(name.is_bot);
    }

    #[test]
    fn watch_keys_cover_member_and_roles_only_when_identity_enabled() {
        let world = TestWorld::new(sample_store(), Some("S1"));
        let alice = user("U1", "alice", false);

        assert_eq!(
            watch_keys(&alice.id, ServerIdentity::Off, &world.navigation),
            vec![StoreKey::User(alice.id.clone())]
        );
        assert_eq!(
            watch_keys(&alice.id, ServerIdentity::Both, &world.navigation).len(),
            3
        );

        let lobby = TestWorld::new(sample_store(), None);
        assert_eq!(
            watch_keys(&alice.id, ServerIdentity::Both, &lobby.navigation).len(),
            1
        );
    }
}
