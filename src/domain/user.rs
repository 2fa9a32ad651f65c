use std::{collections::HashMap, fmt};

use serde::Deserialize;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(UserId);
string_id!(ServerId);
string_id!(RoleId);
string_id!(ChannelId);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

/// Display override applied on top of a user, e.g. for bridged or webhook messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Masquerade {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct MemberKey {
    pub server: ServerId,
    pub user: UserId,
}

impl MemberKey {
    pub fn new(server: ServerId, user: UserId) -> Self {
        Self { server, user }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerMember {
    #[serde(flatten)]
    pub key: MemberKey,
    pub nickname: Option<String>,
    /// Role ids in the order they were assigned.
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Role {
    pub name: String,
    pub colour: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Server {
    pub id: ServerId,
    pub name: String,
    #[serde(default)]
    pub roles: HashMap<RoleId, Role>,
}

impl Server {
    pub fn role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_raw_value() {
        let id = UserId::new("01HUSER");

        assert_eq!(id.to_string(), "01HUSER");
        assert_eq!(id.as_str(), "01HUSER");
    }

    #[test]
    fn member_deserializes_with_flattened_key() {
        let member: ServerMember = toml::from_str(
            r#"server = "S1"
user = "U1"
nickname = "Ali"
roles = ["R1", "R2"]
"#,
        )
        .expect("member must parse");

        assert_eq!(member.key, MemberKey::new(ServerId::new("S1"), UserId::new("U1")));
        assert_eq!(member.nickname.as_deref(), Some("Ali"));
        assert_eq!(member.roles, vec![RoleId::new("R1"), RoleId::new("R2")]);
    }

    #[test]
    fn user_bot_flag_defaults_to_false() {
        let user: User = toml::from_str("id = \"U1\"\nusername = \"alice\"\n").expect("user");

        assert!(!user.bot);
    }
}
