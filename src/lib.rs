pub mod payloads;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    #[serde(other)]
    Unknown,
}

#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Available,
    Busy,
    #[serde(rename = "Last seen recently")]
    LastSeenRecently,
    Away,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "Available",
            Status::Busy => "Busy",
            Status::LastSeenRecently => "Last seen recently",
            Status::Away => "Away",
            Status::Unknown => "Unknown",
        }
    }
}

/// A user record as the backend returns it.
///
/// Every field is optional on the wire: nested users inside `friends` and
/// `friendRequests` are often partial, and the backend omits ignored fields.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
    pub photo: Option<String>,
    pub status: Option<Status>,
    pub interests: Option<Vec<String>>,
    #[serde(deserialize_with = "null_as_empty")]
    pub friends: Vec<User>,
    #[serde(deserialize_with = "null_as_empty")]
    pub friend_requests: Vec<User>,
    pub pending_request: bool,
}

/// Nested user collections may be missing or `null`; both read as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<User>, D::Error> {
    Ok(Option::<Vec<User>>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
    /// Identity comparison by username. A user without a username matches nothing.
    pub fn is(&self, username: &str) -> bool {
        self.username() == Some(username)
    }
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests
            .as_ref()
            .map_or(false, |interests| interests.iter().any(|i| i == interest))
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: i64,
    pub content: String,
    /// Milliseconds since the epoch.
    #[serde(rename = "createDate", alias = "createdDate")]
    pub created_date: Option<i64>,
    pub user: User,
}

impl Post {
    pub fn author(&self) -> &User {
        &self.user
    }
}
