use serde::{Deserialize, Serialize};

use super::Targets;

/// One entry of a batch user registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            nickname: None,
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }
}

#[derive(Serialize)]
pub(crate) struct PasswordChange<'a> {
    pub oldpassword: &'a str,
    pub newpassword: &'a str,
}

#[derive(Serialize)]
pub(crate) struct NicknameChange<'a> {
    pub nickname: &'a str,
}

#[derive(Serialize)]
pub(crate) struct Usernames {
    pub usernames: Targets,
}

#[derive(Serialize)]
pub(crate) struct OwnerChange<'a> {
    pub newowner: &'a str,
}

/// Parameters for creating a chat group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGroup {
    #[serde(rename = "groupname")]
    pub group_name: String,
    pub desc: String,
    /// Whether the group is listed publicly.
    pub public: bool,
    #[serde(rename = "maxusers")]
    pub max_users: u32,
    /// Whether joining a public group requires the owner's approval.
    pub approval: bool,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

/// A partial update to a chat group; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(rename = "groupname", skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "maxusers", skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
}

/// Parameters for creating a chatroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChatRoom {
    pub name: String,
    pub description: String,
    #[serde(rename = "maxusers", skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl NewChatRoom {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            max_users: None,
            owner: owner.into(),
            members: Vec::new(),
        }
    }

    pub fn with_max_users(mut self, max_users: u32) -> Self {
        self.max_users = Some(max_users);
        self
    }

    pub fn with_members(mut self, members: impl Into<Targets>) -> Self {
        self.members = members.into().0;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "maxusers", skip_serializing_if = "Option::is_none")]
    pub max_users: Option<u32>,
}
