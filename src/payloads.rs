use serde::{Deserialize, Serialize};
use crate::Status;

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct AccountCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub security_question_answer: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct NewPost {
    pub content: String,
}

/// Fields a user may edit on their own profile.
#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct ProfileUpdate {
    pub username: String,
    pub bio: Option<String>,
    pub status: Option<Status>,
    pub photo: Option<String>,
    pub interests: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct PasswordReset {
    pub password: String,
    pub answer: String,
}
