use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not authorized")]
    Unauthorized,

    #[error("Account request is pending: {0}")]
    PendingApproval(String),

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("Server answered {code}: {body}")]
    Status { code: StatusCode, body: String },

    #[error("Login response carried no token")]
    MissingToken,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
