use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info};

use quicktweet_common::payloads::AccountCredentials;
use quicktweet_common::User;

use crate::client;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Everything a request needs to act on behalf of the logged-in user.
///
/// Created by [`Session::login`], ended by [`Session::logout`]. Nothing reads
/// the token from anywhere else.
#[derive(Clone, Debug)]
pub struct Session {
    http: Client,
    config: ClientConfig,
    token: String,
    viewer: User,
}

impl Session {
    pub async fn login(config: ClientConfig, credentials: &AccountCredentials) -> Result<Self> {
        let http = config.http_client()?;
        let response = http
            .post(config.api_url.clone() + "/login")
            .json(credentials)
            .send()
            .await?;
        match response.status() {
            StatusCode::FORBIDDEN => return Err(ClientError::PendingApproval(response.text().await?)),
            StatusCode::UNAUTHORIZED => return Err(ClientError::Unauthorized),
            status if !status.is_success() => {
                return Err(ClientError::Status {
                    code: status,
                    body: response.text().await?,
                })
            }
            _ => {}
        }
        let token = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(ClientError::MissingToken)?
            .to_string();
        let mut session = Self {
            http,
            config,
            token,
            viewer: User::named(credentials.username.clone()),
        };
        session.refresh_viewer().await?;
        info!(username = %credentials.username, "logged in");
        Ok(session)
    }

    /// Re-read the viewer's own record, e.g. after a profile edit.
    pub async fn refresh_viewer(&mut self) -> Result<&User> {
        let username = self.username().to_string();
        let mut viewer = client::get_user(self, &username).await?;
        viewer.username.get_or_insert(username);
        self.viewer = viewer;
        Ok(&self.viewer)
    }

    pub fn logout(self) {
        info!(username = %self.username(), "logged out");
    }

    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    pub fn username(&self) -> &str {
        self.viewer.username().unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.viewer.is_admin()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn url(&self, path: &str) -> String {
        self.config.api_url.clone() + path
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        debug!("GET {path}");
        self.http.get(self.url(path)).header(AUTHORIZATION, &self.token)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        debug!("POST {path}");
        self.http.post(self.url(path)).header(AUTHORIZATION, &self.token)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        debug!("PUT {path}");
        self.http.put(self.url(path)).header(AUTHORIZATION, &self.token)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        debug!("DELETE {path}");
        self.http.delete(self.url(path)).header(AUTHORIZATION, &self.token)
    }
}

/// The backend reads some bodies as a bare string while still expecting a
/// JSON content type.
pub(crate) fn raw_json(builder: RequestBuilder, body: impl Into<String>) -> RequestBuilder {
    builder.header(CONTENT_TYPE, "application/json").body(body.into())
}
