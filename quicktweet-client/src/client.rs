//! Thin wrappers over the QuickTweet REST endpoints.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use quicktweet_common::payloads::{NewAccount, NewPost, PasswordReset, ProfileUpdate};
use quicktweet_common::{Post, Status, User};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::{raw_json, Session};

async fn checked(response: Response, what: &str) -> Result<Response> {
    let code = response.status();
    if code.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(match code {
        StatusCode::NOT_FOUND => ClientError::NotFound(what.to_string()),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN if body.trim().is_empty() => ClientError::Unauthorized,
        code => ClientError::Status { code, body },
    })
}

async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let text = checked(response, what).await?.text().await?;
    Ok(serde_json::from_str(&text)?)
}

async fn text(response: Response, what: &str) -> Result<String> {
    Ok(checked(response, what).await?.text().await?)
}

pub async fn register(config: &ClientConfig, account: &NewAccount) -> Result<String> {
    let response = config
        .http_client()?
        .post(config.api_url.clone() + "/users")
        .json(account)
        .send()
        .await?;
    text(response, "account").await
}

pub async fn security_question(config: &ClientConfig, username: &str) -> Result<String> {
    let response = config
        .http_client()?
        .get(config.api_url.clone() + "/users/forgotPassword/" + username)
        .send()
        .await?;
    text(response, username).await
}

pub async fn reset_password(config: &ClientConfig, username: &str, reset: &PasswordReset) -> Result<String> {
    let response = config
        .http_client()?
        .post(config.api_url.clone() + "/users/forgotPassword/" + username)
        .json(reset)
        .send()
        .await?;
    text(response, username).await
}

pub async fn fetch_posts(session: &Session, username: &str) -> Result<Vec<Post>> {
    json(session.get(&format!("/posts/{username}")).send().await?, "posts").await
}

pub async fn create_post(session: &Session, content: &str) -> Result<Post> {
    let response = session
        .post(&format!("/posts/{}", session.username()))
        .json(&NewPost { content: content.to_string() })
        .send()
        .await?;
    json(response, "post").await
}

pub async fn get_all_users(session: &Session) -> Result<Vec<User>> {
    json(session.get("/users").send().await?, "users").await
}

/// A missing user comes back either as a 404 or as an empty body.
pub async fn get_user(session: &Session, username: &str) -> Result<User> {
    let response = session.get(&format!("/users/username/{username}")).send().await?;
    let body = text(response, username).await?;
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Err(ClientError::NotFound(username.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

pub async fn get_friends(session: &Session, username: &str) -> Result<Vec<User>> {
    json(session.get(&format!("/users/friends/{username}")).send().await?, "friends").await
}

pub async fn get_friend_requests(session: &Session, username: &str) -> Result<Vec<User>> {
    let response = session
        .get(&format!("/users/friends/requests/{username}"))
        .send()
        .await?;
    json(response, "friend requests").await
}

pub async fn search_users(session: &Session, query: &str) -> Result<Vec<User>> {
    let response = session.get("/users/search").query(&[("query", query)]).send().await?;
    json(response, "search results").await
}

pub async fn users_with_interest(session: &Session, interest: &str) -> Result<Vec<User>> {
    let response = session.post("/users/interests").json(&[interest]).send().await?;
    json(response, "group members").await
}

pub async fn update_profile(session: &Session, update: &ProfileUpdate) -> Result<User> {
    let response = session
        .put(&format!("/users/{}", update.username))
        .json(update)
        .send()
        .await?;
    json(response, "profile").await
}

pub async fn update_status(session: &Session, status: Status) -> Result<String> {
    let request = session.put(&format!("/users/status/{}", session.username()));
    text(raw_json(request, status.as_str()).send().await?, "status").await
}

/// Ask `friend` to become the viewer's friend.
pub async fn send_friend_request(session: &Session, friend: &str) -> Result<String> {
    let request = session.put(&format!("/users/friends/requests/{}", session.username()));
    text(raw_json(request, friend).send().await?, friend).await
}

pub async fn accept_friend_request(session: &Session, friend: &str) -> Result<String> {
    let request = session.put(&format!("/users/friends/{}", session.username()));
    text(raw_json(request, friend).send().await?, friend).await
}

pub async fn remove_friend(session: &Session, friend: &str) -> Result<String> {
    let request = session.post(&format!("/users/friends/{}", session.username()));
    text(raw_json(request, friend).send().await?, friend).await
}

pub async fn pending_requests(session: &Session) -> Result<Vec<User>> {
    let response = session
        .get(&format!("/admin/requests/{}", session.username()))
        .send()
        .await?;
    json(response, "pending requests").await
}

pub async fn accept_account_request(session: &Session, username: &str) -> Result<String> {
    let request = session.put(&format!("/admin/requests/{username}"));
    text(raw_json(request, "{}").send().await?, username).await
}

pub async fn reject_account_request(session: &Session, username: &str) -> Result<String> {
    text(session.delete(&format!("/admin/requests/{username}")).send().await?, username).await
}

/// Toggle a user's role between user and admin.
pub async fn change_role(session: &Session, user_id: i64) -> Result<String> {
    let request = session.put(&format!("/admin/users/{user_id}"));
    text(raw_json(request, session.username()).send().await?, "user").await
}

pub async fn delete_account(session: &Session, user_id: i64) -> Result<String> {
    text(session.delete(&format!("/users/{user_id}")).send().await?, "user").await
}
