#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};

use quicktweet_common::payloads::{AccountCredentials, NewAccount, NewPost, PasswordReset, ProfileUpdate};
use quicktweet_common::{Post, Role, Status, User};
use quicktweet_client::cycle::RefreshTrigger;
use quicktweet_client::{ClientConfig, Session};

pub type Shared = Arc<Mutex<FakeDb>>;

pub struct Account {
    pub user: User,
    pub password: String,
    pub friends: Vec<String>,
    /// Users who asked this account for friendship.
    pub requests: Vec<String>,
    pub security_question: String,
    pub security_answer: String,
}

impl Account {
    fn new(user: User) -> Self {
        Self {
            user,
            password: "password".to_string(),
            friends: Vec::new(),
            requests: Vec::new(),
            security_question: "Name of your first pet?".to_string(),
            security_answer: "rex".to_string(),
        }
    }
}

/// What a write endpoint received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
pub struct FakeDb {
    pub accounts: BTreeMap<String, Account>,
    pub pending: Vec<User>,
    pub posts: Vec<Post>,
    pub fail_user_list: bool,
    /// Bumped while a friends list is being served, superseding the cycle that asked.
    pub bump_during_reads: Option<RefreshTrigger>,
    pub recorded: Vec<Recorded>,
}

impl FakeDb {
    pub fn with_user(mut self, username: &str, interests: &[&str]) -> Self {
        let id = self.accounts.len() as i64 + 1;
        self.accounts.insert(
            username.to_string(),
            Account::new(User {
                id: Some(id),
                username: Some(username.to_string()),
                email: Some(format!("{username}@example.com")),
                role: Some(Role::User),
                interests: Some(interests.iter().map(|i| i.to_string()).collect()),
                ..Default::default()
            }),
        );
        self
    }

    pub fn with_admin(mut self, username: &str) -> Self {
        self = self.with_user(username, &[]);
        if let Some(account) = self.accounts.get_mut(username) {
            account.user.role = Some(Role::Admin);
        }
        self
    }

    pub fn with_friends(mut self, a: &str, b: &str) -> Self {
        self.account(a).friends.push(b.to_string());
        self.account(b).friends.push(a.to_string());
        self
    }

    /// `from` asked `to` for friendship.
    pub fn with_request(mut self, from: &str, to: &str) -> Self {
        self.account(to).requests.push(from.to_string());
        self
    }

    pub fn with_pending(mut self, username: &str) -> Self {
        self.pending.push(User::named(username));
        self
    }

    pub fn with_posts(mut self, author: &str, contents: &[&str]) -> Self {
        for content in contents {
            let user = self.account(author).user.clone();
            let id = self.posts.len() as i64 + 1;
            self.posts.push(Post {
                id,
                content: content.to_string(),
                created_date: Some(1_700_000_000_000 + id),
                user,
            });
        }
        self
    }

    pub fn last_recorded(&self) -> Option<&Recorded> {
        self.recorded.last()
    }

    fn record(&mut self, method: Method, path: String, headers: &HeaderMap, body: String) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.recorded.push(Recorded {
            method,
            path,
            content_type,
            body,
        });
    }

    fn account_by_id(&mut self, id: i64) -> Option<&mut Account> {
        self.accounts.values_mut().find(|account| account.user.id == Some(id))
    }

    fn account(&mut self, username: &str) -> &mut Account {
        self.accounts.get_mut(username).expect("unknown fake account")
    }

    fn users(&self, names: &[String]) -> Vec<User> {
        names
            .iter()
            .filter_map(|name| self.accounts.get(name))
            .map(|account| account.user.clone())
            .collect()
    }
}

/// A small network seen from `malek`: friends with lyuma, asked mars, asked by zed.
pub fn network() -> FakeDb {
    FakeDb::default()
        .with_user("malek", &["Gaming", "Music"])
        .with_user("lyuma", &["Cooking"])
        .with_user("mars", &["Gaming"])
        .with_user("zed", &[])
        .with_user("ada", &["Gaming"])
        .with_admin("root")
        .with_friends("malek", "lyuma")
        .with_request("malek", "mars")
        .with_request("zed", "malek")
        .with_pending("newcomer")
        .with_posts("malek", &["gm", "rust is neat", "lunch?"])
        .with_posts("lyuma", &["cooking rust-free pasta", "hello", "bye", "again"])
}

pub struct Backend {
    pub url: String,
    pub db: Shared,
}

impl Backend {
    pub async fn start(db: FakeDb) -> Self {
        let db: Shared = Arc::new(Mutex::new(db));
        let app = Router::new()
            .route("/login", post(login))
            .route("/users", get(get_all_users).post(register))
            .route("/users/search", get(search_users))
            .route("/users/username/:username", get(get_user))
            .route("/users/:username", put(update_profile).delete(delete_user))
            .route("/users/status/:username", put(update_status))
            .route("/users/interests", post(users_with_interest))
            .route("/users/forgotPassword/:username", get(security_question).post(reset_password))
            .route("/users/friends/:username", get(get_friends).put(accept_friend).post(remove_friend))
            .route("/users/friends/requests/:username", get(get_requests).put(send_request))
            .route("/posts/:username", get(get_posts).post(create_post))
            .route("/admin/requests/:username", get(get_pending).put(accept_pending).delete(reject_pending))
            .route("/admin/users/:id", put(change_role))
            .layer(middleware::from_fn(require_token))
            .layer(Extension(db.clone()));

        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(app.into_make_service());
        let url = format!("http://{}", server.local_addr());
        tokio::spawn(server);
        Self { url, db }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url.clone())
    }

    pub async fn login(&self, username: &str) -> Session {
        let credentials = AccountCredentials {
            username: username.to_string(),
            password: "password".to_string(),
        };
        Session::login(self.config(), &credentials).await.unwrap()
    }
}

fn is_public(method: &Method, path: &str) -> bool {
    path == "/login" || (*method == Method::POST && path == "/users") || path.starts_with("/users/forgotPassword/")
}

async fn require_token<B>(request: Request<B>, next: Next<B>) -> Response {
    if is_public(request.method(), request.uri().path()) {
        return next.run(request).await;
    }
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("Bearer "));
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn login(Extension(db): Extension<Shared>, Json(credentials): Json<AccountCredentials>) -> Response {
    let db = db.lock().unwrap();
    if db.pending.iter().any(|user| user.is(&credentials.username)) {
        return (StatusCode::FORBIDDEN, "User account creation request is pending.").into_response();
    }
    match db.accounts.get(&credentials.username) {
        Some(account) if account.password == credentials.password => {
            let token = format!("Bearer token-{}", credentials.username);
            ([(header::AUTHORIZATION, token)], "").into_response()
        }
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn get_all_users(Extension(db): Extension<Shared>) -> Response {
    let db = db.lock().unwrap();
    if db.fail_user_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "user list unavailable").into_response();
    }
    Json(db.accounts.values().map(|account| account.user.clone()).collect::<Vec<_>>()).into_response()
}

/// Like the real backend, an unknown user comes back as an empty body.
async fn get_user(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Response {
    match db.lock().unwrap().accounts.get(&username) {
        Some(account) => Json(account.user.clone()).into_response(),
        None => "".into_response(),
    }
}

async fn update_profile(Extension(db): Extension<Shared>, Path(username): Path<String>, Json(update): Json<ProfileUpdate>) -> Response {
    let mut db = db.lock().unwrap();
    let Some(account) = db.accounts.get_mut(&username) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    account.user.bio = update.bio;
    account.user.photo = update.photo;
    account.user.status = update.status;
    account.user.interests = update.interests;
    Json(account.user.clone()).into_response()
}

async fn users_with_interest(Extension(db): Extension<Shared>, Json(interests): Json<Vec<String>>) -> Json<Vec<User>> {
    let db = db.lock().unwrap();
    Json(
        db.accounts
            .values()
            .filter(|account| interests.iter().any(|interest| account.user.has_interest(interest)))
            .map(|account| account.user.clone())
            .collect(),
    )
}

async fn get_friends(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Json<Vec<User>> {
    let db = db.lock().unwrap();
    if let Some(trigger) = &db.bump_during_reads {
        trigger.bump();
    }
    let friends = db.accounts.get(&username).map(|account| db.users(&account.friends)).unwrap_or_default();
    Json(friends)
}

async fn get_requests(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Json<Vec<User>> {
    let db = db.lock().unwrap();
    let requests = db.accounts.get(&username).map(|account| db.users(&account.requests)).unwrap_or_default();
    Json(requests)
}

async fn send_request(Extension(db): Extension<Shared>, Path(username): Path<String>, friend: String) -> Response {
    let mut db = db.lock().unwrap();
    match db.accounts.get_mut(&friend) {
        Some(account) => {
            account.requests.push(username);
            (StatusCode::ACCEPTED, "Friend request sent").into_response()
        }
        None => (StatusCode::FORBIDDEN, "User does not exist").into_response(),
    }
}

async fn accept_friend(Extension(db): Extension<Shared>, Path(username): Path<String>, friend: String) -> Response {
    let mut db = db.lock().unwrap();
    if !db.accounts.contains_key(&friend) {
        return (StatusCode::FORBIDDEN, "User does not exist").into_response();
    }
    db.account(&username).requests.retain(|r| *r != friend);
    db.account(&username).friends.push(friend.clone());
    db.account(&friend).friends.push(username);
    (StatusCode::ACCEPTED, "Friend added").into_response()
}

async fn remove_friend(Extension(db): Extension<Shared>, Path(username): Path<String>, friend: String) -> Response {
    let mut db = db.lock().unwrap();
    db.account(&username).friends.retain(|f| *f != friend);
    db.account(&friend).friends.retain(|f| *f != username);
    (StatusCode::ACCEPTED, "Friend removed").into_response()
}

async fn get_posts(Extension(db): Extension<Shared>, Path(_username): Path<String>) -> Json<Vec<Post>> {
    Json(db.lock().unwrap().posts.clone())
}

async fn create_post(Extension(db): Extension<Shared>, Path(username): Path<String>, Json(new_post): Json<NewPost>) -> Json<Post> {
    let mut db = db.lock().unwrap();
    let user = db.account(&username).user.clone();
    let post = Post {
        id: db.posts.len() as i64 + 1,
        content: new_post.content,
        created_date: Some(1_800_000_000_000),
        user,
    };
    db.posts.insert(0, post.clone());
    Json(post)
}

async fn get_pending(Extension(db): Extension<Shared>, Path(_admin): Path<String>) -> Json<Vec<User>> {
    Json(db.lock().unwrap().pending.clone())
}

async fn accept_pending(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    db.pending.retain(|user| !user.is(&username));
    let mut user = User::named(username.clone());
    user.id = Some(db.accounts.len() as i64 + 100);
    db.accounts.insert(username.clone(), Account::new(user));
    format!("{username} approved").into_response()
}

async fn reject_pending(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Response {
    db.lock().unwrap().pending.retain(|user| !user.is(&username));
    format!("{username} rejected").into_response()
}

async fn register(Extension(db): Extension<Shared>, headers: HeaderMap, Json(account): Json<NewAccount>) -> Response {
    let mut db = db.lock().unwrap();
    db.record(Method::POST, "/users".to_string(), &headers, account.username.clone());
    if db.accounts.contains_key(&account.username) {
        return (StatusCode::BAD_REQUEST, "Username taken").into_response();
    }
    let mut user = User::named(account.username.clone());
    user.email = Some(account.email);
    db.pending.push(user);
    (StatusCode::CREATED, "User created").into_response()
}

async fn search_users(Extension(db): Extension<Shared>, Query(params): Query<HashMap<String, String>>) -> Json<Vec<User>> {
    let db = db.lock().unwrap();
    let query = params.get("query").cloned().unwrap_or_default().to_lowercase();
    Json(
        db.accounts
            .values()
            .filter(|account| account.user.username().map_or(false, |name| name.to_lowercase().contains(&query)))
            .map(|account| account.user.clone())
            .collect(),
    )
}

async fn security_question(Extension(db): Extension<Shared>, Path(username): Path<String>) -> Response {
    match db.lock().unwrap().accounts.get(&username) {
        Some(account) => account.security_question.clone().into_response(),
        None => (StatusCode::NOT_FOUND, "User does not exist").into_response(),
    }
}

async fn reset_password(Extension(db): Extension<Shared>, Path(username): Path<String>, headers: HeaderMap, Json(reset): Json<PasswordReset>) -> Response {
    let mut db = db.lock().unwrap();
    db.record(Method::POST, format!("/users/forgotPassword/{username}"), &headers, reset.answer.clone());
    let Some(account) = db.accounts.get_mut(&username) else {
        return (StatusCode::NOT_FOUND, "User does not exist").into_response();
    };
    if account.security_answer != reset.answer {
        return (StatusCode::FORBIDDEN, "Wrong answer").into_response();
    }
    account.password = reset.password;
    "Password updated".into_response()
}

async fn update_status(Extension(db): Extension<Shared>, Path(username): Path<String>, headers: HeaderMap, body: String) -> Response {
    let mut db = db.lock().unwrap();
    db.record(Method::PUT, format!("/users/status/{username}"), &headers, body.clone());
    let status: Status = match serde_json::from_value(serde_json::Value::String(body)) {
        Ok(status) => status,
        Err(_) => return StatusCode::BAD_REQUEST.into_response(),
    };
    db.account(&username).user.status = Some(status);
    "Status updated".into_response()
}

async fn change_role(Extension(db): Extension<Shared>, Path(id): Path<i64>, headers: HeaderMap, admin: String) -> Response {
    let mut db = db.lock().unwrap();
    db.record(Method::PUT, format!("/admin/users/{id}"), &headers, admin.clone());
    if !db.accounts.get(&admin).map_or(false, |account| account.user.is_admin()) {
        return (StatusCode::FORBIDDEN, "Not an administrator").into_response();
    }
    let Some(account) = db.account_by_id(id) else {
        return (StatusCode::FORBIDDEN, "User does not exist").into_response();
    };
    account.user.role = Some(if account.user.is_admin() { Role::User } else { Role::Admin });
    "Role changed".into_response()
}

async fn delete_user(Extension(db): Extension<Shared>, Path(id): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    let Ok(id) = id.parse::<i64>() else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let before = db.accounts.len();
    db.accounts.retain(|_, account| account.user.id != Some(id));
    if before == db.accounts.len() {
        return (StatusCode::FORBIDDEN, "User does not exist").into_response();
    }
    "User deleted".into_response()
}
