use quicktweet_common::{Post, User};

/// Three case-insensitive substring predicates, joined with AND. An empty
/// field matches everything.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct PostQuery {
    pub text: String,
    pub username: String,
    pub interest: String,
}

impl PostQuery {
    pub fn new(text: impl Into<String>, username: impl Into<String>, interest: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            username: username.into(),
            interest: interest.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.username.is_empty() && self.interest.is_empty()
    }

    pub fn matches(&self, post: &Post) -> bool {
        let text = self.text.to_lowercase();
        let username = self.username.to_lowercase();
        let interest = self.interest.to_lowercase();
        matches_post(post, &text, &username, &interest)
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

fn author_matches(author: &User, username: &str) -> bool {
    if username.is_empty() {
        return true;
    }
    author.username().map_or(false, |name| contains_ci(name, username))
}

fn interests_match(author: &User, interest: &str) -> bool {
    if interest.is_empty() {
        return true;
    }
    author
        .interests
        .as_ref()
        .map_or(false, |interests| interests.iter().any(|i| contains_ci(i, interest)))
}

fn matches_post(post: &Post, text: &str, username: &str, interest: &str) -> bool {
    contains_ci(&post.content, text) && author_matches(post.author(), username) && interests_match(post.author(), interest)
}

pub fn filter_posts(posts: &[Post], query: &PostQuery) -> Vec<Post> {
    let text = query.text.to_lowercase();
    let username = query.username.to_lowercase();
    let interest = query.interest.to_lowercase();
    posts
        .iter()
        .filter(|post| matches_post(post, &text, &username, &interest))
        .cloned()
        .collect()
}

/// The posts captured when the feed was loaded, plus the currently visible
/// subset. Filtering always starts over from the captured snapshot.
#[derive(Clone, Debug, Default)]
pub struct FeedSnapshot {
    original: Vec<Post>,
    visible: Vec<Post>,
    query: PostQuery,
}

impl FeedSnapshot {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            visible: posts.clone(),
            original: posts,
            query: PostQuery::default(),
        }
    }

    pub fn apply(&mut self, query: PostQuery) -> &[Post] {
        self.visible = filter_posts(&self.original, &query);
        self.query = query;
        &self.visible
    }

    pub fn clear(&mut self) -> &[Post] {
        self.apply(PostQuery::default())
    }

    pub fn visible(&self) -> &[Post] {
        &self.visible
    }

    pub fn original(&self) -> &[Post] {
        &self.original
    }

    pub fn query(&self) -> &PostQuery {
        &self.query
    }
}
