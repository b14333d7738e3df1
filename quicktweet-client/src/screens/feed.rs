use futures::join;
use tracing::debug;

use quicktweet_common::{Post, User};

use crate::client::{create_post, fetch_posts, get_all_users, get_friends};
use crate::config::ClientConfig;
use crate::cycle::RefreshTrigger;
use crate::error::Result;
use crate::filter::{FeedSnapshot, PostQuery};
use crate::notice::Notices;
use crate::pagination::{Page, Pager};
use crate::recommend::recommend;
use crate::session::Session;

#[derive(Debug)]
pub struct FeedScreen {
    trigger: RefreshTrigger,
    pager: Pager,
    recommend_limit: usize,
    feed: FeedSnapshot,
    recommendations: Vec<User>,
    notices: Notices,
}

impl FeedScreen {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            trigger: RefreshTrigger::new(),
            pager: Pager::new(config.page_size),
            recommend_limit: config.recommend_limit,
            feed: FeedSnapshot::default(),
            recommendations: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    /// Run one fetch cycle. Returns false when a newer cycle superseded this one.
    pub async fn refresh(&mut self, session: &Session) -> bool {
        let cycle = self.trigger.begin();
        let viewer = session.username();
        let (posts, users, friends) = join!(
            fetch_posts(session, viewer),
            get_all_users(session),
            get_friends(session, viewer)
        );

        let mut notices = Notices::default();
        let posts = notices.or_default("posts", posts);
        let users = notices.or_default("users", users);
        let friends = notices.or_default("friends", friends);

        let Some((posts, recommendations)) = cycle.finish((posts, recommend(&users, &friends, viewer, self.recommend_limit))) else {
            return false;
        };
        debug!(posts = posts.len(), "feed loaded");
        let query = self.feed.query().clone();
        self.feed = FeedSnapshot::new(posts);
        self.feed.apply(query);
        self.pager.go_to(self.pager.current(), self.feed.visible().len());
        self.recommendations = recommendations;
        for notice in notices.iter() {
            self.notices.push(notice.message.clone());
        }
        true
    }

    pub async fn publish(&mut self, session: &Session, content: &str) -> Result<Post> {
        let post = create_post(session, content).await?;
        self.trigger.bump();
        self.refresh(session).await;
        Ok(post)
    }

    pub fn filter(&mut self, query: PostQuery) -> &[Post] {
        let count = self.feed.apply(query).len();
        self.pager.first(count);
        self.feed.visible()
    }

    pub fn query(&self) -> &PostQuery {
        self.feed.query()
    }

    pub fn posts(&self) -> &[Post] {
        self.feed.visible()
    }

    pub fn page(&self) -> Page<'_, Post> {
        self.pager.page(self.feed.visible())
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.pager.go_to(page, self.feed.visible().len())
    }

    pub fn next(&mut self) -> usize {
        self.pager.next(self.feed.visible().len())
    }

    pub fn prev(&mut self) -> usize {
        self.pager.prev(self.feed.visible().len())
    }

    pub fn first(&mut self) -> usize {
        self.pager.first(self.feed.visible().len())
    }

    pub fn last(&mut self) -> usize {
        self.pager.last(self.feed.visible().len())
    }

    pub fn recommendations(&self) -> &[User] {
        &self.recommendations
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }
}
