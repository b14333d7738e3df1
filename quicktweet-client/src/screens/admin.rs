use futures::join;
use tracing::{debug, info};

use quicktweet_common::User;

use crate::client::{accept_account_request, change_role, delete_account, get_all_users, pending_requests, reject_account_request};
use crate::config::ClientConfig;
use crate::cycle::RefreshTrigger;
use crate::error::Result;
use crate::notice::Notices;
use crate::pagination::{Page, Pager};
use crate::session::Session;

#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub enum AdminView {
    #[default]
    PendingRequests,
    Users,
}

/// Moderation screen: the user list and pending account requests share one pager.
#[derive(Debug)]
pub struct AdminDashboard {
    trigger: RefreshTrigger,
    pager: Pager,
    view: AdminView,
    users: Vec<User>,
    pending: Vec<User>,
    notices: Notices,
}

impl AdminDashboard {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            trigger: RefreshTrigger::new(),
            pager: Pager::new(config.page_size),
            view: AdminView::default(),
            users: Vec::new(),
            pending: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    pub async fn refresh(&mut self, session: &Session) -> bool {
        let cycle = self.trigger.begin();
        let (users, pending) = join!(get_all_users(session), pending_requests(session));

        let mut notices = Notices::default();
        let mut users = notices.or_default("users", users);
        let pending = notices.or_default("pending requests", pending);
        users.retain(|user| !user.is(session.username()));

        let Some((users, pending, notices)) = cycle.finish((users, pending, notices)) else {
            return false;
        };
        debug!(users = users.len(), pending = pending.len(), "dashboard loaded");
        self.users = users;
        self.pending = pending;
        self.pager.go_to(self.pager.current(), self.current_items().len());
        for notice in notices.iter() {
            self.notices.push(notice.message.clone());
        }
        true
    }

    pub fn view(&self) -> AdminView {
        self.view
    }

    pub fn set_view(&mut self, view: AdminView) {
        self.view = view;
        self.pager.go_to(self.pager.current(), self.current_items().len());
    }

    pub fn toggle_view(&mut self) -> AdminView {
        self.set_view(match self.view {
            AdminView::PendingRequests => AdminView::Users,
            AdminView::Users => AdminView::PendingRequests,
        });
        self.view
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn pending(&self) -> &[User] {
        &self.pending
    }

    pub fn current_items(&self) -> &[User] {
        match self.view {
            AdminView::PendingRequests => &self.pending,
            AdminView::Users => &self.users,
        }
    }

    pub fn page(&self) -> Page<'_, User> {
        self.pager.page(self.current_items())
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        let count = self.current_items().len();
        self.pager.go_to(page, count)
    }

    pub fn next(&mut self) -> usize {
        let count = self.current_items().len();
        self.pager.next(count)
    }

    pub fn prev(&mut self) -> usize {
        let count = self.current_items().len();
        self.pager.prev(count)
    }

    pub fn first(&mut self) -> usize {
        let count = self.current_items().len();
        self.pager.first(count)
    }

    pub fn last(&mut self) -> usize {
        let count = self.current_items().len();
        self.pager.last(count)
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    async fn after_mutation(&mut self, session: &Session, outcome: String) {
        info!("{outcome}");
        self.trigger.bump();
        self.refresh(session).await;
    }

    pub async fn accept(&mut self, session: &Session, username: &str) -> Result<()> {
        let outcome = accept_account_request(session, username).await?;
        self.after_mutation(session, outcome).await;
        Ok(())
    }

    pub async fn reject(&mut self, session: &Session, username: &str) -> Result<()> {
        let outcome = reject_account_request(session, username).await?;
        self.after_mutation(session, outcome).await;
        Ok(())
    }

    pub async fn change_role(&mut self, session: &Session, user_id: i64) -> Result<()> {
        let outcome = change_role(session, user_id).await?;
        self.after_mutation(session, outcome).await;
        Ok(())
    }

    pub async fn delete(&mut self, session: &Session, user_id: i64) -> Result<()> {
        let outcome = delete_account(session, user_id).await?;
        self.after_mutation(session, outcome).await;
        Ok(())
    }
}
