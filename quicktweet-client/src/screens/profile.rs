use futures::join;
use tracing::{debug, warn};

use quicktweet_common::payloads::ProfileUpdate;
use quicktweet_common::{Status, User};

use crate::client::{accept_friend_request, get_friend_requests, get_friends, get_user, remove_friend, send_friend_request, update_profile, update_status};
use crate::cycle::RefreshTrigger;
use crate::error::{ClientError, Result};
use crate::notice::Notices;
use crate::relationship::{ProfileRelation, RelationshipState};
use crate::session::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub user: User,
    pub friends: Vec<User>,
    pub friend_requests: Vec<User>,
    pub relation: ProfileRelation,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ProfileState {
    #[default]
    Loading,
    /// The requested username does not exist.
    NotFound(String),
    Loaded(Profile),
}

#[derive(Debug)]
pub struct ProfileScreen {
    target: String,
    trigger: RefreshTrigger,
    state: ProfileState,
    notices: Notices,
}

impl ProfileScreen {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            trigger: RefreshTrigger::new(),
            state: ProfileState::Loading,
            notices: Notices::default(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn trigger(&self) -> RefreshTrigger {
        self.trigger.clone()
    }

    pub fn state(&self) -> &ProfileState {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.state {
            ProfileState::Loaded(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn relation(&self) -> Option<ProfileRelation> {
        self.profile().map(|profile| profile.relation)
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// The relationship is only derived once all four reads have resolved.
    pub async fn refresh(&mut self, session: &Session) -> bool {
        let cycle = self.trigger.begin();
        let viewer = session.username();
        let target = self.target.as_str();
        let (user, friends, friend_requests, viewer_requests) = join!(
            get_user(session, target),
            get_friends(session, target),
            get_friend_requests(session, target),
            get_friend_requests(session, viewer)
        );

        let mut notices = Notices::default();
        let state = match user {
            Err(ClientError::NotFound(name)) => Some(ProfileState::NotFound(name)),
            Err(error) => {
                warn!("failed to fetch profile {target}: {error}");
                notices.push(format!("Could not load profile: {error}"));
                None
            }
            Ok(mut user) => {
                let friends = notices.or_default("friends", friends);
                let friend_requests = notices.or_default("friend requests", friend_requests);
                let viewer_requests = notices.or_default("your friend requests", viewer_requests);
                let relation = ProfileRelation::derive(viewer, target, &friends, &friend_requests, &viewer_requests);
                user.username.get_or_insert_with(|| target.to_string());
                Some(ProfileState::Loaded(Profile {
                    user,
                    friends,
                    friend_requests,
                    relation,
                }))
            }
        };

        let Some((state, notices)) = cycle.finish((state, notices)) else {
            return false;
        };
        if let Some(state) = state {
            debug!(username = %self.target, "profile loaded");
            self.state = state;
        }
        for notice in notices.iter() {
            self.notices.push(notice.message.clone());
        }
        true
    }

    async fn after_mutation(&mut self, session: &Session) {
        self.trigger.bump();
        self.refresh(session).await;
    }

    /// Send, accept or withdraw a friendship depending on the current state.
    /// Does nothing on the viewer's own profile.
    pub async fn toggle_friendship(&mut self, session: &Session) -> Result<Option<RelationshipState>> {
        let Some(ProfileRelation::Other(state)) = self.relation() else {
            debug!("no relationship actions on this profile");
            return Ok(None);
        };
        match state {
            RelationshipState::None => send_friend_request(session, &self.target).await?,
            RelationshipState::RequestReceived => accept_friend_request(session, &self.target).await?,
            RelationshipState::Friend => remove_friend(session, &self.target).await?,
            RelationshipState::RequestSent => return Ok(Some(state)),
        };
        self.after_mutation(session).await;
        Ok(self.relation().and_then(|relation| relation.state()))
    }

    /// Change the viewer's availability. Only allowed on the viewer's own profile.
    pub async fn set_status(&mut self, session: &Session, status: Status) -> Result<()> {
        if !self.relation().map_or(false, |relation| relation.can_edit()) {
            return Err(ClientError::Unauthorized);
        }
        update_status(session, status).await?;
        self.after_mutation(session).await;
        Ok(())
    }

    /// Edit bio, photo, status or interests. Only allowed on the viewer's own profile.
    pub async fn edit(&mut self, session: &Session, mut update: ProfileUpdate) -> Result<()> {
        if !self.relation().map_or(false, |relation| relation.can_edit()) {
            return Err(ClientError::Unauthorized);
        }
        update.username = self.target.clone();
        update_profile(session, &update).await?;
        self.after_mutation(session).await;
        Ok(())
    }
}
