use quicktweet_common::User;

/// How the viewer stands with a target user. Always derived from freshly
/// fetched collections, never stored.
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug, Default)]
pub enum RelationshipState {
    #[default]
    None,
    Friend,
    /// The viewer already asked the target.
    RequestSent,
    /// The target already asked the viewer.
    RequestReceived,
}

fn contains(users: &[User], username: &str) -> bool {
    users.iter().any(|user| user.is(username))
}

/// Checks run in priority order; the first match wins, so inconsistent
/// upstream data (a user both friend and requester) resolves to `Friend`.
pub fn resolve_relationship(
    viewer: &str,
    target: &str,
    target_friends: &[User],
    target_friend_requests: &[User],
    viewer_friend_requests: &[User],
) -> RelationshipState {
    if contains(target_friends, viewer) {
        RelationshipState::Friend
    } else if contains(target_friend_requests, viewer) {
        RelationshipState::RequestSent
    } else if contains(viewer_friend_requests, target) {
        RelationshipState::RequestReceived
    } else {
        RelationshipState::None
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum ProfileRelation {
    /// The viewer is looking at their own profile.
    Own,
    Other(RelationshipState),
}

impl ProfileRelation {
    pub fn derive(
        viewer: &str,
        target: &str,
        target_friends: &[User],
        target_friend_requests: &[User],
        viewer_friend_requests: &[User],
    ) -> Self {
        if viewer == target {
            return ProfileRelation::Own;
        }
        ProfileRelation::Other(resolve_relationship(
            viewer,
            target,
            target_friends,
            target_friend_requests,
            viewer_friend_requests,
        ))
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, ProfileRelation::Own)
    }

    pub fn state(&self) -> Option<RelationshipState> {
        match self {
            ProfileRelation::Own => None,
            ProfileRelation::Other(state) => Some(*state),
        }
    }
}
