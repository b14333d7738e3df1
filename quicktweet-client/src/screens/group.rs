use futures::join;

use crate::client::{get_user, users_with_interest};
use crate::cycle::RefreshTrigger;
use crate::notice::Notices;
use crate::session::Session;

/// Membership of an interest group, as seen by the viewer.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct GroupSummary {
    pub interest: String,
    pub member_count: usize,
    pub viewer_is_member: bool,
}

impl GroupSummary {
    pub fn message(&self) -> String {
        match (self.viewer_is_member, self.member_count) {
            (_, 0) => "No users are in this group.".to_string(),
            (true, 1) => "You are in this group.".to_string(),
            (true, 2) => "You and one other person are in this group.".to_string(),
            (true, n) => format!("You and {} other users are in this group.", n - 1),
            (false, 1) => "One user is in this group.".to_string(),
            (false, n) => format!("{n} users are in this group."),
        }
    }
}

#[derive(Debug)]
pub struct GroupPage {
    interest: String,
    trigger: RefreshTrigger,
    summary: Option<GroupSummary>,
    notices: Notices,
}

impl GroupPage {
    pub fn new(interest: impl Into<String>) -> Self {
        Self {
            interest: interest.into(),
            trigger: RefreshTrigger::new(),
            summary: None,
            notices: Notices::default(),
        }
    }

    pub fn summary(&self) -> Option<&GroupSummary> {
        self.summary.as_ref()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub async fn refresh(&mut self, session: &Session) -> bool {
        let cycle = self.trigger.begin();
        let (members, viewer) = join!(
            users_with_interest(session, &self.interest),
            get_user(session, session.username())
        );

        let mut notices = Notices::default();
        let members = notices.or_default("group members", members);
        let viewer_is_member = match viewer {
            Ok(viewer) => viewer.has_interest(&self.interest),
            Err(_) => members.iter().any(|member| member.is(session.username())),
        };
        let summary = GroupSummary {
            interest: self.interest.clone(),
            member_count: members.len(),
            viewer_is_member,
        };

        let Some((summary, notices)) = cycle.finish((summary, notices)) else {
            return false;
        };
        self.summary = Some(summary);
        for notice in notices.iter() {
            self.notices.push(notice.message.clone());
        }
        true
    }
}
