use quicktweet_client::notice::Notices;
use quicktweet_client::screens::{AdminDashboard, AdminView, FeedScreen, GroupPage, ProfileScreen, ProfileState};
use quicktweet_client::{Page, ProfileRelation, RelationshipState};
use quicktweet_common::{Post, User};

pub fn user_line(user: &User) -> String {
    let mut line = user.username().unwrap_or("<unnamed>").to_string();
    if let Some(id) = user.id {
        line += &format!(" (#{id})");
    }
    if let Some(email) = &user.email {
        line += &format!(" <{email}>");
    }
    if user.is_admin() {
        line += " [admin]";
    }
    line
}

fn post_line(post: &Post) -> String {
    format!("@{}: {}", post.author().username().unwrap_or("?"), post.content)
}

fn controls<T>(page: &Page<'_, T>) {
    let controls = page.controls();
    if !controls.is_visible() {
        return;
    }
    let window = controls
        .window
        .iter()
        .map(|p| if *p == controls.current { format!("[{p}]") } else { p.to_string() })
        .collect::<Vec<_>>()
        .join(" ");
    println!("« ‹ {window} › »  (page {} of {})", controls.current, page.total_pages);
}

fn notices(notices: &Notices) {
    for notice in notices.iter() {
        eprintln!("! {}", notice.message);
    }
}

pub fn feed(feed: &FeedScreen) {
    notices(feed.notices());
    let page = feed.page();
    if page.items.is_empty() {
        println!("No posts.");
    }
    for post in page.items {
        println!("{}", post_line(post));
    }
    controls(&page);
    if !feed.recommendations().is_empty() {
        println!();
        println!("Recommended friends:");
        for user in feed.recommendations() {
            println!("  {}", user_line(user));
        }
    }
}

pub fn profile(screen: &ProfileScreen) {
    notices(screen.notices());
    match screen.state() {
        ProfileState::Loading => println!("Profile unavailable."),
        ProfileState::NotFound(name) => println!("{name} does not exist."),
        ProfileState::Loaded(profile) => {
            let user = &profile.user;
            println!("{}", user_line(user));
            if let Some(status) = user.status {
                println!("Status: {}", status.as_str());
            }
            if let Some(bio) = &user.bio {
                println!("{bio}");
            }
            if let Some(interests) = &user.interests {
                println!("Interests: {}", interests.join(", "));
            }
            println!("Friends: {}", profile.friends.len());
            let action = match profile.relation {
                ProfileRelation::Own => "This is you.",
                ProfileRelation::Other(RelationshipState::Friend) => "Friends. (friend: remove)",
                ProfileRelation::Other(RelationshipState::RequestSent) => "Friend request sent.",
                ProfileRelation::Other(RelationshipState::RequestReceived) => "Wants to be your friend. (friend: accept)",
                ProfileRelation::Other(RelationshipState::None) => "(friend: send request)",
            };
            println!("{action}");
        }
    }
}

pub fn group(group: &GroupPage) {
    notices(group.notices());
    if let Some(summary) = group.summary() {
        println!("{}", summary.interest);
        println!("{}", summary.message());
    }
}

pub fn admin(dashboard: &AdminDashboard) {
    notices(dashboard.notices());
    println!(
        "{}",
        match dashboard.view() {
            AdminView::PendingRequests => "Pending Requests",
            AdminView::Users => "Users",
        }
    );
    let page = dashboard.page();
    for user in page.items {
        println!("  {}", user_line(user));
    }
    controls(&page);
}
