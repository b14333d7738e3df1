use std::collections::HashSet;

use quicktweet_common::User;

/// Everyone the viewer is not already friends with, minus the viewer,
/// in the order the backend listed them.
pub fn recommend(all_users: &[User], viewer_friends: &[User], viewer: &str, limit: usize) -> Vec<User> {
    let friends: HashSet<&str> = viewer_friends.iter().filter_map(User::username).collect();
    all_users
        .iter()
        .filter(|user| !user.is(viewer))
        .filter(|user| user.username().map_or(true, |name| !friends.contains(name)))
        .take(limit)
        .cloned()
        .collect()
}
