//! One derivation pass per screen. Each screen owns its snapshot, fetches all
//! of its inputs for a cycle together, and only then derives its view.

pub mod admin;
pub mod feed;
pub mod group;
pub mod profile;

pub use admin::{AdminDashboard, AdminView};
pub use feed::FeedScreen;
pub use group::{GroupPage, GroupSummary};
pub use profile::{Profile, ProfileScreen, ProfileState};
