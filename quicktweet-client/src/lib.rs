pub mod client;
pub mod config;
pub mod cycle;
pub mod error;
pub mod filter;
pub mod notice;
pub mod pagination;
pub mod recommend;
pub mod relationship;
pub mod screens;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, Result};
pub use filter::{filter_posts, FeedSnapshot, PostQuery};
pub use pagination::{paginate, Page, PageControls, Pager};
pub use recommend::recommend;
pub use relationship::{resolve_relationship, ProfileRelation, RelationshipState};
pub use session::Session;
