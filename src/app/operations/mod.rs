//! Operation bodies, grouped by platform area.
//!
//! Every operation validates its own arguments, delegates to the injected
//! [`RedditClient`](crate::domain::ports::RedditClient) and projects the result into plain
//! JSON. Each returns an [`OperationResult`](crate::core::envelope::OperationResult); the
//! envelope is produced at the tool boundary.

mod content;
mod listings;
mod messaging;
mod moderation;
mod subreddits;
mod users;

pub use users::calendar_age;
