//! Domain entities - the core business objects.

mod post;
mod query;

pub use post::{NewPost, Post, PostPatch, timestamp_now};
pub use query::{DeleteResult, ListOptions, PostFilter, SortBy, SortOrder};
