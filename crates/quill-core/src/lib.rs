//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Post entities, query options, the repository port and the post service
//! live here, free of any storage or HTTP dependency.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
