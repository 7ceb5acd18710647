//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{ListOptions, NewPost, Post, PostFilter, PostPatch, SortBy, SortOrder};

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            contents: req.contents,
            tags: req.tags,
        }
    }
}

/// Request to update a post. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            contents: req.contents,
            tags: req.tags,
        }
    }
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl ListPostsQuery {
    /// Empty strings are treated as absent.
    pub fn filter(&self) -> PostFilter {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        PostFilter {
            author: non_empty(&self.author),
            tag: non_empty(&self.tag),
        }
    }

    pub fn options(&self) -> ListOptions {
        ListOptions::from_parts(self.sort_by, self.sort_order)
    }
}

/// A post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            contents: post.contents,
            tags: post.tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response of `DELETE /api/posts/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_response_uses_camel_case() {
        let post = Post::create(NewPost::titled("Hello")).unwrap();
        let value = serde_json::to_value(PostResponse::from(post)).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("author").is_none());
        assert_eq!(value["tags"], serde_json::json!([]));
    }

    #[test]
    fn list_query_ignores_empty_filters() {
        let query = ListPostsQuery {
            author: Some(String::new()),
            tag: Some("react".into()),
            ..ListPostsQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.author, None);
        assert_eq!(filter.tag.as_deref(), Some("react"));
        assert_eq!(query.options(), ListOptions::default());
    }
}
