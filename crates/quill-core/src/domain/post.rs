use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - represents a single blog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a post. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Partial update of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Current time at the precision the database keeps (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn require_title(title: Option<&str>) -> Result<(), DomainError> {
    match title {
        Some(title) if !title.trim().is_empty() => Ok(()),
        _ => Err(DomainError::required("title")),
    }
}

impl NewPost {
    /// Creation input carrying only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_title(self.title.as_deref())
    }
}

impl Post {
    /// Build a new post with a generated id and equal creation/update timestamps.
    ///
    /// Fails with a validation error naming `title` if it is absent or blank.
    pub fn create(input: NewPost) -> Result<Self, DomainError> {
        input.validate()?;
        let NewPost {
            title,
            author,
            contents,
            tags,
        } = input;

        let now = timestamp_now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.unwrap_or_default(),
            author,
            contents,
            tags: tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Move `updated_at` to `now`, or one microsecond past its current value
    /// if the clock has not advanced.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl PostPatch {
    /// A patch may omit the title, but may not blank it.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.title {
            Some(_) => require_title(self.title.as_deref()),
            None => Ok(()),
        }
    }

    /// Merge the supplied fields into `post` and refresh its `updated_at`.
    pub fn apply(self, post: &mut Post, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(author) = self.author {
            post.author = Some(author);
        }
        if let Some(contents) = self.contents {
            post.contents = Some(contents);
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        post.touch(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_with_only_title() {
        let post = Post::create(NewPost::titled("Only a title")).unwrap();
        assert_eq!(post.title, "Only a title");
        assert_eq!(post.author, None);
        assert!(post.tags.is_empty());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn create_without_title_names_the_field() {
        let input = NewPost {
            author: Some("Daniel Bugl".into()),
            ..NewPost::default()
        };
        let err = Post::create(input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("`title` is required"));
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(Post::create(NewPost::titled("   ")).is_err());
    }

    #[test]
    fn touch_always_moves_forward() {
        let mut post = Post::create(NewPost::titled("Clock")).unwrap();
        let before = post.updated_at;
        post.touch(before - TimeDelta::seconds(5));
        assert!(post.updated_at > before);
        assert_eq!(post.created_at, before);
    }

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut post = Post::create(NewPost {
            title: Some("Learning Redux".into()),
            contents: Some("Actions and reducers".into()),
            tags: Some(vec!["redux".into()]),
            ..NewPost::default()
        })
        .unwrap();
        let before = post.updated_at;

        let patch = PostPatch {
            author: Some("test author".into()),
            ..PostPatch::default()
        };
        patch.apply(&mut post, timestamp_now());

        assert_eq!(post.author.as_deref(), Some("test author"));
        assert_eq!(post.title, "Learning Redux");
        assert_eq!(post.contents.as_deref(), Some("Actions and reducers"));
        assert_eq!(post.tags, vec!["redux".to_string()]);
        assert!(post.updated_at > before);
    }

    #[test]
    fn patch_cannot_blank_title() {
        let patch = PostPatch {
            title: Some(String::new()),
            ..PostPatch::default()
        };
        assert!(patch.validate().is_err());
        assert!(PostPatch::default().validate().is_ok());
    }
}
