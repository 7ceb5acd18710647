//! Listing parameters: exact-match filters and single-field sort options.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Post;

/// Field used to order post listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::CreatedAt, SortBy::UpdatedAt, SortBy::Title];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::UpdatedAt => "updatedAt",
            SortBy::Title => "title",
        }
    }
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[default]
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Ascending, SortOrder::Descending];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Sort options for listings. Defaults to `createdAt`, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl ListOptions {
    pub fn new(sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            sort_by,
            sort_order,
        }
    }

    /// Fill unset parameters with the defaults.
    pub fn from_parts(sort_by: Option<SortBy>, sort_order: Option<SortOrder>) -> Self {
        Self::new(sort_by.unwrap_or_default(), sort_order.unwrap_or_default())
    }

    /// Ordering of two posts under these options; ties fall back to the id.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ordering = match self.sort_by {
            SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            SortBy::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortBy::Title => a.title.cmp(&b.title),
        }
        .then_with(|| a.id.cmp(&b.id));

        match self.sort_order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Exact-match constraints for listings. An empty filter matches every post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub author: Option<String>,
    /// Matches posts whose tag set contains this value.
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        let author_ok = self
            .author
            .as_deref()
            .is_none_or(|author| post.author.as_deref() == Some(author));
        let tag_ok = self.tag.as_deref().is_none_or(|tag| post.has_tag(tag));
        author_ok && tag_ok
    }
}

/// Outcome of a delete: how many posts were removed (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}
