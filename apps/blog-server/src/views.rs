//! Askama views for the blog page.

use askama::Template;
use quill_core::domain::{Post, SortBy, SortOrder};

use crate::middleware::error::AppError;

/// One entry of a `<select>`.
pub struct SelectOption {
    pub value: &'static str,
    pub selected: bool,
}

pub struct PostView {
    pub title: String,
    pub contents: Option<String>,
    pub author: Option<String>,
    pub tags: String,
    pub created_at: String,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            contents: post.contents,
            author: post.author,
            tags: post.tags.join(", "),
            created_at: post.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogTemplate {
    pub author: String,
    pub sort_by: &'static str,
    pub sort_order: &'static str,
    pub sort_fields: Vec<SelectOption>,
    pub sort_orders: Vec<SelectOption>,
    pub posts: Vec<PostView>,
    pub error: Option<String>,
}

impl BlogTemplate {
    pub fn new(author: String, sort_by: SortBy, sort_order: SortOrder, posts: Vec<Post>) -> Self {
        let sort_fields = SortBy::ALL
            .into_iter()
            .map(|field| SelectOption {
                value: field.as_str(),
                selected: field == sort_by,
            })
            .collect();
        let sort_orders = SortOrder::ALL
            .into_iter()
            .map(|order| SelectOption {
                value: order.as_str(),
                selected: order == sort_order,
            })
            .collect();

        Self {
            author,
            sort_by: sort_by.as_str(),
            sort_order: sort_order.as_str(),
            sort_fields,
            sort_orders,
            posts: posts.into_iter().map(Into::into).collect(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|err| AppError::Internal(format!("Template rendering failed: {err}")))
}
