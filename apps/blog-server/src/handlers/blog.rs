//! Blog page: creation form, author filter, sort controls and the post list.
//!
//! Page state lives in the query string, so every control change is a fresh
//! `GET /` that re-runs the listing query.

use actix_web::{HttpResponse, http::StatusCode, http::header, web};
use serde::Deserialize;

use quill_core::DomainError;
use quill_core::domain::{ListOptions, NewPost, PostFilter, SortBy, SortOrder};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{BlogTemplate, render_template};

/// Query string of the blog page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogQuery {
    #[serde(default)]
    pub author: String,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl BlogQuery {
    /// Blog page URL carrying this state.
    pub fn location(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !self.author.is_empty() {
            query.append_pair("author", &self.author);
        }
        if let Some(sort_by) = self.sort_by {
            query.append_pair("sortBy", sort_by.as_str());
        }
        if let Some(sort_order) = self.sort_order {
            query.append_pair("sortOrder", sort_order.as_str());
        }

        let query = query.finish();
        if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{query}")
        }
    }
}

/// Body of the creation form. Empty inputs count as absent.
///
/// Hidden `filterAuthor`/`sortBy`/`sortOrder` fields carry the page state
/// so the list comes back as the user left it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub contents: String,
    /// Comma separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub filter_author: String,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CreatePostForm {
    /// Split into the post to create and the page state to return to.
    pub fn into_parts(self) -> (NewPost, BlogQuery) {
        let tags: Vec<String> = self
            .tags
            .split(',')
            .filter_map(|tag| non_empty(tag.to_string()))
            .collect();

        let input = NewPost {
            title: non_empty(self.title),
            author: non_empty(self.author),
            contents: non_empty(self.contents),
            tags: (!tags.is_empty()).then_some(tags),
        };
        let page = BlogQuery {
            author: self.filter_author,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        };
        (input, page)
    }
}

async fn render_page(
    state: &AppState,
    query: BlogQuery,
    error: Option<String>,
    status: StatusCode,
) -> AppResult<HttpResponse> {
    let options = ListOptions::from_parts(query.sort_by, query.sort_order);
    let filter = PostFilter {
        author: non_empty(query.author.clone()),
        tag: None,
    };
    let posts = state.posts.list_posts(&filter, options).await?;

    let mut template =
        BlogTemplate::new(query.author, options.sort_by, options.sort_order, posts);
    if let Some(error) = error {
        template = template.with_error(error);
    }

    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(render_template(template)?))
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<BlogQuery>,
) -> AppResult<HttpResponse> {
    render_page(&state, query.into_inner(), None, StatusCode::OK).await
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<CreatePostForm>,
) -> AppResult<HttpResponse> {
    let (input, page) = form.into_inner().into_parts();

    match state.posts.create_post(input).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "Post created from blog page");
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, page.location()))
                .finish())
        }
        Err(DomainError::Validation(msg)) => {
            render_page(&state, page, Some(msg), StatusCode::UNPROCESSABLE_ENTITY).await
        }
        Err(err) => Err(err.into()),
    }
}
