//! Post JSON API.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_shared::dto::{
    CreatePostRequest, DeleteResponse, ListPostsQuery, PostResponse, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("post with id {} not found", id))
}

/// GET /api/posts?author=&tag=&sortBy=&sortOrder=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let filter = query.filter();
    if filter.author.is_some() && filter.tag.is_some() {
        return Err(AppError::BadRequest(
            "query by either author or tag, not both".to_string(),
        ));
    }

    let posts = state.posts.list_posts(&filter, query.options()).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .get_post_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create_post(body.into_inner().into()).await?;
    tracing::info!(post_id = %post.id, "Post created via API");

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .update_post(id, body.into_inner().into())
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let result = state.posts.delete_one(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        deleted_count: result.deleted_count,
    }))
}
