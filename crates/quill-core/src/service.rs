//! Post service - validation plus one repository round trip per operation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{DeleteResult, ListOptions, NewPost, Post, PostFilter, PostPatch};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Entry point for every post operation.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post.
    pub async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = Post::create(input)?;
        let saved = self.repo.insert(post).await?;
        tracing::debug!(post_id = %saved.id, "Post created");
        Ok(saved)
    }

    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        tracing::debug!(?filter, ?options, "Listing posts");
        Ok(self.repo.list(filter, options).await?)
    }

    pub async fn list_all_posts(&self, options: ListOptions) -> Result<Vec<Post>, DomainError> {
        self.list_posts(&PostFilter::all(), options).await
    }

    pub async fn list_all_posts_by_author(
        &self,
        author: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        self.list_posts(&PostFilter::by_author(author), options).await
    }

    pub async fn list_all_posts_by_tag(
        &self,
        tag: &str,
        options: ListOptions,
    ) -> Result<Vec<Post>, DomainError> {
        self.list_posts(&PostFilter::by_tag(tag), options).await
    }

    /// `Ok(None)` when no post has this id.
    pub async fn get_post_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Merge the supplied fields into the post. `Ok(None)` when no post has this id.
    pub async fn update_post(
        &self,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        patch.validate()?;
        let updated = self.repo.update(id, patch).await?;
        if updated.is_none() {
            tracing::debug!(post_id = %id, "Update skipped, post not found");
        }
        Ok(updated)
    }

    /// Remove the post. Deleting an unknown id reports zero and is not an error.
    pub async fn delete_one(&self, id: Uuid) -> Result<DeleteResult, DomainError> {
        let deleted_count = self.repo.delete(id).await?;
        tracing::debug!(post_id = %id, deleted_count, "Post delete");
        Ok(DeleteResult { deleted_count })
    }
}
