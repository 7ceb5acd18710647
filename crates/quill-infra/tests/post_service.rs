//! Post service behavior over the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use quill_core::domain::{ListOptions, NewPost, Post, PostPatch, SortBy, SortOrder};
use quill_core::{DomainError, PostService};
use quill_infra::InMemoryPostRepository;

/// A service seeded with four sample posts, in creation order.
struct Fixture {
    service: PostService,
    posts: Vec<Post>,
}

fn sample(title: &str, author: Option<&str>, tags: &[&str]) -> NewPost {
    NewPost {
        title: Some(title.into()),
        author: author.map(Into::into),
        contents: None,
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

async fn fixture() -> Fixture {
    let service = PostService::new(Arc::new(InMemoryPostRepository::new()));
    let samples = [
        sample("Learning Redux", Some("Daniel Bugl"), &["redux"]),
        sample("Learn React Hooks", Some("Daniel Bugl"), &["react"]),
        sample(
            "Full-Stack React Projects",
            Some("Daniel Bugl"),
            &["react", "nodejs"],
        ),
        NewPost::titled("Guide to TypeScript"),
    ];

    let mut posts = Vec::new();
    for input in samples {
        posts.push(service.create_post(input).await.unwrap());
        // distinct creation timestamps
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    Fixture { service, posts }
}

fn ids(posts: &[Post]) -> Vec<Uuid> {
    posts.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn create_with_all_fields() {
    let Fixture { service, .. } = fixture().await;
    let input = NewPost {
        title: Some("Hello Rust!".into()),
        author: Some("Daniel Bugl".into()),
        contents: Some("This post is stored by the post service.".into()),
        tags: Some(vec!["rust".into(), "actix".into()]),
    };

    let created = service.create_post(input.clone()).await.unwrap();
    let found = service.get_post_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found.title, "Hello Rust!");
    assert_eq!(found.author, input.author);
    assert_eq!(found.contents, input.contents);
    assert_eq!(found.tags, vec!["rust".to_string(), "actix".to_string()]);
    assert_eq!(found.created_at, found.updated_at);
}

#[tokio::test]
async fn create_with_only_title() {
    let Fixture { service, .. } = fixture().await;
    let created = service
        .create_post(NewPost::titled("Only a title"))
        .await
        .unwrap();
    assert!(!created.id.is_nil());
    assert!(created.updated_at >= created.created_at);
}

#[tokio::test]
async fn create_without_title_fails() {
    let Fixture { service, .. } = fixture().await;
    let input = NewPost {
        author: Some("Daniel Bugl".into()),
        ..NewPost::default()
    };

    let err = service.create_post(input).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(err.to_string().contains("`title` is required"));
    assert_eq!(service.list_all_posts(ListOptions::default()).await.unwrap().len(), 4);
}

#[tokio::test]
async fn list_returns_all_posts() {
    let fx = fixture().await;
    let posts = fx.service.list_all_posts(ListOptions::default()).await.unwrap();
    assert_eq!(posts.len(), fx.posts.len());
}

#[tokio::test]
async fn list_defaults_to_created_at_descending() {
    let fx = fixture().await;
    let posts = fx.service.list_all_posts(ListOptions::default()).await.unwrap();

    let mut expected = fx.posts.clone();
    expected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    assert_eq!(ids(&posts), ids(&expected));
}

#[tokio::test]
async fn list_honors_sort_options() {
    let fx = fixture().await;
    // make the oldest post the most recently updated
    fx.service
        .update_post(
            fx.posts[0].id,
            PostPatch {
                contents: Some("Revised".into()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();

    let options = ListOptions::new(SortBy::UpdatedAt, SortOrder::Ascending);
    let posts = fx.service.list_all_posts(options).await.unwrap();

    let updated: Vec<_> = posts.iter().map(|p| p.updated_at).collect();
    let mut sorted = updated.clone();
    sorted.sort();
    assert_eq!(updated, sorted);
    assert_eq!(posts.last().map(|p| p.id), Some(fx.posts[0].id));
}

#[tokio::test]
async fn list_filters_by_author() {
    let fx = fixture().await;
    let posts = fx
        .service
        .list_all_posts_by_author("Daniel Bugl", ListOptions::default())
        .await
        .unwrap();
    assert_eq!(posts.len(), 3);
}

#[tokio::test]
async fn list_filters_by_tag() {
    let fx = fixture().await;
    let posts = fx
        .service
        .list_all_posts_by_tag("react", ListOptions::default())
        .await
        .unwrap();

    let mut found = ids(&posts);
    found.sort();
    let mut expected = vec![fx.posts[1].id, fx.posts[2].id];
    expected.sort();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn get_returns_full_post() {
    let fx = fixture().await;
    let post = fx.service.get_post_by_id(fx.posts[0].id).await.unwrap();
    assert_eq!(post.as_ref(), Some(&fx.posts[0]));
}

#[tokio::test]
async fn get_missing_post_is_none() {
    let fx = fixture().await;
    assert!(fx.service.get_post_by_id(Uuid::nil()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let fx = fixture().await;
    let original = &fx.posts[0];
    let patch = PostPatch {
        author: Some("test author".into()),
        ..PostPatch::default()
    };

    fx.service.update_post(original.id, patch).await.unwrap();
    let post = fx.service.get_post_by_id(original.id).await.unwrap().unwrap();

    assert_eq!(post.author.as_deref(), Some("test author"));
    assert_eq!(post.title, "Learning Redux");
    assert_eq!(post.tags, original.tags);
    assert_eq!(post.created_at, original.created_at);
    assert!(post.updated_at > original.updated_at);
}

#[tokio::test]
async fn update_missing_post_is_none() {
    let fx = fixture().await;
    let patch = PostPatch {
        author: Some("test author".into()),
        ..PostPatch::default()
    };
    assert!(fx.service.update_post(Uuid::nil(), patch).await.unwrap().is_none());
}

#[tokio::test]
async fn update_rejects_blank_title() {
    let fx = fixture().await;
    let patch = PostPatch {
        title: Some(" ".into()),
        ..PostPatch::default()
    };
    let err = fx.service.update_post(fx.posts[0].id, patch).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn delete_removes_post() {
    let fx = fixture().await;
    let result = fx.service.delete_one(fx.posts[0].id).await.unwrap();
    assert_eq!(result.deleted_count, 1);
    assert!(fx.service.get_post_by_id(fx.posts[0].id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_post_reports_zero() {
    let fx = fixture().await;
    let result = fx.service.delete_one(Uuid::nil()).await.unwrap();
    assert_eq!(result.deleted_count, 0);
}
