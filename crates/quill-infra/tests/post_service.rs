//! Post lifecycle over the in-memory store.

use std::sync::Arc;

use serde_json::json;

use quill_core::domain::PostInput;
use quill_core::services::PostService;
use quill_core::DomainError;
use quill_infra::InMemoryPostRepository;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn input(value: serde_json::Value) -> PostInput {
    serde_json::from_value(value).expect("valid post input")
}

#[tokio::test]
async fn create_derives_slug_and_persists() {
    let svc = service();

    let post = svc
        .create_post(input(json!({"title": "Hello World!", "body": "text"})))
        .await
        .unwrap();

    assert_eq!(post.slug, "hello-world");
    let found = svc.find_post(post.id).await.unwrap();
    assert_eq!(found, post);
}

#[tokio::test]
async fn second_post_with_same_slug_fails_validation() {
    let svc = service();
    svc.create_post(input(json!({"title": "Same Title", "body": "a"})))
        .await
        .unwrap();

    let err = svc
        .create_post(input(json!({"title": "same title!", "body": "b"})))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Duplicate { field: "slug", ref value } if value == "same-title"
    ));
}

#[tokio::test]
async fn trashed_posts_still_reserve_their_slug() {
    let svc = service();
    let post = svc
        .create_post(input(json!({"title": "Reserved", "body": "a"})))
        .await
        .unwrap();
    svc.delete_post(post.id).await.unwrap();

    let err = svc
        .create_post(input(json!({"title": "Reserved", "body": "b"})))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate { .. }));
}

#[tokio::test]
async fn update_merges_only_sent_fields() {
    let svc = service();
    let post = svc
        .create_post(input(json!({
            "title": "First", "body": "body", "tags": "one, two", "meta_description": "alpha beta"
        })))
        .await
        .unwrap();

    let updated = svc
        .update_post(post.id, input(json!({"body": "changed"})))
        .await
        .unwrap();

    assert_eq!(updated.body, "changed");
    assert_eq!(updated.title, "First");
    assert_eq!(updated.tags, vec!["one", "two"]);
    assert_eq!(updated.keywords, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn update_may_keep_its_own_slug_but_not_take_another() {
    let svc = service();
    let first = svc
        .create_post(input(json!({"title": "First", "body": "a"})))
        .await
        .unwrap();
    svc.create_post(input(json!({"title": "Second", "body": "b"})))
        .await
        .unwrap();

    svc.update_post(first.id, input(json!({"slug": "first"})))
        .await
        .unwrap();

    let err = svc
        .update_post(first.id, input(json!({"slug": "second"})))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate { .. }));
}

#[tokio::test]
async fn update_of_trashed_post_is_not_found() {
    let svc = service();
    let post = svc
        .create_post(input(json!({"title": "Gone", "body": "a"})))
        .await
        .unwrap();
    svc.delete_post(post.id).await.unwrap();

    let err = svc
        .update_post(post.id, input(json!({"body": "b"})))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let err = svc.delete_post(post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn soft_delete_then_restore() {
    let svc = service();
    let post = svc
        .create_post(input(json!({"title": "Cycle", "body": "a"})))
        .await
        .unwrap();

    let trashed = svc.delete_post(post.id).await.unwrap();
    assert!(trashed.deleted_at().is_some());
    assert!(svc.find_post(post.id).await.is_err());

    let restored = svc.restore(post.id).await.unwrap().expect("restored");
    assert!(restored.deleted_at().is_none());
    assert!(svc.find_post(post.id).await.is_ok());
}

#[tokio::test]
async fn restore_of_active_or_unknown_post_is_none() {
    let svc = service();
    let post = svc
        .create_post(input(json!({"title": "Active", "body": "a"})))
        .await
        .unwrap();

    assert!(svc.restore(post.id).await.unwrap().is_none());
    assert!(svc.restore(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn purge_requires_trashed_post() {
    let svc = service();
    let post = svc
        .create_post(input(json!({"title": "Purge", "body": "a"})))
        .await
        .unwrap();

    let err = svc.purge(post.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotTrashed { .. }));

    svc.delete_post(post.id).await.unwrap();
    let last = svc.purge(post.id).await.unwrap();
    assert_eq!(last.id, post.id);
    assert!(last.is_trashed());

    assert!(svc.get_trashed_post(post.id).await.unwrap().is_none());
    assert!(!svc.force_delete(post.id).await.unwrap());
}

#[tokio::test]
async fn restore_all_counts_and_reactivates() {
    let svc = service();
    assert_eq!(svc.restore_all().await.unwrap(), 0);

    let mut ids = Vec::new();
    for i in 0..3 {
        let post = svc
            .create_post(input(json!({"title": format!("Post {i}"), "body": "a"})))
            .await
            .unwrap();
        svc.delete_post(post.id).await.unwrap();
        ids.push(post.id);
    }

    assert_eq!(svc.list_trashed(1).await.unwrap().total, 3);
    assert_eq!(svc.restore_all().await.unwrap(), 3);
    for id in ids {
        assert!(svc.find_post(id).await.is_ok());
    }
    assert!(svc.list_trashed(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_pages_and_filters() {
    let svc = service();
    for i in 0..12 {
        svc.create_post(input(json!({"title": format!("Entry {i}"), "body": "a"})))
            .await
            .unwrap();
    }
    let future = (chrono::Utc::now() + chrono::Duration::days(1)).to_rfc3339();
    svc.create_post(input(json!({
        "title": "Published", "body": "a", "is_published": true, "published_date": future
    })))
    .await
    .unwrap();

    let first = svc.list_posts(false, 1).await.unwrap();
    assert_eq!(first.total, 13);
    assert_eq!(first.items.len(), 10);
    assert_eq!(svc.list_posts(false, 2).await.unwrap().items.len(), 3);

    let published = svc.list_posts(true, 1).await.unwrap();
    assert_eq!(published.total, 1);
    assert_eq!(published.items[0].slug, "published");
}

#[tokio::test]
async fn trash_listing_uses_pages_of_five() {
    let svc = service();
    for i in 0..7 {
        let post = svc
            .create_post(input(json!({"title": format!("T {i}"), "body": "a"})))
            .await
            .unwrap();
        svc.delete_post(post.id).await.unwrap();
    }

    let page = svc.list_trashed(1).await.unwrap();
    assert_eq!(page.per_page, 5);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.last_page(), 2);
}
