//! `CommentService` tests. These live outside `src` because they use the
//! in-memory store from `quill-infra`, whose dev-dependency cycle back onto
//! this crate would give in-source unit tests a second, incompatible copy
//! of the port traits.

use std::sync::Arc;

use quill_core::domain::{Post, User};
use quill_core::error::DomainError;
use quill_core::ports::{PostRepository, UserRepository};
use quill_core::service::{CommentService, OwnershipGuard};
use quill_infra::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    service: CommentService,
}

async fn setup() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let guard = OwnershipGuard::new(store.clone(), store.clone(), store.clone());
    let service =
        CommentService::new(store.clone(), store.clone(), store.clone(), guard);
    Fixture { store, service }
}

impl Fixture {
    async fn register(&self, email: &str) -> User {
        let users: &dyn UserRepository = self.store.as_ref();
        users
            .insert(User::new(
                "T".to_string(),
                "U".to_string(),
                email.to_string(),
                "hash".to_string(),
            ))
            .await
            .unwrap()
    }

    async fn publish(&self, owner: &User, title: &str) -> Post {
        let posts: &dyn PostRepository = self.store.as_ref();
        posts
            .insert(Post::new(owner.id, title.to_string(), "body".to_string()))
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn anyone_registered_can_comment_on_any_post() {
    let fx = setup().await;
    let owner = fx.register("owner@example.com").await;
    fx.register("reader@example.com").await;
    fx.publish(&owner, "Open thread").await;

    let detail = fx
        .service
        .create("reader@example.com", "Open thread", "first!".to_string())
        .await
        .unwrap();
    assert_eq!(detail.author_email, "reader@example.com");

    let fetched = fx
        .service
        .get("Open thread", detail.comment.id)
        .await
        .unwrap();
    assert_eq!(fetched.comment.content, "first!");
    assert_eq!(fetched.author_email, "reader@example.com");
}

#[tokio::test]
async fn create_requires_an_existing_post() {
    let fx = setup().await;
    fx.register("reader@example.com").await;

    let missing = fx
        .service
        .create("reader@example.com", "No such post", "hello".to_string())
        .await;
    assert!(matches!(missing, Err(DomainError::PostNotFound(_))));
}

#[tokio::test]
async fn only_the_author_can_edit_or_delete() {
    let fx = setup().await;
    let owner = fx.register("owner@example.com").await;
    fx.register("author@example.com").await;
    fx.publish(&owner, "Thread").await;

    let detail = fx
        .service
        .create("author@example.com", "Thread", "v1".to_string())
        .await
        .unwrap();
    let id = detail.comment.id;

    // the post owner is not the comment author
    let denied = fx
        .service
        .update("owner@example.com", "Thread", id, "defaced".to_string())
        .await;
    assert!(matches!(denied, Err(DomainError::CommentNotFound)));

    let updated = fx
        .service
        .update("author@example.com", "Thread", id, "v2".to_string())
        .await
        .unwrap();
    assert_eq!(updated.comment.content, "v2");
    assert!(updated.comment.updated_at > detail.comment.created_at);

    let denied = fx.service.delete("owner@example.com", "Thread", id).await;
    assert!(matches!(denied, Err(DomainError::CommentNotFound)));

    fx.service
        .delete("author@example.com", "Thread", id)
        .await
        .unwrap();
    assert!(fx
        .service
        .list_for_post("Thread")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn listing_is_oldest_first() {
    let fx = setup().await;
    let owner = fx.register("owner@example.com").await;
    fx.publish(&owner, "Thread").await;

    for text in ["one", "two", "three"] {
        fx.service
            .create("owner@example.com", "Thread", text.to_string())
            .await
            .unwrap();
    }

    let listing = fx.service.list_for_post("Thread").await.unwrap();
    let contents: Vec<_> = listing.iter().map(|d| d.comment.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
}
