//! `OwnershipGuard` tests. These live outside `src` because they use the
//! in-memory store from `quill-infra`, whose dev-dependency cycle back onto
//! this crate would give in-source unit tests a second, incompatible copy
//! of the port traits.

use std::sync::Arc;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::DomainError;
use quill_core::ports::{CommentRepository, PostRepository, UserRepository};
use quill_core::service::OwnershipGuard;
use quill_infra::InMemoryStore;

fn guard_over(store: &Arc<InMemoryStore>) -> OwnershipGuard {
    OwnershipGuard::new(store.clone(), store.clone(), store.clone())
}

async fn seed_user(store: &Arc<InMemoryStore>, email: &str) -> User {
    let users: &dyn UserRepository = store.as_ref();
    users
        .insert(User::new(
            "Test".to_string(),
            "User".to_string(),
            email.to_string(),
            "hash".to_string(),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn require_user_rejects_unknown_email() {
    let store = Arc::new(InMemoryStore::new());
    let guard = guard_over(&store);

    let result = guard.require_user("ghost@example.com").await;
    assert!(matches!(result, Err(DomainError::UserNotFound)));
}

#[tokio::test]
async fn owned_post_is_invisible_to_other_users() {
    let store = Arc::new(InMemoryStore::new());
    let guard = guard_over(&store);

    let alice = seed_user(&store, "alice@example.com").await;
    seed_user(&store, "bob@example.com").await;

    let posts: &dyn PostRepository = store.as_ref();
    posts
        .insert(Post::new(alice.id, "Diary".to_string(), "day one".to_string()))
        .await
        .unwrap();

    let found = guard
        .require_owned_post("alice@example.com", "Diary")
        .await
        .unwrap();
    assert_eq!(found.user_id, alice.id);

    let denied = guard.require_owned_post("bob@example.com", "Diary").await;
    assert!(matches!(denied, Err(DomainError::PostNotFound(title)) if title == "Diary"));
}

#[tokio::test]
async fn comment_lookup_scopes_author_but_not_post_owner() {
    let store = Arc::new(InMemoryStore::new());
    let guard = guard_over(&store);

    let author = seed_user(&store, "author@example.com").await;
    let commenter = seed_user(&store, "commenter@example.com").await;

    let posts: &dyn PostRepository = store.as_ref();
    let post = posts
        .insert(Post::new(author.id, "Open thread".to_string(), "...".to_string()))
        .await
        .unwrap();

    let comments: &dyn CommentRepository = store.as_ref();
    let comment = comments
        .insert(Comment::new(post.id, commenter.id, "first".to_string()))
        .await
        .unwrap();

    // the commenter owns the comment even on someone else's post
    let found = guard
        .require_owned_comment("commenter@example.com", "Open thread", comment.id)
        .await
        .unwrap();
    assert_eq!(found.id, comment.id);

    // the post owner does not own the comment
    let denied = guard
        .require_owned_comment("author@example.com", "Open thread", comment.id)
        .await;
    assert!(matches!(denied, Err(DomainError::CommentNotFound)));

    // a wrong title fails before the comment is looked at
    let missing = guard
        .require_owned_comment("commenter@example.com", "No such post", comment.id)
        .await;
    assert!(matches!(missing, Err(DomainError::PostNotFound(_))));
}
