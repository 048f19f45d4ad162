//! `AssociationManager` tests. These live outside `src` because they use the
//! in-memory store from `quill-infra`, whose dev-dependency cycle back onto
//! this crate would give in-source unit tests a second, incompatible copy
//! of the port traits.

use std::collections::BTreeSet;
use std::sync::Arc;

use quill_core::domain::{Category, Post, User};
use quill_core::error::DomainError;
use quill_core::ports::{CategoryRepository, PostRepository, TagRepository, UserRepository};
use quill_core::service::AssociationManager;
use quill_infra::InMemoryStore;

async fn setup() -> (Arc<InMemoryStore>, AssociationManager, Post) {
    let store = Arc::new(InMemoryStore::new());
    let manager = AssociationManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );

    let users: &dyn UserRepository = store.as_ref();
    let user = users
        .insert(User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        ))
        .await
        .unwrap();

    let posts: &dyn PostRepository = store.as_ref();
    let post = posts
        .insert(Post::new(user.id, "Hello".to_string(), "World".to_string()))
        .await
        .unwrap();

    (store, manager, post)
}

async fn seed_category(store: &Arc<InMemoryStore>, name: &str) -> Category {
    let categories: &dyn CategoryRepository = store.as_ref();
    categories
        .insert(Category::new(name.to_string()))
        .await
        .unwrap()
}

#[tokio::test]
async fn category_attach_requires_existing_name() {
    let (store, manager, post) = setup().await;

    let missing = manager.attach_category(&post, "ghost").await;
    assert!(matches!(missing, Err(DomainError::CategoryNotFound(n)) if n == "ghost"));

    seed_category(&store, "tech").await;
    manager.attach_category(&post, "tech").await.unwrap();
    assert_eq!(manager.category_names(post.id).await.unwrap(), vec!["tech"]);

    let duplicate = manager.attach_category(&post, "tech").await;
    assert!(matches!(
        duplicate,
        Err(DomainError::CategoryAlreadyOnPost { .. })
    ));
}

#[tokio::test]
async fn tag_attach_creates_unknown_names() {
    let (store, manager, post) = setup().await;

    manager.attach_tag(&post, "rust").await.unwrap();

    // the tag now exists as a vocabulary entry in its own right
    let tags: &dyn TagRepository = store.as_ref();
    assert!(tags.find_by_name("rust").await.unwrap().is_some());
    assert_eq!(manager.tag_names(post.id).await.unwrap(), vec!["rust"]);

    let duplicate = manager.attach_tag(&post, "rust").await;
    assert!(matches!(duplicate, Err(DomainError::TagAlreadyOnPost { .. })));
}

#[tokio::test]
async fn detach_reports_missing_membership() {
    let (store, manager, post) = setup().await;
    seed_category(&store, "tech").await;

    let not_on_post = manager.detach_category(&post, "tech").await;
    assert!(matches!(
        not_on_post,
        Err(DomainError::CategoryNotOnPost { .. })
    ));

    manager.attach_category(&post, "tech").await.unwrap();
    manager.detach_category(&post, "tech").await.unwrap();
    assert!(manager.category_names(post.id).await.unwrap().is_empty());

    // detaching a tag never creates it
    let unknown_tag = manager.detach_tag(&post, "never-seen").await;
    assert!(matches!(unknown_tag, Err(DomainError::TagNotFound(_))));
    let tags: &dyn TagRepository = store.as_ref();
    assert!(tags.find_by_name("never-seen").await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_attach_keeps_earlier_elements_on_failure() {
    let (store, manager, post) = setup().await;
    seed_category(&store, "kept").await;

    let names = vec!["kept".to_string(), "ghost".to_string()];
    let result = manager.attach_categories(&post, &names).await;
    assert!(matches!(result, Err(DomainError::CategoryNotFound(n)) if n == "ghost"));

    // the first attachment survives the failed second one
    assert_eq!(manager.category_names(post.id).await.unwrap(), vec!["kept"]);
}

#[tokio::test]
async fn resolve_categories_is_all_or_nothing() {
    let (store, manager, _post) = setup().await;
    seed_category(&store, "tech").await;

    let known: BTreeSet<String> = ["tech".to_string()].into();
    assert_eq!(manager.resolve_categories(&known).await.unwrap().len(), 1);

    let mixed: BTreeSet<String> = ["tech".to_string(), "ghost".to_string()].into();
    let result = manager.resolve_categories(&mixed).await;
    assert!(matches!(result, Err(DomainError::CategoryNotFound(n)) if n == "ghost"));
}
