//! `PostService` tests. These live outside `src` because they use the
//! in-memory store from `quill-infra`, whose dev-dependency cycle back onto
//! this crate would give in-source unit tests a second, incompatible copy
//! of the port traits.

use std::collections::BTreeSet;
use std::sync::Arc;

use quill_core::domain::{Category, NewPost, PostPatch, User};
use quill_core::error::DomainError;
use quill_core::ports::{
    CategoryRepository, CommentRepository, PostTagRepository, TagRepository, UserRepository,
};
use quill_core::service::{AssociationManager, OwnershipGuard, PostService};
use quill_infra::InMemoryStore;

struct Fixture {
    store: Arc<InMemoryStore>,
    service: PostService,
}

async fn setup() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let guard = OwnershipGuard::new(store.clone(), store.clone(), store.clone());
    let associations = AssociationManager::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    let service = PostService::new(store.clone(), guard, associations);

    Fixture { store, service }
}

impl Fixture {
    async fn register(&self, email: &str) -> User {
        let users: &dyn UserRepository = self.store.as_ref();
        users
            .insert(User::new(
                "John".to_string(),
                "Doe".to_string(),
                email.to_string(),
                "hash".to_string(),
            ))
            .await
            .unwrap()
    }

    async fn add_category(&self, name: &str) {
        let categories: &dyn CategoryRepository = self.store.as_ref();
        categories
            .insert(Category::new(name.to_string()))
            .await
            .unwrap();
    }
}

fn request(title: &str, categories: &[&str], tags: &[&str]) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "content".to_string(),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn create_projects_categories_and_tags() {
    let fx = setup().await;
    fx.register("john@example.com").await;
    fx.add_category("tech").await;

    let detail = fx
        .service
        .create("john@example.com", request("Hello", &["tech"], &["rust"]))
        .await
        .unwrap();

    assert_eq!(detail.post.title, "Hello");
    assert_eq!(detail.categories, vec!["tech"]);
    assert_eq!(detail.tags, vec!["rust"]);

    // the auto-created tag is now searchable vocabulary
    let tags: &dyn TagRepository = fx.store.as_ref();
    assert!(tags.find_by_name("rust").await.unwrap().is_some());
}

#[tokio::test]
async fn duplicate_title_is_scoped_to_the_owner() {
    let fx = setup().await;
    fx.register("alice@example.com").await;
    fx.register("bob@example.com").await;
    fx.add_category("tech").await;

    fx.service
        .create("alice@example.com", request("Diary", &["tech"], &["a"]))
        .await
        .unwrap();

    let conflict = fx
        .service
        .create("alice@example.com", request("Diary", &["tech"], &["b"]))
        .await;
    assert!(matches!(conflict, Err(DomainError::TitleAlreadyExists(t)) if t == "Diary"));

    // a different owner may reuse the title
    fx.service
        .create("bob@example.com", request("Diary", &["tech"], &["b"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_category_fails_creation_before_any_write() {
    let fx = setup().await;
    fx.register("john@example.com").await;

    let result = fx
        .service
        .create("john@example.com", request("Hello", &["ghost"], &["rust"]))
        .await;
    assert!(matches!(result, Err(DomainError::CategoryNotFound(_))));

    // no partial post, and the tag set was never reached
    assert!(matches!(
        fx.service.get("Hello").await,
        Err(DomainError::PostNotFound(_))
    ));
    let tags: &dyn TagRepository = fx.store.as_ref();
    assert!(tags.find_by_name("rust").await.unwrap().is_none());
}

#[tokio::test]
async fn update_refreshes_timestamp_and_checks_conflicts() {
    let fx = setup().await;
    fx.register("john@example.com").await;
    fx.add_category("tech").await;

    let created = fx
        .service
        .create("john@example.com", request("First", &["tech"], &["t"]))
        .await
        .unwrap();
    fx.service
        .create("john@example.com", request("Second", &["tech"], &["t"]))
        .await
        .unwrap();

    // content-only patch keeps the title and bumps updated_at
    let updated = fx
        .service
        .update(
            "john@example.com",
            "First",
            PostPatch {
                title: None,
                content: Some("revised".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.post.title, "First");
    assert_eq!(updated.post.content, "revised");
    assert!(updated.post.updated_at > created.post.updated_at);

    // renaming onto a sibling title conflicts
    let conflict = fx
        .service
        .update(
            "john@example.com",
            "First",
            PostPatch {
                title: Some("Second".to_string()),
                content: None,
            },
        )
        .await;
    assert!(matches!(conflict, Err(DomainError::TitleAlreadyExists(_))));

    // re-submitting the current title is not a conflict
    fx.service
        .update(
            "john@example.com",
            "First",
            PostPatch {
                title: Some("First".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn update_is_denied_for_non_owners() {
    let fx = setup().await;
    fx.register("alice@example.com").await;
    fx.register("bob@example.com").await;
    fx.add_category("tech").await;

    fx.service
        .create("alice@example.com", request("Diary", &["tech"], &["t"]))
        .await
        .unwrap();

    let denied = fx
        .service
        .update(
            "bob@example.com",
            "Diary",
            PostPatch {
                title: None,
                content: Some("hijacked".to_string()),
            },
        )
        .await;
    assert!(matches!(denied, Err(DomainError::PostNotFound(_))));

    // unchanged
    let detail = fx.service.get("Diary").await.unwrap();
    assert_eq!(detail.post.content, "content");
}

#[tokio::test]
async fn delete_drops_memberships_and_comments_but_keeps_vocabulary() {
    let fx = setup().await;
    let user = fx.register("john@example.com").await;
    fx.add_category("tech").await;

    let detail = fx
        .service
        .create("john@example.com", request("Hello", &["tech"], &["rust"]))
        .await
        .unwrap();

    let comments: &dyn CommentRepository = fx.store.as_ref();
    comments
        .insert(quill_core::domain::Comment::new(
            detail.post.id,
            user.id,
            "nice".to_string(),
        ))
        .await
        .unwrap();

    fx.service.delete("john@example.com", "Hello").await.unwrap();

    assert!(matches!(
        fx.service.get("Hello").await,
        Err(DomainError::PostNotFound(_))
    ));
    assert!(comments
        .find_all_for_post(detail.post.id)
        .await
        .unwrap()
        .is_empty());

    // vocabulary survives its posts
    let categories: &dyn CategoryRepository = fx.store.as_ref();
    assert!(categories.find_by_name("tech").await.unwrap().is_some());
    let tags: &dyn TagRepository = fx.store.as_ref();
    assert!(tags.find_by_name("rust").await.unwrap().is_some());
    let post_tags: &dyn PostTagRepository = fx.store.as_ref();
    assert!(post_tags.tags_of_post(detail.post.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn listings_filter_by_vocabulary_and_reject_unknown_names() {
    let fx = setup().await;
    fx.register("john@example.com").await;
    fx.add_category("tech").await;
    fx.add_category("life").await;

    fx.service
        .create("john@example.com", request("Hello", &["tech"], &["rust"]))
        .await
        .unwrap();
    fx.service
        .create("john@example.com", request("Away", &["life"], &["travel"]))
        .await
        .unwrap();

    let tech = fx.service.list_by_category("tech").await.unwrap();
    assert_eq!(tech.len(), 1);
    assert_eq!(tech[0].post.title, "Hello");

    let rust = fx.service.list_by_tag("rust").await.unwrap();
    assert_eq!(rust.len(), 1);
    assert_eq!(rust[0].post.title, "Hello");

    assert!(matches!(
        fx.service.list_by_category("ghost").await,
        Err(DomainError::CategoryNotFound(_))
    ));
    assert!(matches!(
        fx.service.list_by_tag("ghost").await,
        Err(DomainError::TagNotFound(_))
    ));

    let all = fx.service.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].post.title, "Hello"); // oldest first
}

#[tokio::test]
async fn empty_association_sets_are_accepted_by_the_core() {
    // boundary validation rejects empty sets before they get here;
    // the core itself treats them as nothing to link
    let fx = setup().await;
    fx.register("john@example.com").await;

    let detail = fx
        .service
        .create(
            "john@example.com",
            NewPost {
                title: "Bare".to_string(),
                content: "no links".to_string(),
                categories: BTreeSet::new(),
                tags: BTreeSet::new(),
            },
        )
        .await
        .unwrap();

    assert!(detail.categories.is_empty());
    assert!(detail.tags.is_empty());
}
