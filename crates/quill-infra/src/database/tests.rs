use sea_orm::{DatabaseBackend, MockDatabase};

use quill_core::domain::{Post, Role, User};
use quill_core::ports::{BaseRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    // Mock the query expectation
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            user_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_find_user_by_email() {
    let user_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: user_id,
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            email: "john@example.com".to_owned(),
            password_hash: "hash".to_owned(),
            role: "user".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result: Option<User> = repo.find_by_email("john@example.com").await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.id, user_id);
    assert_eq!(found.role, Role::User);
}
