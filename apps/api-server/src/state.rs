//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, CommentRepository, PostCategoryRepository, PostRepository,
    PostTagRepository, TagRepository, TokenService, UserRepository,
};
use quill_core::service::{
    AccountService, AssociationManager, CategoryService, CommentService, OwnershipGuard,
    PostService, TagService,
};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::database::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use quill_infra::database::{
    DbConn, PostgresCategoryRepository, PostgresCommentRepository, PostgresPostCategoryRepository,
    PostgresPostRepository, PostgresPostTagRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// One trait object per table, whatever the backend.
struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
    comments: Arc<dyn CommentRepository>,
    post_categories: Arc<dyn PostCategoryRepository>,
    post_tags: Arc<dyn PostTagRepository>,
}

impl Repositories {
    /// Every port backed by the same store, so cascades stay consistent.
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            categories: store.clone(),
            tags: store.clone(),
            comments: store.clone(),
            post_categories: store.clone(),
            post_tags: store,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: DbConn) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            post_categories: Arc::new(PostgresPostCategoryRepository::new(db.clone())),
            post_tags: Arc::new(PostgresPostTagRepository::new(db)),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub posts: PostService,
    pub categories: CategoryService,
    pub tags: TagService,
    pub comments: CommentService,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let repos = match db_config {
            Some(config) => match quill_infra::database::connect(config).await {
                Ok(db) => Repositories::postgres(db),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Repositories::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        Self::assemble(repos)
    }

    fn assemble(repos: Repositories) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords = Arc::new(Argon2PasswordService::new());

        let guard = OwnershipGuard::new(
            repos.users.clone(),
            repos.posts.clone(),
            repos.comments.clone(),
        );
        let associations = AssociationManager::new(
            repos.categories.clone(),
            repos.tags.clone(),
            repos.post_categories,
            repos.post_tags,
        );

        tracing::info!("Application state initialized");

        Self {
            accounts: AccountService::new(repos.users.clone(), passwords, tokens.clone()),
            posts: PostService::new(repos.posts.clone(), guard.clone(), associations.clone()),
            categories: CategoryService::new(repos.categories, guard.clone(), associations.clone()),
            tags: TagService::new(repos.tags, guard.clone(), associations),
            comments: CommentService::new(repos.comments, repos.posts, repos.users, guard),
            tokens,
        }
    }
}
