use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Post, PostCategory, PostTag, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are separate on purpose: ids are generated by
/// the domain, so the store cannot tell a new entity from an edited one.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// Mutating call sites go through the owner-scoped lookup; public reads
/// resolve the title globally.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find the oldest post with the given title, regardless of owner.
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError>;

    /// Find a post by title within one owner's posts.
    async fn find_by_title_and_owner(
        &self,
        title: &str,
        user_id: Uuid,
    ) -> Result<Option<Post>, RepoError>;

    /// All posts, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// Find a category by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// All categories.
    async fn find_all(&self) -> Result<Vec<Category>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    /// Find a tag by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// All tags.
    async fn find_all(&self) -> Result<Vec<Tag>, RepoError>;
}

/// Comment repository.
///
/// Lookups are scoped to a post, and for mutations additionally to the
/// authoring user.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Find one comment on a post.
    async fn find_for_post(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// Find one comment on a post written by the given user.
    async fn find_for_post_by_author(
        &self,
        id: Uuid,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Comment>, RepoError>;

    /// All comments on a post, oldest first.
    async fn find_all_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Bridge-row store for post-category memberships.
#[async_trait]
pub trait PostCategoryRepository: Send + Sync {
    /// Look up a single membership row.
    async fn find(
        &self,
        post_id: Uuid,
        category_id: Uuid,
    ) -> Result<Option<PostCategory>, RepoError>;

    /// Persist a membership row.
    async fn insert(&self, link: PostCategory) -> Result<PostCategory, RepoError>;

    /// Remove a membership row.
    async fn delete(&self, post_id: Uuid, category_id: Uuid) -> Result<(), RepoError>;

    /// Categories attached to a post.
    async fn categories_of_post(&self, post_id: Uuid) -> Result<Vec<Category>, RepoError>;

    /// Posts carrying the category, oldest first.
    async fn posts_with_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Bridge-row store for post-tag memberships.
#[async_trait]
pub trait PostTagRepository: Send + Sync {
    /// Look up a single membership row.
    async fn find(&self, post_id: Uuid, tag_id: Uuid) -> Result<Option<PostTag>, RepoError>;

    /// Persist a membership row.
    async fn insert(&self, link: PostTag) -> Result<PostTag, RepoError>;

    /// Remove a membership row.
    async fn delete(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError>;

    /// Tags attached to a post.
    async fn tags_of_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Posts carrying the tag, oldest first.
    async fn posts_with_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
