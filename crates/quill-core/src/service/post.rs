//! Post lifecycle orchestration.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostDetail, PostPatch};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::service::{AssociationManager, OwnershipGuard};

/// Creation, update, and deletion of posts together with their
/// association sets.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    guard: OwnershipGuard,
    associations: AssociationManager,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        guard: OwnershipGuard,
        associations: AssociationManager,
    ) -> Self {
        Self {
            posts,
            guard,
            associations,
        }
    }

    /// Create a post with its initial category and tag sets.
    ///
    /// Categories are resolved before anything is written, so an unknown
    /// category name leaves no partial post behind. Tags are resolved
    /// after that, creating unknown names as it goes.
    pub async fn create(
        &self,
        owner_email: &str,
        new_post: NewPost,
    ) -> Result<PostDetail, DomainError> {
        let user = self.guard.require_user(owner_email).await?;

        if self
            .posts
            .find_by_title_and_owner(&new_post.title, user.id)
            .await?
            .is_some()
        {
            return Err(DomainError::TitleAlreadyExists(new_post.title));
        }

        let categories = self
            .associations
            .resolve_categories(&new_post.categories)
            .await?;
        let tags = self
            .associations
            .resolve_or_create_tags(&new_post.tags)
            .await?;

        let post = self
            .posts
            .insert(Post::new(user.id, new_post.title, new_post.content))
            .await?;
        self.associations.link_categories(post.id, &categories).await?;
        self.associations.link_tags(post.id, &tags).await?;

        self.project(post).await
    }

    /// Public read. The title resolves globally; with several same-titled
    /// posts the oldest wins.
    pub async fn get(&self, title: &str) -> Result<PostDetail, DomainError> {
        let post = self
            .posts
            .find_by_title(title)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(title.to_string()))?;

        self.project(post).await
    }

    /// All posts with their association names. An empty listing is not
    /// an error.
    pub async fn list_all(&self) -> Result<Vec<PostDetail>, DomainError> {
        let posts = self.posts.find_all().await?;
        self.project_all(posts).await
    }

    /// Posts carrying the named category.
    pub async fn list_by_category(&self, name: &str) -> Result<Vec<PostDetail>, DomainError> {
        let posts = self.associations.posts_in_category(name).await?;
        self.project_all(posts).await
    }

    /// Posts carrying the named tag.
    pub async fn list_by_tag(&self, name: &str) -> Result<Vec<PostDetail>, DomainError> {
        let posts = self.associations.posts_with_tag(name).await?;
        self.project_all(posts).await
    }

    /// Update the caller's post. The conflict check is skipped when the
    /// new title equals the current one; `updated_at` is refreshed even
    /// for an empty patch.
    pub async fn update(
        &self,
        owner_email: &str,
        title: &str,
        patch: PostPatch,
    ) -> Result<PostDetail, DomainError> {
        let mut post = self.guard.require_owned_post(owner_email, title).await?;

        if let Some(new_title) = &patch.title {
            if new_title != &post.title
                && self
                    .posts
                    .find_by_title_and_owner(new_title, post.user_id)
                    .await?
                    .is_some()
            {
                return Err(DomainError::TitleAlreadyExists(new_title.clone()));
            }
        }

        post.apply(patch);
        let post = self.posts.update(post).await?;

        self.project(post).await
    }

    /// Delete the caller's post. Its bridge rows and comments go with
    /// it; the categories and tags themselves stay.
    pub async fn delete(&self, owner_email: &str, title: &str) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(owner_email, title).await?;
        self.posts.delete(post.id).await?;
        Ok(())
    }

    async fn project(&self, post: Post) -> Result<PostDetail, DomainError> {
        let categories = self.associations.category_names(post.id).await?;
        let tags = self.associations.tag_names(post.id).await?;

        Ok(PostDetail {
            post,
            categories,
            tags,
        })
    }

    async fn project_all(&self, posts: Vec<Post>) -> Result<Vec<PostDetail>, DomainError> {
        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.project(post).await?);
        }
        Ok(details)
    }
}
