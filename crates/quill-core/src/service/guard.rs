//! Ownership checks applied before every post or comment mutation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository, UserRepository};

/// Resolves an authenticated email to the rows it may mutate.
///
/// Lookups are owner-scoped: a post that exists under another user
/// answers [`DomainError::PostNotFound`], never a forbidden-style error,
/// so the guard does not reveal what other users have written.
#[derive(Clone)]
pub struct OwnershipGuard {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl OwnershipGuard {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
        }
    }

    /// Resolve an authenticated email to its user row.
    pub async fn require_user(&self, email: &str) -> Result<User, DomainError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    /// Find the caller's post with the given title.
    pub async fn require_owned_post(&self, email: &str, title: &str) -> Result<Post, DomainError> {
        let user = self.require_user(email).await?;

        self.posts
            .find_by_title_and_owner(title, user.id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(title.to_string()))
    }

    /// Find the caller's comment on the named post.
    ///
    /// The post is resolved by title alone; only the comment is
    /// author-scoped, since anyone's post can carry the caller's comment.
    pub async fn require_owned_comment(
        &self,
        email: &str,
        post_title: &str,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        let user = self.require_user(email).await?;
        let post = self
            .posts
            .find_by_title(post_title)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_title.to_string()))?;

        self.comments
            .find_for_post_by_author(comment_id, post.id, user.id)
            .await?
            .ok_or(DomainError::CommentNotFound)
    }
}
