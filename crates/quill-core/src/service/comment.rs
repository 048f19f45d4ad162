//! Comment lifecycle.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentDetail};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository, UserRepository};
use crate::service::OwnershipGuard;

/// Comments on posts. Reads are public and post-scoped; mutations are
/// additionally scoped to the authoring user.
///
/// The post is always resolved by title alone, so any registered user
/// can comment on anyone's post.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    guard: OwnershipGuard,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        guard: OwnershipGuard,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
            guard,
        }
    }

    /// Comment on the named post.
    pub async fn create(
        &self,
        author_email: &str,
        post_title: &str,
        content: String,
    ) -> Result<CommentDetail, DomainError> {
        let user = self.guard.require_user(author_email).await?;
        let post = self
            .posts
            .find_by_title(post_title)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_title.to_string()))?;

        let comment = self
            .comments
            .insert(Comment::new(post.id, user.id, content))
            .await?;

        Ok(CommentDetail {
            comment,
            author_email: user.email,
        })
    }

    /// Public read of one comment on a post.
    pub async fn get(&self, post_title: &str, comment_id: Uuid) -> Result<CommentDetail, DomainError> {
        let post = self
            .posts
            .find_by_title(post_title)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_title.to_string()))?;

        let comment = self
            .comments
            .find_for_post(comment_id, post.id)
            .await?
            .ok_or(DomainError::CommentNotFound)?;

        self.with_author(comment).await
    }

    /// All comments on a post, oldest first.
    pub async fn list_for_post(&self, post_title: &str) -> Result<Vec<CommentDetail>, DomainError> {
        let post = self
            .posts
            .find_by_title(post_title)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_title.to_string()))?;

        let comments = self.comments.find_all_for_post(post.id).await?;
        let mut details = Vec::with_capacity(comments.len());
        for comment in comments {
            details.push(self.with_author(comment).await?);
        }
        Ok(details)
    }

    /// Replace the caller's comment content and refresh `updated_at`.
    pub async fn update(
        &self,
        author_email: &str,
        post_title: &str,
        comment_id: Uuid,
        content: String,
    ) -> Result<CommentDetail, DomainError> {
        let mut comment = self
            .guard
            .require_owned_comment(author_email, post_title, comment_id)
            .await?;

        comment.edit(content);
        let comment = self.comments.update(comment).await?;

        self.with_author(comment).await
    }

    /// Delete the caller's comment.
    pub async fn delete(
        &self,
        author_email: &str,
        post_title: &str,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        let comment = self
            .guard
            .require_owned_comment(author_email, post_title, comment_id)
            .await?;

        self.comments.delete(comment.id).await?;
        Ok(())
    }

    async fn with_author(&self, comment: Comment) -> Result<CommentDetail, DomainError> {
        let author = self
            .users
            .find_by_id(comment.user_id)
            .await?
            .ok_or(RepoError::NotFound)?;

        Ok(CommentDetail {
            comment,
            author_email: author.email,
        })
    }
}
