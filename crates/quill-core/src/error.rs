//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - one variant per user-facing failure condition.
///
/// The messages here are the messages clients see, so changing one is
/// an API change.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post with the title '{0}' not found!")]
    PostNotFound(String),

    #[error("Post with title '{0}' already exists, please use different title")]
    TitleAlreadyExists(String),

    #[error("Category '{0}' not found!")]
    CategoryNotFound(String),

    #[error("Category '{0}' already exists!")]
    CategoryAlreadyExists(String),

    #[error("Tag '{0}' not found!")]
    TagNotFound(String),

    #[error("Tag '{0}' already exists!")]
    TagAlreadyExists(String),

    #[error("Post '{post}' already contains category '{category}'")]
    CategoryAlreadyOnPost { post: String, category: String },

    #[error("Post '{post}' does not contain category '{category}'")]
    CategoryNotOnPost { post: String, category: String },

    #[error("Post '{post}' already contains tag '{tag}'")]
    TagAlreadyOnPost { post: String, tag: String },

    #[error("Post '{post}' does not contain tag '{tag}'")]
    TagNotOnPost { post: String, tag: String },

    #[error("Comment not found!")]
    CommentNotFound,

    #[error("User with provided email does not exist!")]
    UserNotFound,

    #[error("User with provided email already exists!")]
    EmailAlreadyExists,

    #[error("Passwords do not match, please try again!")]
    PasswordMismatch,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
