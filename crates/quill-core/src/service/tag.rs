//! Tag vocabulary management.

use std::sync::Arc;

use crate::domain::Tag;
use crate::error::DomainError;
use crate::ports::TagRepository;
use crate::service::{AssociationManager, OwnershipGuard};

/// CRUD over the tag vocabulary, plus the authenticated attach/detach
/// entry points.
///
/// Explicit creation still rejects duplicates; only attachment to a
/// post creates unknown names silently.
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagRepository>,
    guard: OwnershipGuard,
    associations: AssociationManager,
}

impl TagService {
    pub fn new(
        tags: Arc<dyn TagRepository>,
        guard: OwnershipGuard,
        associations: AssociationManager,
    ) -> Self {
        Self {
            tags,
            guard,
            associations,
        }
    }

    /// Create a tag with a globally unique name.
    pub async fn create(&self, name: &str) -> Result<Tag, DomainError> {
        if self.tags.find_by_name(name).await?.is_some() {
            return Err(DomainError::TagAlreadyExists(name.to_string()));
        }

        Ok(self.tags.insert(Tag::new(name.to_string())).await?)
    }

    /// Create several tags. Same per-element semantics as category
    /// creation: earlier creations survive a later conflict.
    pub async fn create_many(&self, names: &[String]) -> Result<Vec<Tag>, DomainError> {
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(self.create(name).await?);
        }
        Ok(created)
    }

    /// Whether the named tag exists.
    pub async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.tags.find_by_name(name).await?.is_some())
    }

    /// All tags.
    pub async fn list_all(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.find_all().await?)
    }

    /// Rename a tag. The new name must be free.
    pub async fn rename(&self, name: &str, new_name: &str) -> Result<(), DomainError> {
        let mut tag = self
            .tags
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::TagNotFound(name.to_string()))?;

        if self.tags.find_by_name(new_name).await?.is_some() {
            return Err(DomainError::TagAlreadyExists(new_name.to_string()));
        }

        tag.name = new_name.to_string();
        self.tags.update(tag).await?;
        Ok(())
    }

    /// Delete a tag. Its membership rows cascade; the posts survive.
    pub async fn delete(&self, name: &str) -> Result<(), DomainError> {
        let tag = self
            .tags
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::TagNotFound(name.to_string()))?;

        self.tags.delete(tag.id).await?;
        Ok(())
    }

    /// Attach a tag to the caller's post, creating it if unknown.
    pub async fn add_to_post(
        &self,
        email: &str,
        post_title: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.attach_tag(&post, name).await
    }

    /// Attach several tags to the caller's post.
    pub async fn add_many_to_post(
        &self,
        email: &str,
        post_title: &str,
        names: &[String],
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.attach_tags(&post, names).await
    }

    /// Detach a tag from the caller's post.
    pub async fn remove_from_post(
        &self,
        email: &str,
        post_title: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.detach_tag(&post, name).await
    }
}
