//! Category vocabulary management.

use std::sync::Arc;

use crate::domain::Category;
use crate::error::DomainError;
use crate::ports::CategoryRepository;
use crate::service::{AssociationManager, OwnershipGuard};

/// CRUD over the curated category vocabulary, plus the authenticated
/// attach/detach entry points for the caller's posts.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    guard: OwnershipGuard,
    associations: AssociationManager,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        guard: OwnershipGuard,
        associations: AssociationManager,
    ) -> Self {
        Self {
            categories,
            guard,
            associations,
        }
    }

    /// Create a category with a globally unique name.
    pub async fn create(&self, name: &str) -> Result<Category, DomainError> {
        if self.categories.find_by_name(name).await?.is_some() {
            return Err(DomainError::CategoryAlreadyExists(name.to_string()));
        }

        Ok(self.categories.insert(Category::new(name.to_string())).await?)
    }

    /// Create several categories. Elements are processed independently:
    /// categories created before a failing element stay created.
    pub async fn create_many(&self, names: &[String]) -> Result<Vec<Category>, DomainError> {
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(self.create(name).await?);
        }
        Ok(created)
    }

    /// Whether the named category exists.
    pub async fn exists(&self, name: &str) -> Result<bool, DomainError> {
        Ok(self.categories.find_by_name(name).await?.is_some())
    }

    /// All categories.
    pub async fn list_all(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_all().await?)
    }

    /// Rename a category. The new name must be free; renaming onto the
    /// current name is a conflict like any other.
    pub async fn rename(&self, name: &str, new_name: &str) -> Result<(), DomainError> {
        let mut category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))?;

        if self.categories.find_by_name(new_name).await?.is_some() {
            return Err(DomainError::CategoryAlreadyExists(new_name.to_string()));
        }

        category.name = new_name.to_string();
        self.categories.update(category).await?;
        Ok(())
    }

    /// Delete a category. Its membership rows cascade; the posts that
    /// carried it survive.
    pub async fn delete(&self, name: &str) -> Result<(), DomainError> {
        let category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))?;

        self.categories.delete(category.id).await?;
        Ok(())
    }

    /// Attach a category to the caller's post.
    pub async fn add_to_post(
        &self,
        email: &str,
        post_title: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.attach_category(&post, name).await
    }

    /// Attach several categories to the caller's post. Earlier
    /// attachments survive a failure on a later element.
    pub async fn add_many_to_post(
        &self,
        email: &str,
        post_title: &str,
        names: &[String],
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.attach_categories(&post, names).await
    }

    /// Detach a category from the caller's post.
    pub async fn remove_from_post(
        &self,
        email: &str,
        post_title: &str,
        name: &str,
    ) -> Result<(), DomainError> {
        let post = self.guard.require_owned_post(email, post_title).await?;
        self.associations.detach_category(&post, name).await
    }
}
