//! Membership management between posts and the two vocabularies.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, Post, PostCategory, PostTag, Tag};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostCategoryRepository, PostTagRepository, TagRepository};

/// Maintains the bridge rows linking posts to categories and tags.
///
/// The two association kinds are deliberately asymmetric: categories are
/// a curated vocabulary and must exist before they can be attached; tags
/// are created on the fly when an unknown name is attached.
#[derive(Clone)]
pub struct AssociationManager {
    categories: Arc<dyn CategoryRepository>,
    tags: Arc<dyn TagRepository>,
    post_categories: Arc<dyn PostCategoryRepository>,
    post_tags: Arc<dyn PostTagRepository>,
}

impl AssociationManager {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
        post_categories: Arc<dyn PostCategoryRepository>,
        post_tags: Arc<dyn PostTagRepository>,
    ) -> Self {
        Self {
            categories,
            tags,
            post_categories,
            post_tags,
        }
    }

    /// Attach an existing category to a post.
    pub async fn attach_category(&self, post: &Post, name: &str) -> Result<(), DomainError> {
        let category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))?;

        if self
            .post_categories
            .find(post.id, category.id)
            .await?
            .is_some()
        {
            return Err(DomainError::CategoryAlreadyOnPost {
                post: post.title.clone(),
                category: name.to_string(),
            });
        }

        self.post_categories
            .insert(PostCategory {
                post_id: post.id,
                category_id: category.id,
            })
            .await?;

        Ok(())
    }

    /// Detach a category from a post.
    pub async fn detach_category(&self, post: &Post, name: &str) -> Result<(), DomainError> {
        let category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))?;

        if self
            .post_categories
            .find(post.id, category.id)
            .await?
            .is_none()
        {
            return Err(DomainError::CategoryNotOnPost {
                post: post.title.clone(),
                category: name.to_string(),
            });
        }

        self.post_categories.delete(post.id, category.id).await?;
        Ok(())
    }

    /// Attach a tag to a post, creating the tag if the name is unknown.
    pub async fn attach_tag(&self, post: &Post, name: &str) -> Result<(), DomainError> {
        let tag = self.resolve_or_create_tag(name).await?;

        if self.post_tags.find(post.id, tag.id).await?.is_some() {
            return Err(DomainError::TagAlreadyOnPost {
                post: post.title.clone(),
                tag: name.to_string(),
            });
        }

        self.post_tags
            .insert(PostTag {
                post_id: post.id,
                tag_id: tag.id,
            })
            .await?;

        Ok(())
    }

    /// Detach a tag from a post. Unknown names are an error here; the
    /// detach path never creates tags.
    pub async fn detach_tag(&self, post: &Post, name: &str) -> Result<(), DomainError> {
        let tag = self
            .tags
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::TagNotFound(name.to_string()))?;

        if self.post_tags.find(post.id, tag.id).await?.is_none() {
            return Err(DomainError::TagNotOnPost {
                post: post.title.clone(),
                tag: name.to_string(),
            });
        }

        self.post_tags.delete(post.id, tag.id).await?;
        Ok(())
    }

    /// Attach several categories. Elements are applied independently, so
    /// a failure does not undo earlier attachments.
    pub async fn attach_categories(&self, post: &Post, names: &[String]) -> Result<(), DomainError> {
        for name in names {
            self.attach_category(post, name).await?;
        }
        Ok(())
    }

    /// Attach several tags, creating unknown ones. Same per-element
    /// semantics as [`attach_categories`](Self::attach_categories).
    pub async fn attach_tags(&self, post: &Post, names: &[String]) -> Result<(), DomainError> {
        for name in names {
            self.attach_tag(post, name).await?;
        }
        Ok(())
    }

    /// Resolve every name to an existing category before any write. One
    /// unknown name fails the whole set.
    pub async fn resolve_categories(
        &self,
        names: &BTreeSet<String>,
    ) -> Result<Vec<Category>, DomainError> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let category = self
                .categories
                .find_by_name(name)
                .await?
                .ok_or_else(|| DomainError::CategoryNotFound(name.clone()))?;
            resolved.push(category);
        }
        Ok(resolved)
    }

    /// Resolve every name to a tag, creating the missing ones. Tags
    /// created here are ordinary vocabulary entries and survive even if
    /// the surrounding operation later fails.
    pub async fn resolve_or_create_tags(
        &self,
        names: &BTreeSet<String>,
    ) -> Result<Vec<Tag>, DomainError> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            resolved.push(self.resolve_or_create_tag(name).await?);
        }
        Ok(resolved)
    }

    /// Write bridge rows for pre-resolved categories.
    pub async fn link_categories(
        &self,
        post_id: Uuid,
        categories: &[Category],
    ) -> Result<(), DomainError> {
        for category in categories {
            self.post_categories
                .insert(PostCategory {
                    post_id,
                    category_id: category.id,
                })
                .await?;
        }
        Ok(())
    }

    /// Write bridge rows for pre-resolved tags.
    pub async fn link_tags(&self, post_id: Uuid, tags: &[Tag]) -> Result<(), DomainError> {
        for tag in tags {
            self.post_tags
                .insert(PostTag {
                    post_id,
                    tag_id: tag.id,
                })
                .await?;
        }
        Ok(())
    }

    /// Names of the categories on a post, for response projections.
    pub async fn category_names(&self, post_id: Uuid) -> Result<Vec<String>, DomainError> {
        Ok(self
            .post_categories
            .categories_of_post(post_id)
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect())
    }

    /// Names of the tags on a post.
    pub async fn tag_names(&self, post_id: Uuid) -> Result<Vec<String>, DomainError> {
        Ok(self
            .post_tags
            .tags_of_post(post_id)
            .await?
            .into_iter()
            .map(|tag| tag.name)
            .collect())
    }

    /// Posts carrying the named category.
    pub async fn posts_in_category(&self, name: &str) -> Result<Vec<Post>, DomainError> {
        let category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))?;

        Ok(self.post_categories.posts_with_category(category.id).await?)
    }

    /// Posts carrying the named tag.
    pub async fn posts_with_tag(&self, name: &str) -> Result<Vec<Post>, DomainError> {
        let tag = self
            .tags
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::TagNotFound(name.to_string()))?;

        Ok(self.post_tags.posts_with_tag(tag.id).await?)
    }

    async fn resolve_or_create_tag(&self, name: &str) -> Result<Tag, DomainError> {
        match self.tags.find_by_name(name).await? {
            Some(tag) => Ok(tag),
            None => Ok(self.tags.insert(Tag::new(name.to_string())).await?),
        }
    }
}
