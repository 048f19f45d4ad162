//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Post, PostCategory, PostTag, Tag, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    CategoryRepository, CommentRepository, PostCategoryRepository, PostRepository,
    PostTagRepository, TagRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_category::{self, Entity as PostCategoryEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity, user::ActiveModel>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity, post::ActiveModel>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity, category::ActiveModel>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity, tag::ActiveModel>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity, comment::ActiveModel>;

// Mask email for logging to avoid PII in logs
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Title.eq(title))
            .order_by_asc(post::Column::CreatedAt)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_title_and_owner(
        &self,
        title: &str,
        user_id: Uuid,
    ) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Title.eq(title))
            .filter(post::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_for_post(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::Id.eq(id))
            .filter(comment::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_for_post_by_author(
        &self,
        id: Uuid,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::Id.eq(id))
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_all_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL post/category bridge repository. The composite key does not
/// fit the generic base, so this one is written out by hand.
pub struct PostgresPostCategoryRepository {
    db: DbConn,
}

impl PostgresPostCategoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostCategoryRepository for PostgresPostCategoryRepository {
    async fn find(
        &self,
        post_id: Uuid,
        category_id: Uuid,
    ) -> Result<Option<PostCategory>, RepoError> {
        let result = PostCategoryEntity::find_by_id((post_id, category_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, link: PostCategory) -> Result<PostCategory, RepoError> {
        let active_model: post_category::ActiveModel = link.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, post_id: Uuid, category_id: Uuid) -> Result<(), RepoError> {
        let result = PostCategoryEntity::delete_by_id((post_id, category_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn categories_of_post(&self, post_id: Uuid) -> Result<Vec<Category>, RepoError> {
        let rows = PostCategoryEntity::find()
            .filter(post_category::Column::PostId.eq(post_id))
            .find_also_related(CategoryEntity)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, category)| category.map(Into::into))
            .collect())
    }

    async fn posts_with_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = PostCategoryEntity::find()
            .filter(post_category::Column::CategoryId.eq(category_id))
            .find_also_related(PostEntity)
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, found)| found.map(Into::into))
            .collect())
    }
}

/// PostgreSQL post/tag bridge repository.
pub struct PostgresPostTagRepository {
    db: DbConn,
}

impl PostgresPostTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostTagRepository for PostgresPostTagRepository {
    async fn find(&self, post_id: Uuid, tag_id: Uuid) -> Result<Option<PostTag>, RepoError> {
        let result = PostTagEntity::find_by_id((post_id, tag_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, link: PostTag) -> Result<PostTag, RepoError> {
        let active_model: post_tag::ActiveModel = link.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let result = PostTagEntity::delete_by_id((post_id, tag_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn tags_of_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .find_also_related(TagEntity)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, tag)| tag.map(Into::into))
            .collect())
    }

    async fn posts_with_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = PostTagEntity::find()
            .filter(post_tag::Column::TagId.eq(tag_id))
            .find_also_related(PostEntity)
            .order_by_asc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, found)| found.map(Into::into))
            .collect())
    }
}
