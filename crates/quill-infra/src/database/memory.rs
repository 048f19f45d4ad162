//! In-memory entity store - used as fallback when no database is
//! configured, and as the test double for the core services.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Post, PostCategory, PostTag, Tag, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostCategoryRepository, PostRepository,
    PostTagRepository, TagRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
    comments: Vec<Comment>,
    post_categories: Vec<PostCategory>,
    post_tags: Vec<PostTag>,
}

/// Single-process store keeping every table behind one async RwLock.
///
/// Enforces the same unique constraints and delete cascades as the
/// Postgres schema, so service behavior does not depend on which
/// backend is wired in. Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cascade_post_delete(tables: &mut Tables, post_ids: &[Uuid]) {
    tables
        .post_categories
        .retain(|link| !post_ids.contains(&link.post_id));
    tables
        .post_tags
        .retain(|link| !post_ids.contains(&link.post_id));
    tables
        .comments
        .retain(|comment| !post_ids.contains(&comment.post_id));
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users.email already taken".to_string()));
        }

        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepoError::Constraint("users.email already taken".to_string()));
        }

        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound);
        }

        // same cascades the schema declares on the user foreign keys
        let post_ids: Vec<Uuid> = tables
            .posts
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        tables.posts.retain(|p| p.user_id != id);
        cascade_post_delete(&mut tables, &post_ids);
        tables.comments.retain(|c| c.user_id != id);

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .posts
            .iter()
            .any(|p| p.user_id == post.user_id && p.title == post.title)
        {
            return Err(RepoError::Constraint(
                "posts (user_id, title) already taken".to_string(),
            ));
        }

        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .posts
            .iter()
            .any(|p| p.id != post.id && p.user_id == post.user_id && p.title == post.title)
        {
            return Err(RepoError::Constraint(
                "posts (user_id, title) already taken".to_string(),
            ));
        }

        let slot = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }

        cascade_post_delete(&mut tables, &[id]);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .filter(|p| p.title == title)
            .min_by_key(|p| p.created_at)
            .cloned())
    }

    async fn find_by_title_and_owner(
        &self,
        title: &str,
        user_id: Uuid,
    ) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.title == title && p.user_id == user_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts = tables.posts.clone();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.categories.iter().any(|c| c.name == category.name) {
            return Err(RepoError::Constraint(
                "categories.name already taken".to_string(),
            ));
        }

        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .categories
            .iter()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(RepoError::Constraint(
                "categories.name already taken".to_string(),
            ));
        }

        let slot = tables
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(RepoError::NotFound)?;
        *slot = category.clone();
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Err(RepoError::NotFound);
        }

        tables.post_categories.retain(|link| link.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.clone())
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.iter().any(|t| t.name == tag.name) {
            return Err(RepoError::Constraint("tags.name already taken".to_string()));
        }

        tables.tags.push(tag.clone());
        Ok(tag)
    }

    async fn update(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .tags
            .iter()
            .any(|t| t.id != tag.id && t.name == tag.name)
        {
            return Err(RepoError::Constraint("tags.name already taken".to_string()));
        }

        let slot = tables
            .tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or(RepoError::NotFound)?;
        *slot = tag.clone();
        Ok(tag)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.tags.len();
        tables.tags.retain(|t| t.id != id);
        if tables.tags.len() == before {
            return Err(RepoError::NotFound);
        }

        tables.post_tags.retain(|link| link.tag_id != id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.iter().find(|t| t.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.clone())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id)
            .ok_or(RepoError::NotFound)?;
        *slot = comment.clone();
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_for_post(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id == id && c.post_id == post_id)
            .cloned())
    }

    async fn find_for_post_by_author(
        &self,
        id: Uuid,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .find(|c| c.id == id && c.post_id == post_id && c.user_id == user_id)
            .cloned())
    }

    async fn find_all_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}

#[async_trait]
impl PostCategoryRepository for InMemoryStore {
    async fn find(
        &self,
        post_id: Uuid,
        category_id: Uuid,
    ) -> Result<Option<PostCategory>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .post_categories
            .iter()
            .find(|link| link.post_id == post_id && link.category_id == category_id)
            .copied())
    }

    async fn insert(&self, link: PostCategory) -> Result<PostCategory, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .post_categories
            .iter()
            .any(|l| l.post_id == link.post_id && l.category_id == link.category_id)
        {
            return Err(RepoError::Constraint(
                "post_categories (post_id, category_id) already taken".to_string(),
            ));
        }

        tables.post_categories.push(link);
        Ok(link)
    }

    async fn delete(&self, post_id: Uuid, category_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.post_categories.len();
        tables
            .post_categories
            .retain(|link| !(link.post_id == post_id && link.category_id == category_id));
        if tables.post_categories.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn categories_of_post(&self, post_id: Uuid) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .post_categories
            .iter()
            .filter(|link| link.post_id == post_id)
            .filter_map(|link| {
                tables
                    .categories
                    .iter()
                    .find(|c| c.id == link.category_id)
                    .cloned()
            })
            .collect())
    }

    async fn posts_with_category(&self, category_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .post_categories
            .iter()
            .filter(|link| link.category_id == category_id)
            .filter_map(|link| tables.posts.iter().find(|p| p.id == link.post_id).cloned())
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }
}

#[async_trait]
impl PostTagRepository for InMemoryStore {
    async fn find(&self, post_id: Uuid, tag_id: Uuid) -> Result<Option<PostTag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .post_tags
            .iter()
            .find(|link| link.post_id == post_id && link.tag_id == tag_id)
            .copied())
    }

    async fn insert(&self, link: PostTag) -> Result<PostTag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .post_tags
            .iter()
            .any(|l| l.post_id == link.post_id && l.tag_id == link.tag_id)
        {
            return Err(RepoError::Constraint(
                "post_tags (post_id, tag_id) already taken".to_string(),
            ));
        }

        tables.post_tags.push(link);
        Ok(link)
    }

    async fn delete(&self, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.post_tags.len();
        tables
            .post_tags
            .retain(|link| !(link.post_id == post_id && link.tag_id == tag_id));
        if tables.post_tags.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn tags_of_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .post_tags
            .iter()
            .filter(|link| link.post_id == post_id)
            .filter_map(|link| tables.tags.iter().find(|t| t.id == link.tag_id).cloned())
            .collect())
    }

    async fn posts_with_tag(&self, tag_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .post_tags
            .iter()
            .filter(|link| link.tag_id == tag_id)
            .filter_map(|link| tables.posts.iter().find(|p| p.id == link.post_id).cloned())
            .collect();
        posts.sort_by_key(|p| p.created_at);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn user(email: &str) -> User {
        User::new(
            "Test".to_string(),
            "User".to_string(),
            email.to_string(),
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;

        users.insert(user("a@example.com")).await.unwrap();
        let result = users.insert(user("a@example.com")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_title_uniqueness_is_per_owner() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;

        let alice = users.insert(user("alice@example.com")).await.unwrap();
        let bob = users.insert(user("bob@example.com")).await.unwrap();

        posts
            .insert(Post::new(alice.id, "Diary".to_string(), "a".to_string()))
            .await
            .unwrap();
        let same_owner = posts
            .insert(Post::new(alice.id, "Diary".to_string(), "b".to_string()))
            .await;
        assert!(matches!(same_owner, Err(RepoError::Constraint(_))));

        // another owner may reuse the title
        posts
            .insert(Post::new(bob.id, "Diary".to_string(), "c".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_by_title_prefers_the_oldest_post() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;

        let alice = users.insert(user("alice@example.com")).await.unwrap();
        let bob = users.insert(user("bob@example.com")).await.unwrap();

        let mut old = Post::new(alice.id, "Diary".to_string(), "old".to_string());
        old.created_at = old.created_at - TimeDelta::hours(1);
        let old = posts.insert(old).await.unwrap();
        posts
            .insert(Post::new(bob.id, "Diary".to_string(), "new".to_string()))
            .await
            .unwrap();

        let found = posts.find_by_title("Diary").await.unwrap().unwrap();
        assert_eq!(found.id, old.id);
    }

    #[tokio::test]
    async fn test_post_delete_cascades_links_and_comments() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;
        let categories: &dyn CategoryRepository = &store;
        let comments: &dyn CommentRepository = &store;
        let post_categories: &dyn PostCategoryRepository = &store;

        let owner = users.insert(user("o@example.com")).await.unwrap();
        let post = posts
            .insert(Post::new(owner.id, "Hello".to_string(), "x".to_string()))
            .await
            .unwrap();
        let category = categories
            .insert(Category::new("tech".to_string()))
            .await
            .unwrap();
        post_categories
            .insert(PostCategory {
                post_id: post.id,
                category_id: category.id,
            })
            .await
            .unwrap();
        comments
            .insert(Comment::new(post.id, owner.id, "hi".to_string()))
            .await
            .unwrap();

        BaseRepository::<Post, Uuid>::delete(&store, post.id)
            .await
            .unwrap();

        assert!(post_categories
            .categories_of_post(post.id)
            .await
            .unwrap()
            .is_empty());
        assert!(comments.find_all_for_post(post.id).await.unwrap().is_empty());
        // the category itself survives
        assert!(categories.find_by_name("tech").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_category_delete_cascades_only_its_links() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;
        let categories: &dyn CategoryRepository = &store;
        let post_categories: &dyn PostCategoryRepository = &store;

        let owner = users.insert(user("o@example.com")).await.unwrap();
        let post = posts
            .insert(Post::new(owner.id, "Hello".to_string(), "x".to_string()))
            .await
            .unwrap();
        let category = categories
            .insert(Category::new("tech".to_string()))
            .await
            .unwrap();
        post_categories
            .insert(PostCategory {
                post_id: post.id,
                category_id: category.id,
            })
            .await
            .unwrap();

        BaseRepository::<Category, Uuid>::delete(&store, category.id)
            .await
            .unwrap();

        assert!(post_categories
            .categories_of_post(post.id)
            .await
            .unwrap()
            .is_empty());
        assert!(posts.find_by_title("Hello").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_membership_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        let users: &dyn UserRepository = &store;
        let posts: &dyn PostRepository = &store;
        let tags: &dyn TagRepository = &store;
        let post_tags: &dyn PostTagRepository = &store;

        let owner = users.insert(user("o@example.com")).await.unwrap();
        let post = posts
            .insert(Post::new(owner.id, "Hello".to_string(), "x".to_string()))
            .await
            .unwrap();
        let tag = tags.insert(Tag::new("rust".to_string())).await.unwrap();

        let link = PostTag {
            post_id: post.id,
            tag_id: tag.id,
        };
        post_tags.insert(link).await.unwrap();
        let duplicate = post_tags.insert(link).await;
        assert!(matches!(duplicate, Err(RepoError::Constraint(_))));
    }
}
