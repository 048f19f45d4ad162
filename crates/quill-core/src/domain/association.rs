use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership of a post in a category. One row per (post, category) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCategory {
    pub post_id: Uuid,
    pub category_id: Uuid,
}

/// Membership of a post in a tag. One row per (post, tag) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: Uuid,
    pub tag_id: Uuid,
}
