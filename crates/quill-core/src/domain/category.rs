use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - an entry in the curated classification vocabulary.
///
/// Names are globally unique. Unlike tags, categories must be created
/// explicitly before a post can reference them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
