use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity - an entry in the folksonomic labeling vocabulary.
///
/// Names are globally unique. Unknown tag names are created on the fly
/// when a post references them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
