use serde::{Deserialize, Serialize};

use localshop_core::{CategoryId, Entity};

/// Grouping label for products.
///
/// Products reference categories by name; nothing ties the two together, so
/// deleting a category leaves products pointing at a name that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    /// Display-only. Set when the category is created and never recomputed.
    pub count: u32,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
            count: 0,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}
