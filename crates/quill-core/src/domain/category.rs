use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - groups posts. Posts referencing it are derived, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a category embedded in post responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
}

/// A partial category update. `None` leaves the stored name untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub name: Option<String>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl Category {
    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn apply(&mut self, changes: CategoryChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        self.updated_at = now;
    }
}
