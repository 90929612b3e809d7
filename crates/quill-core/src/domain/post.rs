use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategorySummary;

/// Post entity - a blog post, optionally filed under a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub category_id: Option<i32>,
    /// The referenced category, loaded alongside the post when it still exists.
    pub category: Option<CategorySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a post. Identifier and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub category_id: Option<i32>,
}

/// A partial post update. `None` leaves the stored value untouched.
///
/// `category_id` is tri-state: `None` keeps the reference, `Some(None)` clears it
/// and `Some(Some(id))` points the post at another category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<Option<i32>>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.category_id.is_none()
    }
}

impl Post {
    /// Apply a partial update in place.
    ///
    /// The category summary is dropped whenever the reference changes; callers
    /// that need it re-read the post.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(category_id) = changes.category_id {
            if category_id != self.category_id {
                self.category = None;
            }
            self.category_id = category_id;
        }
        self.updated_at = now;
    }
}
