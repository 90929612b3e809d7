//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use quill_core::domain::{
    Category, CategoryChanges, CategorySummary, NewCategory, NewPost, Post, PostChanges,
};

/// Query string accepted by every list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1))]
    pub limit: Option<u64>,
    pub search: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(required, length(min = 3, max = 100))]
    pub title: Option<String>,
    #[validate(required, length(min = 10))]
    pub body: Option<String>,
    pub category_id: Option<i32>,
}

impl CreatePostRequest {
    /// Convert a payload that already passed validation.
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            category_id: self.category_id,
        }
    }
}

/// Request to update a post. Absent fields are left untouched; an explicit
/// `"category_id": null` detaches the post from its category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 3, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 10))]
    pub body: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<Option<i32>>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            category_id: req.category_id,
        }
    }
}

/// Request to create a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(required, length(min = 3, max = 100))]
    pub name: Option<String>,
}

impl CreateCategoryRequest {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name.unwrap_or_default(),
        }
    }
}

/// Request to update a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 3, max = 100))]
    pub name: Option<String>,
}

impl From<UpdateCategoryRequest> for CategoryChanges {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self { name: req.name }
    }
}

/// Category as embedded in a post response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBrief {
    pub id: i32,
    pub name: String,
}

impl From<CategorySummary> for CategoryBrief {
    fn from(summary: CategorySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
        }
    }
}

/// Response containing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryBrief>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            category_id: post.category_id,
            // A summary whose id no longer matches the reference is stale.
            category: post
                .category
                .filter(|c| Some(c.id) == post.category_id)
                .map(Into::into),
            created_at: rfc3339(&post.created_at),
            updated_at: rfc3339(&post.updated_at),
        }
    }
}

/// Response containing a category. The name is exposed as `title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    #[serde(rename = "title")]
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: rfc3339(&category.created_at),
            updated_at: rfc3339(&category.updated_at),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
    pub status: u16,
}

fn rfc3339(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
