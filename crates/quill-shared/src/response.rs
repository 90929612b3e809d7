//! Uniform response envelope.
//!
//! Every body carries `success` and `message`; successful bodies may add
//! `data` and, for lists, `meta`; error bodies add `description`.

use serde::{Deserialize, Serialize};

use quill_core::FieldError;
use quill_core::domain::Page;

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paginated(page: Page<T>, message: impl Into<String>) -> Self {
        let meta = PaginationMeta::from_page(&page);
        Self {
            success: true,
            message: message.into(),
            data: Some(page.items),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub total_pages: u64,
    pub per_page: u64,
    pub total_items: u64,
}

impl PaginationMeta {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages(),
            per_page: page.per_page,
            total_items: page.total_items,
        }
    }
}

/// Error body: `{"success": false, "message", "description"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub description: ErrorDescription,
}

/// Free-text detail, or the structured list of violated field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDescription {
    Text(String),
    Fields(Vec<FieldError>),
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            description: ErrorDescription::Text(description.into()),
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Validation failed".to_string(),
            description: ErrorDescription::Fields(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::PageRequest;
    use serde_json::json;

    #[test]
    fn test_message_only_has_no_data() {
        let json = serde_json::to_value(ApiResponse::message("Post deleted successfully.")).unwrap();
        assert_eq!(
            json,
            json!({ "success": true, "message": "Post deleted successfully." })
        );
    }

    #[test]
    fn test_paginated_meta() {
        let request = PageRequest::new(Some(2), Some(10), None, 100);
        let page = Page::new(vec![1, 2, 3], &request, 23);

        let json = serde_json::to_value(ApiResponse::paginated(page, "Posts fetched successfully"))
            .unwrap();

        assert_eq!(json["data"], json!([1, 2, 3]));
        assert_eq!(
            json["meta"],
            json!({ "page": 2, "total_pages": 3, "per_page": 10, "total_items": 23 })
        );
    }

    #[test]
    fn test_validation_error_shape() {
        let body = ErrorResponse::validation(vec![FieldError::new("title", "length")]);
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "message": "Validation failed",
                "description": [{ "field": "title", "rule": "length" }],
            })
        );
    }

    #[test]
    fn test_text_error_shape() {
        let json =
            serde_json::to_value(ErrorResponse::new("Post not found", "no post with id 9")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["description"], "no post with id 9");
        assert!(json.get("data").is_none());
    }
}
