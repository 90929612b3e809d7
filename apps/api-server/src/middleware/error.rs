//! Error handling - maps every failure onto the uniform error envelope.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError,
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    web,
};
use std::fmt;

use quill_core::{DomainError, FieldError, RepoError};
use quill_shared::ErrorResponse;

/// Application-level error type that converts to `{success: false, ...}` responses.
#[derive(Debug)]
pub enum AppError {
    /// Unparseable input (body, path or query string).
    BadRequest {
        message: String,
        description: String,
    },
    Validation(Vec<FieldError>),
    NotFound {
        message: String,
        description: String,
    },
    /// Store or other internal failure. `detail` is logged, never returned.
    Internal { message: String, detail: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, description: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            description: description.into(),
        }
    }

    /// Wrap a repository failure with the handler's own message.
    ///
    /// A row vanishing between the existence check and the write is still a 404.
    pub fn store(message: impl Into<String>, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound {
                message: message.into(),
                description: "The requested resource does not exist".to_string(),
            },
            other => AppError::Internal {
                message: message.into(),
                detail: other.to_string(),
            },
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message,
            AppError::Validation(_) => "Validation failed",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest { description, .. } => {
                write!(f, "{}: {}", self.message(), description)
            }
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::NotFound { description, .. } => {
                write!(f, "{}: {}", self.message(), description)
            }
            AppError::Internal { detail, .. } => write!(f, "{}: {}", self.message(), detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest {
                message,
                description,
            }
            | AppError::NotFound {
                message,
                description,
            } => ErrorResponse::new(message.as_str(), description.as_str()),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::Internal { message, detail } => {
                tracing::error!(error = %detail, "{}", message);
                ErrorResponse::new(message.as_str(), "Database error")
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => AppError::NotFound {
                message: format!("{} not found", entity_type),
                description: format!("{} with id {} does not exist", entity_type, id),
            },
            DomainError::Validation(errors) => AppError::Validation(errors),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed JSON bodies become `400 Cannot parse JSON`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::bad_request("Cannot parse JSON", err.to_string()).into()
    })
}

/// Non-numeric page/limit values become `400 Invalid query parameters`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::bad_request("Invalid query parameters", err.to_string()).into()
    })
}

/// Non-integer ids become `400 Invalid identifier`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        AppError::bad_request("Invalid identifier", err.to_string()).into()
    })
}
