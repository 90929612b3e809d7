//! # Quill Shared
//!
//! Wire types shared by the server and any Rust client: request payloads with
//! their validation rules, response bodies and the uniform response envelope.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorDescription, ErrorResponse, PaginationMeta};
