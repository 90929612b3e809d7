//! # Quill Core
//!
//! The domain layer of Quill.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::{FieldError, validate};
