//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM-backed repositories for PostgreSQL (or any SeaORM backend) and an
//! in-memory store used by tests and local experiments.

pub mod database;

pub use database::{
    DatabaseConfig, InMemoryStore, SeaOrmCategoryRepository, SeaOrmPostRepository, connect,
    create_schema,
};
