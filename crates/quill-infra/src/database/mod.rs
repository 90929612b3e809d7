//! Database connection management, schema creation and repositories.

mod connections;
mod memory;
mod schema;
mod sea_orm_base;
mod sea_orm_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use memory::{InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore};
pub use schema::create_schema;
pub use sea_orm_base::SeaOrmRepository;
pub use sea_orm_repo::{SeaOrmCategoryRepository, SeaOrmPostRepository};

#[cfg(test)]
mod tests;
