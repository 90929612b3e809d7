//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use quill_core::ports::{CategoryRepository, PostRepository};
use quill_infra::database::InMemoryStore;
use quill_infra::{SeaOrmCategoryRepository, SeaOrmPostRepository, connect, create_schema};

use crate::config::AppConfig;

/// Shared application state. Built once at startup and handed to every worker.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub max_page_size: u64,
}

impl AppState {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        max_page_size: u64,
    ) -> Self {
        Self {
            posts,
            categories,
            max_page_size,
        }
    }

    /// Connect to the configured database, create the tables and build the
    /// SeaORM repositories on top of the shared pool.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database)
            .await
            .context("failed to connect to database")?;
        create_schema(&db)
            .await
            .context("failed to create database schema")?;

        tracing::info!("Application state initialized");

        Ok(Self::new(
            Arc::new(SeaOrmPostRepository::new(db.clone())),
            Arc::new(SeaOrmCategoryRepository::new(db)),
            config.max_page_size,
        ))
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(max_page_size: u64) -> Self {
        let store = InMemoryStore::new();
        Self::new(
            Arc::new(store.post_repository()),
            Arc::new(store.category_repository()),
            max_page_size,
        )
    }
}
