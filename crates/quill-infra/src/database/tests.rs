use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

use quill_core::domain::{Category, PageRequest, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};

use crate::database::entity::{category, post};
use crate::database::sea_orm_repo::{SeaOrmCategoryRepository, SeaOrmPostRepository};

fn timestamp() -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap().into()
}

fn post_model(id: i32, category_id: Option<i32>) -> post::Model {
    post::Model {
        id,
        title: "Hello World".to_owned(),
        body: "This is a test body.".to_owned(),
        category_id,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn category_model(id: i32, name: &str) -> category::Model {
    category::Model {
        id,
        name: name.to_owned(),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_with_category() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(post_model(1, Some(1)), category_model(1, "Tech"))]])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Hello World");
    assert_eq!(post.category_id, Some(1));
    assert_eq!(post.category.unwrap().name, "Tech");
}

#[tokio::test]
async fn test_find_missing_category() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<category::Model>::new()])
        .into_connection();

    let repo = SeaOrmCategoryRepository::new(db);

    let result: Option<Category> = repo.find_by_id(9).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_categories_reports_total() {
    let count_row = BTreeMap::from([("num_items", Value::BigInt(Some(12)))]);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![count_row]])
        .append_query_results(vec![vec![category_model(12, "Rust"), category_model(11, "Go")]])
        .into_connection();

    let repo = SeaOrmCategoryRepository::new(db);
    let request = PageRequest::new(Some(1), Some(2), None, 100);

    let page = repo.list(&request).await.unwrap();

    assert_eq!(page.total_items, 12);
    assert_eq!(page.total_pages(), 6);
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rust", "Go"]);
}

#[tokio::test]
async fn test_create_category_returns_stored_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category_model(1, "Tech")]])
        .into_connection();

    let repo = SeaOrmCategoryRepository::new(db);

    let created = repo
        .create(quill_core::domain::NewCategory {
            name: "Tech".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Tech");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    let result = repo
        .update(
            5,
            PostChanges {
                title: Some("New title".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_category_detaches_posts_first() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let repo = SeaOrmCategoryRepository::new(db);

    repo.delete(1).await.unwrap();

    // one UPDATE on posts, one DELETE on categories
    assert_eq!(repo.db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = SeaOrmPostRepository::new(db);

    assert!(matches!(repo.delete(3).await, Err(RepoError::NotFound)));
}
