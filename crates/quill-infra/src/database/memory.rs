//! In-memory repositories - used by tests and when experimenting without a database.
//!
//! Both repositories share one [`InMemoryStore`] so that the category
//! reference rules (existence on write, clearing on delete) hold the same way
//! the database enforces them.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{
    Category, CategoryChanges, NewCategory, NewPost, Page, PageRequest, Post, PostChanges,
};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i32, Post>,
    categories: BTreeMap<i32, Category>,
    last_post_id: i32,
    last_category_id: i32,
}

impl Tables {
    /// Attach the current category summary, mirroring the SQL join.
    fn hydrate(&self, post: &Post) -> Post {
        let mut post = post.clone();
        post.category = post
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(Category::summary);
        post
    }

    fn check_category(&self, category_id: Option<i32>) -> Result<(), RepoError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(RepoError::Constraint(format!(
                "category {} does not exist",
                id
            ))),
            _ => Ok(()),
        }
    }
}

/// Shared tables behind the in-memory repositories.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn post_repository(self: &Arc<Self>) -> InMemoryPostRepository {
        InMemoryPostRepository {
            store: Arc::clone(self),
        }
    }

    pub fn category_repository(self: &Arc<Self>) -> InMemoryCategoryRepository {
        InMemoryCategoryRepository {
            store: Arc::clone(self),
        }
    }
}

/// Newest first, ties broken by id, then sliced to the requested page.
fn paginate<T>(
    mut rows: Vec<T>,
    request: &PageRequest,
    key: impl Fn(&T) -> (chrono::DateTime<Utc>, i32),
) -> Page<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(request.offset() as usize)
        .take(request.per_page as usize)
        .collect();
    Page::new(items, request, total)
}

fn contains_term(haystack: &str, search: &Option<String>) -> bool {
    search.as_deref().is_none_or(|needle| haystack.contains(needle))
}

pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).map(|post| tables.hydrate(post)))
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let rows = tables
            .posts
            .values()
            .filter(|post| contains_term(&post.title, &request.search))
            .map(|post| tables.hydrate(post))
            .collect();
        Ok(paginate(rows, request, |post| (post.created_at, post.id)))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.check_category(post.category_id)?;

        tables.last_post_id += 1;
        let now = Utc::now();
        let stored = Post {
            id: tables.last_post_id,
            title: post.title,
            body: post.body,
            category_id: post.category_id,
            category: None,
            created_at: now,
            updated_at: now,
        };
        let created = tables.hydrate(&stored);
        tables.posts.insert(stored.id, stored);
        Ok(created)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if let Some(category_id) = changes.category_id {
            tables.check_category(category_id)?;
        }

        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(changes, Utc::now());
        Ok(())
    }
}

pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl BaseRepository<Category, i32> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        let rows = tables
            .categories
            .values()
            .filter(|category| contains_term(&category.name, &request.search))
            .cloned()
            .collect();
        Ok(paginate(rows, request, |category| {
            (category.created_at, category.id)
        }))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let now = Utc::now();
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.apply(
                    PostChanges {
                        category_id: Some(None),
                        ..Default::default()
                    },
                    now,
                );
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.last_category_id += 1;

        let now = Utc::now();
        let created = Category {
            id: tables.last_category_id,
            name: category.name,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        let category = tables.categories.get_mut(&id).ok_or(RepoError::NotFound)?;
        category.apply(changes, Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, category_id: Option<i32>) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: "This is a test body.".to_string(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_attaches_category() {
        let store = InMemoryStore::new();
        let categories = store.category_repository();
        let posts = store.post_repository();

        let tech = categories
            .create(NewCategory {
                name: "Tech".to_string(),
            })
            .await
            .unwrap();
        let post = posts.create(new_post("Hello World", Some(tech.id))).await.unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.category, Some(tech.summary()));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let store = InMemoryStore::new();
        let posts = store.post_repository();

        let result = posts.create(new_post("Hello World", Some(42))).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_category_clears_references() {
        let store = InMemoryStore::new();
        let categories = store.category_repository();
        let posts = store.post_repository();

        let tech = categories
            .create(NewCategory {
                name: "Tech".to_string(),
            })
            .await
            .unwrap();
        for title in ["First", "Second", "Third"] {
            posts.create(new_post(title, Some(tech.id))).await.unwrap();
        }

        categories.delete(tech.id).await.unwrap();

        let page = posts.list(&PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 3);
        assert!(
            page.items
                .iter()
                .all(|p| p.category_id.is_none() && p.category.is_none())
        );
    }

    #[tokio::test]
    async fn test_list_search_and_pages() {
        let store = InMemoryStore::new();
        let posts = store.post_repository();
        for i in 0..5 {
            posts.create(new_post(&format!("Rust {}", i), None)).await.unwrap();
        }
        posts.create(new_post("Gardening", None)).await.unwrap();

        let request = PageRequest::new(Some(2), Some(2), Some("Rust".to_string()), 100);
        let page = posts.list(&request).await.unwrap();

        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages(), 3);
        // ids 1..=5 newest first: 5 4 | 3 2 | 1
        let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let store = InMemoryStore::new();
        let posts = store.post_repository();

        let result = posts.update(7, PostChanges::default()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
