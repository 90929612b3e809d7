use async_trait::async_trait;

use crate::domain::{
    Category, CategoryChanges, NewCategory, NewPost, Page, PageRequest, Post, PostChanges,
};
use crate::error::RepoError;

/// Read and delete operations shared by every resource.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// One page of entities, newest first, filtered by the request's search term.
    async fn list(&self, request: &PageRequest) -> Result<Page<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. Posts are always returned with their category summary.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update; the caller re-reads to observe the result.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError>;
}

/// Category repository. Deleting a category clears the reference on its posts.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i32> {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<(), RepoError>;
}
