//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, Condition, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use quill_core::domain::{
    Category, CategoryChanges, NewCategory, NewPost, Page, PageRequest, Post, PostChanges,
};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::sea_orm_base::{SeaOrmRepository, map_db_err};

/// SeaORM post repository.
pub type SeaOrmPostRepository = SeaOrmRepository<PostEntity>;

/// SeaORM category repository.
pub type SeaOrmCategoryRepository = SeaOrmRepository<CategoryEntity>;

#[async_trait]
impl BaseRepository<Post, i32> for SeaOrmPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding post by id");

        let result = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(|(post, category)| post.into_domain(category)))
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Post>, RepoError> {
        let mut condition = Condition::all();
        if let Some(search) = &request.search {
            condition = condition.add(post::Column::Title.contains(search));
        }

        let total = PostEntity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        let rows = PostEntity::find()
            .filter(condition)
            .find_also_related(CategoryEntity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(request.per_page)
            .offset(request.offset())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            page = request.page,
            per_page = request.per_page,
            total,
            "Listed posts"
        );

        let items = rows
            .into_iter()
            .map(|(post, category)| post.into_domain(category))
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        self.delete_row(id).await
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            title: Set(post.title),
            body: Set(post.body),
            category_id: Set(post.category_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post inserted");

        // Re-read to pick up the category summary.
        self.find_by_id(model.id).await?.ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<(), RepoError> {
        let mut active = post::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }

        active.update(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(post_id = id, "Post updated");
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Category, i32> for SeaOrmCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        tracing::debug!(category_id = id, "Finding category by id");

        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Category>, RepoError> {
        let mut condition = Condition::all();
        if let Some(search) = &request.search {
            condition = condition.add(category::Column::Name.contains(search));
        }

        let total = CategoryEntity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        let rows = CategoryEntity::find()
            .filter(condition)
            .order_by_desc(category::Column::CreatedAt)
            .order_by_desc(category::Column::Id)
            .limit(request.per_page)
            .offset(request.offset())
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    /// Clears the reference on dependent posts, then removes the category.
    /// The two statements are separate round trips.
    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let detached = PostEntity::update_many()
            .col_expr(post::Column::CategoryId, Expr::value(Option::<i32>::None))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::CategoryId.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(
            category_id = id,
            detached_posts = detached.rows_affected,
            "Cleared category reference on posts"
        );

        self.delete_row(id).await
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError> {
        let model = category::ActiveModel {
            name: Set(category.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(category_id = model.id, "Category inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: CategoryChanges) -> Result<(), RepoError> {
        let mut active = category::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(name) = changes.name {
            active.name = Set(name);
        }

        active.update(&self.db).await.map_err(map_db_err)?;
        tracing::debug!(category_id = id, "Category updated");
        Ok(())
    }
}
