//! Category handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Category, CategoryChanges, PageRequest};
use quill_core::ports::{BaseRepository, CategoryRepository};
use quill_core::{DomainError, validate};
use quill_shared::ApiResponse;
use quill_shared::dto::{
    CategoryResponse, CreateCategoryRequest, ListQuery, UpdateCategoryRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /categories
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    validate(&query)?;

    let request = PageRequest::new(query.page, query.limit, query.search, state.max_page_size);
    let page = state
        .categories
        .list(&request)
        .await
        .map_err(|e| AppError::store("Could not fetch categories", e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page.map(CategoryResponse::from),
        "Categories fetched successfully",
    )))
}

/// POST /categories
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let category = state
        .categories
        .create(req.into_new_category())
        .await
        .map_err(|e| AppError::store("Could not create category", e))?;

    tracing::info!(category_id = category.id, "Category created");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        CategoryResponse::from(category),
        "Category created successfully",
    )))
}

/// GET /categories/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let category = find_category(&state, path.into_inner(), "Error fetching category").await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        CategoryResponse::from(category),
        "Category fetched successfully",
    )))
}

/// PUT /categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_category(&state, id, "Error fetching category").await?;

    let req = body.into_inner();
    validate(&req)?;

    let changes = CategoryChanges::from(req);
    if changes.is_empty() {
        tracing::debug!(category_id = id, "Update carries no fields, only updated_at moves");
    }

    state
        .categories
        .update(id, changes)
        .await
        .map_err(|e| AppError::store("Could not update category", e))?;

    let category = find_category(&state, id, "Error fetching updated category").await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        CategoryResponse::from(category),
        "Category updated successfully.",
    )))
}

/// DELETE /categories/{id}
///
/// Posts filed under the category survive with their reference cleared.
pub async fn destroy(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_category(&state, id, "Error checking category").await?;

    state
        .categories
        .delete(id)
        .await
        .map_err(|e| AppError::store("Could not delete category", e))?;

    tracing::info!(category_id = id, "Category deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Category deleted successfully.")))
}

async fn find_category(state: &AppState, id: i32, failure: &str) -> AppResult<Category> {
    state
        .categories
        .find_by_id(id)
        .await
        .map_err(|e| AppError::store(failure, e))?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Category",
                id,
            }
            .into()
        })
}
