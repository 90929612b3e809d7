//! Post handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::{PageRequest, Post, PostChanges};
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::{DomainError, validate};
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, ListQuery, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    validate(&query)?;

    let request = PageRequest::new(query.page, query.limit, query.search, state.max_page_size);
    let page = state
        .posts
        .list(&request)
        .await
        .map_err(|e| AppError::store("Could not fetch posts", e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(
        page.map(PostResponse::from),
        "Posts fetched successfully",
    )))
}

/// POST /posts
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let post = state
        .posts
        .create(req.into_new_post())
        .await
        .map_err(|e| AppError::store("Could not create post", e))?;

    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        PostResponse::from(post),
        "Post created successfully.",
    )))
}

/// GET /posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let post = find_post(&state, path.into_inner(), "Error fetching post").await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        PostResponse::from(post),
        "Post fetched successfully.",
    )))
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_post(&state, id, "Error fetching post").await?;

    let req = body.into_inner();
    validate(&req)?;

    let changes = PostChanges::from(req);
    if changes.is_empty() {
        tracing::debug!(post_id = id, "Update carries no fields, only updated_at moves");
    }

    state
        .posts
        .update(id, changes)
        .await
        .map_err(|e| AppError::store("Could not update post", e))?;

    let post = find_post(&state, id, "Error fetching updated post").await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        PostResponse::from(post),
        "Post updated successfully.",
    )))
}

/// DELETE /posts/{id}
pub async fn destroy(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    find_post(&state, id, "Error checking post").await?;

    state
        .posts
        .delete(id)
        .await
        .map_err(|e| AppError::store("Could not delete post", e))?;

    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully.")))
}

async fn find_post(state: &AppState, id: i32, failure: &str) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await
        .map_err(|e| AppError::store(failure, e))?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Post",
                id,
            }
            .into()
        })
}
