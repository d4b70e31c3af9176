//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{Page, Post, PostInput};
use quill_shared::ApiResponse;
use quill_shared::dto::{PageResponse, PostResponse, RestoreAllResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub published_only: Option<String>,
    pub page: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
}

/// GET /v1/posts
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListParams>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();
    let published_only = match params.published_only.as_deref() {
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            AppError::Unprocessable("The published_only field must be true or false.".to_string())
        })?,
        None => false,
    };

    let page = state
        .posts
        .list_posts(published_only, params.page.unwrap_or(1))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_page(page))))
}

/// POST /v1/posts
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create_post(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post created successfully.",
    )))
}

/// GET /v1/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.find_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PUT|PATCH /v1/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update_post(path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post updated successfully.",
    )))
}

/// DELETE /v1/posts/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.delete_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post deleted successfully.",
    )))
}

/// POST /v1/posts/{id}/restore
pub async fn restore(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .restore(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found or not trashed.".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post restored successfully.",
    )))
}

/// DELETE /v1/posts/{id}/force
pub async fn force_delete(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.purge(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post permanently deleted.",
    )))
}

/// GET /v1/posts/trashed
pub async fn trashed(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list_trashed(query.page.unwrap_or(1))
        .await?;

    if page.is_empty() {
        return Err(DomainError::NothingToDo("No trashed posts.").into());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_page(page),
        "Trashed posts retrieved.",
    )))
}

/// POST /v1/posts/restore-all
pub async fn restore_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let restored_count = state.posts.restore_all().await?;

    if restored_count == 0 {
        return Err(DomainError::NothingToDo("No trashed posts to restore.").into());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        RestoreAllResponse { restored_count },
        "All trashed posts have been restored.",
    )))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

fn to_response(post: Post) -> PostResponse {
    let deleted_at = post.deleted_at();
    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        body: post.body,
        is_published: post.is_published,
        published_date: post.published_date,
        meta_description: post.meta_description,
        tags: post.tags,
        keywords: post.keywords,
        deleted_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn to_page(page: Page<Post>) -> PageResponse<PostResponse> {
    let last_page = page.last_page();
    let page = page.map(to_response);
    PageResponse {
        items: page.items,
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        last_page,
    }
}
