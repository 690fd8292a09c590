//! Route handlers

use super::{ApiError, AppState};
use crate::aggregator::summarize;
use crate::blog::{BlogId, LikesUpdate, NewBlog};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

type HandlerResult<T> = Result<T, ApiError>;

pub(super) async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub(super) async fn list_blogs(
    State(state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let store = state.store.lock().await;
    let blogs = store.list()?;
    Ok(Json(blogs))
}

pub(super) async fn create_blog(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBlog>, JsonRejection>,
) -> HandlerResult<impl IntoResponse> {
    let Json(new_blog) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let blog = new_blog.validate()?;

    let store = state.store.lock().await;
    let record = store.insert(&blog)?;

    tracing::info!(id = %record.id, title = %record.title, "Blog created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub(super) async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<impl IntoResponse> {
    let id = BlogId::new(id);
    let store = state.store.lock().await;

    store
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

pub(super) async fn update_likes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<LikesUpdate>, JsonRejection>,
) -> HandlerResult<impl IntoResponse> {
    let Json(update) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let likes = update.validate()?;
    let id = BlogId::new(id);

    let store = state.store.lock().await;
    let record = store.update_likes(&id, likes)?;

    tracing::info!(id = %id, likes = record.likes, "Blog likes updated");
    Ok(Json(record))
}

pub(super) async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<StatusCode> {
    let id = BlogId::new(id);
    let store = state.store.lock().await;

    store.delete(&id)?;

    tracing::info!(id = %id, "Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn blog_stats(
    State(state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let blogs = state.store.lock().await.list()?;
    Ok(Json(summarize(&blogs)))
}

pub(super) async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}
