use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Path, State as AxumState},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use tracing::info;

use crate::{
    error::AppError,
    export::{CSV_FILENAME, to_csv},
    feedback::FeedbackEntry,
    state::State,
    utils::get_feedback_from_body,
};

#[derive(Serialize)]
pub struct ListResponse {
    pub ok: bool,
    pub data: Vec<FeedbackEntry>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub item: FeedbackEntry,
}

#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

pub async fn list_feedback(AxumState(state): AxumState<Arc<State>>) -> impl IntoResponse {
    let data = state.store.read().await.load_all().await;

    Json(ListResponse { ok: true, data })
}

pub async fn create_feedback(
    AxumState(state): AxumState<Arc<State>>,
    body: Body,
) -> Result<impl IntoResponse, AppError> {
    let input = get_feedback_from_body(body).await?;

    // id and createdAt are assigned under the lock so list order matches creation order
    let item = {
        let store = state.store.write().await;
        let item = FeedbackEntry::create(input);
        let mut data = store.load_all().await;
        data.insert(0, item.clone());
        store.save_all(&data).await?;
        item
    };

    info!("Created feedback {}", item.id);

    Ok((StatusCode::CREATED, Json(CreatedResponse { ok: true, item })))
}

pub async fn delete_feedback(
    AxumState(state): AxumState<Arc<State>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    {
        let store = state.store.write().await;
        let mut data = store.load_all().await;

        let index = data
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(AppError::NotFound)?;

        data.remove(index);
        store.save_all(&data).await?;
    }

    info!("Deleted feedback {id}");

    Ok(Json(OkResponse { ok: true }))
}

pub async fn export_feedback(AxumState(state): AxumState<Arc<State>>) -> impl IntoResponse {
    let data = state.store.read().await.load_all().await;

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        to_csv(&data),
    )
}

pub async fn api_not_found() -> AppError {
    AppError::RouteNotFound
}
