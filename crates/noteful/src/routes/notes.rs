use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::location_for;
use crate::error::ApiResult;
use crate::extract::{IdPath, JsonBody, PatchBody};
use crate::model::{CreateNoteRequest, UpdateNoteRequest};
use crate::service::notes;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list).post(create))
        .route("/notes/{id}", get(show).delete(remove).patch(update))
}

/// Handler for `GET /notes`
async fn list(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let notes = notes::list_notes(state.store.as_ref()).await?;
    Ok(Json(notes))
}

/// Handler for `POST /notes`
async fn create(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let note = notes::create_note(state.store.as_ref(), request).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location_for(&uri, note.id))],
        Json(note),
    ))
}

/// Handler for `GET /notes/{id}`
async fn show(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let note = notes::get_note(state.store.as_ref(), id).await?;
    Ok(Json(note))
}

/// Handler for `DELETE /notes/{id}`
async fn remove(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<StatusCode> {
    notes::delete_note(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `PATCH /notes/{id}`
async fn update(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
    PatchBody(request): PatchBody<UpdateNoteRequest>,
) -> ApiResult<StatusCode> {
    notes::update_note(state.store.as_ref(), id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}
