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
use crate::model::{CreateFolderRequest, UpdateFolderRequest};
use crate::service::folders;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/folders", get(list).post(create))
        .route("/folders/{id}", get(show).delete(remove).patch(update))
}

/// Handler for `GET /folders`
async fn list(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let folders = folders::list_folders(state.store.as_ref()).await?;
    Ok(Json(folders))
}

/// Handler for `POST /folders`
async fn create(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(request): JsonBody<CreateFolderRequest>,
) -> ApiResult<impl IntoResponse> {
    let folder = folders::create_folder(state.store.as_ref(), request).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location_for(&uri, folder.id))],
        Json(folder),
    ))
}

/// Handler for `GET /folders/{id}`
async fn show(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let folder = folders::get_folder(state.store.as_ref(), id).await?;
    Ok(Json(folder))
}

/// Handler for `DELETE /folders/{id}`
async fn remove(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<StatusCode> {
    folders::delete_folder(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `PATCH /folders/{id}`
async fn update(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath<i64>,
    PatchBody(request): PatchBody<UpdateFolderRequest>,
) -> ApiResult<StatusCode> {
    folders::update_folder(state.store.as_ref(), id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}
