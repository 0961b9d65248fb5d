use crate::error::{ApiError, ApiResult};
use crate::model::{CreateFolderRequest, Folder, UpdateFolderRequest};
use crate::store::FolderStore;

fn folder_not_found() -> ApiError {
    ApiError::not_found("Folder Not Found")
}

pub async fn list_folders<S: FolderStore + ?Sized>(store: &S) -> ApiResult<Vec<Folder>> {
    let folders = store.all_folders().await?;
    Ok(folders.into_iter().map(Folder::sanitized).collect())
}

pub async fn get_folder<S: FolderStore + ?Sized>(store: &S, id: i64) -> ApiResult<Folder> {
    store
        .folder_by_id(id)
        .await?
        .map(Folder::sanitized)
        .ok_or_else(folder_not_found)
}

pub async fn create_folder<S: FolderStore + ?Sized>(
    store: &S,
    request: CreateFolderRequest,
) -> ApiResult<Folder> {
    let new_folder = request.validate()?;
    let folder = store.insert_folder(new_folder).await?;
    tracing::info!(id = folder.id, "Created folder");
    Ok(folder.sanitized())
}

/// Fails with `NotFound` when nothing exists under `id`.
pub async fn delete_folder<S: FolderStore + ?Sized>(store: &S, id: i64) -> ApiResult<()> {
    if store.folder_by_id(id).await?.is_none() {
        return Err(folder_not_found());
    }
    store.delete_folder(id).await?;
    tracing::info!(id, "Deleted folder");
    Ok(())
}

/// Existence is checked before the body, so a missing folder is always a 404.
pub async fn update_folder<S: FolderStore + ?Sized>(
    store: &S,
    id: i64,
    request: UpdateFolderRequest,
) -> ApiResult<()> {
    if store.folder_by_id(id).await?.is_none() {
        return Err(folder_not_found());
    }
    let patch = request.validate()?;
    store.update_folder(id, patch).await?;
    tracing::info!(id, "Updated folder");
    Ok(())
}
