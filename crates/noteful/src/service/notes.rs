use crate::error::{ApiError, ApiResult};
use crate::model::{now_millis, CreateNoteRequest, Note, UpdateNoteRequest};
use crate::store::NoteStore;

fn note_not_found() -> ApiError {
    ApiError::not_found("Note Not Found")
}

pub async fn list_notes<S: NoteStore + ?Sized>(store: &S) -> ApiResult<Vec<Note>> {
    let notes = store.all_notes().await?;
    Ok(notes.into_iter().map(Note::sanitized).collect())
}

pub async fn get_note<S: NoteStore + ?Sized>(store: &S, id: i64) -> ApiResult<Note> {
    store
        .note_by_id(id)
        .await?
        .map(Note::sanitized)
        .ok_or_else(note_not_found)
}

/// Stamps `modified` with the current time.
pub async fn create_note<S: NoteStore + ?Sized>(
    store: &S,
    request: CreateNoteRequest,
) -> ApiResult<Note> {
    let new_note = request.validate(now_millis())?;
    let note = store.insert_note(new_note).await?;
    tracing::info!(id = note.id, folder_id = note.folder_id, "Created note");
    Ok(note.sanitized())
}

/// The existence check and the delete are separate round-trips.
pub async fn delete_note<S: NoteStore + ?Sized>(store: &S, id: i64) -> ApiResult<()> {
    if store.note_by_id(id).await?.is_none() {
        return Err(note_not_found());
    }
    store.delete_note(id).await?;
    tracing::info!(id, "Deleted note");
    Ok(())
}

pub async fn update_note<S: NoteStore + ?Sized>(
    store: &S,
    id: i64,
    request: UpdateNoteRequest,
) -> ApiResult<()> {
    if store.note_by_id(id).await?.is_none() {
        return Err(note_not_found());
    }
    let patch = request.validate(now_millis())?;
    store.update_note(id, patch).await?;
    tracing::info!(id, "Updated note");
    Ok(())
}
