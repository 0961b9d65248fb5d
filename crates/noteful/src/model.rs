//! Folder and note entities, request bodies, and their validation.
//!
//! Request bodies deserialize leniently (every field optional) and are turned
//! into insert or patch values by `validate`, which is the only place the
//! "required field" rules live.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ApiError, ApiResult};
use crate::sanitize::clean_text;

/// A stored folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Folder {
    pub id: i64,
    pub folder_name: String,
}

/// A stored note, always belonging to one folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub note_name: String,
    pub content: String,
    pub folder_id: i64,
    #[serde(serialize_with = "serialize_millis")]
    pub modified: DateTime<Utc>,
}

impl Folder {
    /// Copy with markup stripped from `folder_name`.
    pub fn sanitized(self) -> Self {
        Self {
            id: self.id,
            folder_name: clean_text(&self.folder_name),
        }
    }
}

impl Note {
    /// Copy with markup stripped from `note_name` and `content`.
    pub fn sanitized(self) -> Self {
        Self {
            note_name: clean_text(&self.note_name),
            content: clean_text(&self.content),
            ..self
        }
    }
}

/// `2020-03-12T01:10:22.505Z`
fn serialize_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Current time at the precision notes are serialized with.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// --- Validated values handed to the store ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFolder {
    pub folder_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub folder_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub note_name: String,
    pub content: String,
    pub folder_id: i64,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub note_name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub modified: Option<DateTime<Utc>>,
}

// --- Request bodies ---

/// Body of `POST /folders`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFolderRequest {
    pub folder_name: Option<String>,
}

/// Body of `PATCH /folders/{id}`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFolderRequest {
    pub folder_name: Option<String>,
}

/// Body of `POST /notes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub note_name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

/// Body of `PATCH /notes/{id}`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub note_name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
    pub modified: Option<DateTime<Utc>>,
}

fn missing(field: &str) -> ApiError {
    ApiError::invalid_input(format!("Missing '{}' in request body", field))
}

/// Names are required to be non-blank; treat blank the same as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CreateFolderRequest {
    pub fn validate(self) -> ApiResult<NewFolder> {
        let folder_name = non_blank(self.folder_name).ok_or_else(|| missing("folder_name"))?;
        Ok(NewFolder { folder_name })
    }
}

impl UpdateFolderRequest {
    pub fn validate(self) -> ApiResult<FolderPatch> {
        match non_blank(self.folder_name) {
            Some(folder_name) => Ok(FolderPatch {
                folder_name: Some(folder_name),
            }),
            None => Err(ApiError::invalid_input(
                "Request body must contain 'folder_name'",
            )),
        }
    }
}

impl CreateNoteRequest {
    /// Checks `note_name`, `content`, `folder_id` in that order and stamps `modified`.
    pub fn validate(self, now: DateTime<Utc>) -> ApiResult<NewNote> {
        let note_name = non_blank(self.note_name).ok_or_else(|| missing("note_name"))?;
        let content = self.content.ok_or_else(|| missing("content"))?;
        let folder_id = self.folder_id.ok_or_else(|| missing("folder_id"))?;
        Ok(NewNote {
            note_name,
            content,
            folder_id,
            modified: now,
        })
    }
}

impl UpdateNoteRequest {
    /// At least one field must be present. `modified` defaults to `now`.
    pub fn validate(self, now: DateTime<Utc>) -> ApiResult<NotePatch> {
        let note_name = non_blank(self.note_name);
        if note_name.is_none()
            && self.content.is_none()
            && self.folder_id.is_none()
            && self.modified.is_none()
        {
            return Err(ApiError::invalid_input(
                "Request body must contain name, content and folder",
            ));
        }

        Ok(NotePatch {
            note_name,
            content: self.content,
            folder_id: self.folder_id,
            modified: Some(self.modified.unwrap_or(now)),
        })
    }
}
