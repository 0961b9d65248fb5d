//! Extractors whose rejections use the API error shape.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `axum::Json` with a 400 `{ "error": { "message" } }` rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with a 400 `{ "error": { "message" } }` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// JSON body for partial updates. An empty body is `T::default()`, so the
/// handler still gets to answer 404 before complaining about missing fields.
#[derive(Debug)]
pub struct PatchBody<T>(pub T);

impl<S, T> FromRequest<S> for PatchBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_input(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::invalid_input(format!("Invalid JSON body: {}", e)))
    }
}
