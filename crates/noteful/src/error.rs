//! API error taxonomy and the global error responder.
//!
//! Handlers report `InvalidInput` (400) and `NotFound` (404) themselves, and
//! the router answers a known path with an unrouted method with
//! `MethodNotAllowed` (405). Everything else is unhandled and answered with a
//! 500 carrying the error's message. [`report_unhandled`] is the single place those are logged.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;
use crate::AppState;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed client input
    #[error("{0}")]
    InvalidInput(String),

    /// No row for the requested id
    #[error("{0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Storage failure, answered like any other unhandled error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything else, e.g. a panicking handler
    #[error("{0}")]
    Unhandled(String),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) | ApiError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{ "error": { "message": ... } }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Attached to 500 responses so the responder can log what went wrong.
#[derive(Debug, Clone)]
pub struct UnhandledError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let mut response = (
            status,
            Json(ErrorBody {
                error: ErrorMessage {
                    message: message.clone(),
                },
            }),
        )
            .into_response();

        if status.is_server_error() {
            response.extensions_mut().insert(UnhandledError(message));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

/// Middleware: log unhandled failures outside production.
pub async fn report_unhandled(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    if let Some(UnhandledError(message)) = response.extensions().get::<UnhandledError>() {
        if !state.env.is_production() {
            tracing::error!(%method, %uri, status = %response.status(), "{}", message);
        }
    }

    response
}

/// `CatchPanicLayer` hook: a panicking handler becomes an ordinary 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    ApiError::Unhandled(message).into_response()
}
