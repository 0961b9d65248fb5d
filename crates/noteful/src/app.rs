//! Router assembly: resource routes, the error responder, and HTTP layers.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::error::{self, ApiError};
use crate::routes;
use crate::AppState;

/// Build the full application router over `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(routes::folders::router())
        .merge(routes::notes::router())
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed });

    let prefix = state.config.api_prefix.clone();
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };

    app.fallback(|| async { ApiError::not_found("Not Found") })
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::report_unhandled,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors))
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION]);

    if cors.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
