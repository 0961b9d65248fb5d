//! Route tables for the two resources.

pub mod folders;
pub mod notes;

use axum::http::{HeaderValue, Uri};

/// `Location` for a newly created row: the request path plus its id.
fn location_for(uri: &Uri, id: i64) -> HeaderValue {
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    // Built from an already-valid path and an integer.
    HeaderValue::from_str(&location).unwrap_or_else(|_| HeaderValue::from_static("/"))
}
