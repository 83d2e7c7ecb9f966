use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body of every error response.
#[derive(Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub fn error(status: StatusCode, detail: String) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { detail }))
}

/// Relays image bytes as JPEG whatever the upstream format was.
pub fn jpeg(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        bytes,
    )
        .into_response()
}
