//! Error → HTTP response mapping.
//!
//! Both failure kinds answer 422; only the body differs:
//! - validation: `{"errors": {field: [messages]}, "status": "failed"}`
//! - upstream unreachable: `{"error": "<fixed message>"}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::books::{BooksError, ValidationErrors};

/// Returned when the upstream cannot be reached. The trailing space is
/// part of the published payload.
pub const UPSTREAM_UNAVAILABLE: &str = "Sorry we are unable to connect to the API at this time. ";

#[derive(Serialize)]
struct ValidationFailed<'a> {
    errors: &'a ValidationErrors,
    status: &'static str,
}

#[derive(Serialize)]
struct Unavailable {
    error: &'static str,
}

impl IntoResponse for BooksError {
    fn into_response(self) -> Response {
        match self {
            BooksError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationFailed {
                    errors: &errors,
                    status: "failed",
                }),
            )
                .into_response(),
            BooksError::UpstreamUnavailable(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(Unavailable {
                    error: UPSTREAM_UNAVAILABLE,
                }),
            )
                .into_response(),
        }
    }
}
