use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use standup_core::error::StandupError;

/// Body text returned for every unexpected fault. Details go to the log only.
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected error occurred";

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Client errors render as `400 {message}`; everything else renders as
/// `500 {message: "Internal Server Error", error}` with a generic `error`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(StandupError::Validation(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(e) = self.0.downcast_ref::<StandupError>() {
            if e.is_client_error() {
                let body = serde_json::json!({ "message": e.to_string() });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }
        }

        tracing::error!(error = %format!("{:#}", self.0), "unexpected error handling request");
        internal_error_response()
    }
}

/// The generic 500 body, shared with the panic handler.
pub fn internal_error_response() -> Response {
    let body = serde_json::json!({
        "message": "Internal Server Error",
        "error": INTERNAL_ERROR_DETAIL,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
