use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Web-layer error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Applicant-facing failures never come through here; they are rendered as
/// banners on the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed form upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Multipart(e) => {
                tracing::warn!("Rejected multipart body: {e}");
                (StatusCode::BAD_REQUEST, "BAD_MULTIPART", self.to_string())
            }
            AppError::Render(e) => {
                tracing::error!("Page render failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Page could not be rendered".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
