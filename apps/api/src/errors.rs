use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::{BundleError, CompileError, TemplateError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Everything except `Validation` is a pipeline failure: it is logged with full
/// detail and reported as a 500 whose message is the original error message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
            AppError::Compile(_) => (StatusCode::INTERNAL_SERVER_ERROR, "COMPILE_ERROR"),
            AppError::Bundle(_) => (StatusCode::INTERNAL_SERVER_ERROR, "BUNDLE_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {self:?}");
        } else {
            tracing::warn!("Request rejected: {self}");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let response = AppError::Validation("type must be one of resume, cover_letter, both".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pipeline_failure_is_500_with_original_message() {
        let response =
            AppError::Llm("Model did not return valid JSON:\nnot json".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("not json"));
    }

    #[tokio::test]
    async fn test_compile_error_converts_and_reports_diagnostics() {
        let err: AppError = CompileError::Failed {
            pass: 2,
            code: Some(1),
            diagnostics: "! Missing $ inserted.".to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COMPILE_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Missing $ inserted"));
    }
}
