//! Axum route handlers for the generation API.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{generate_documents, DocumentKind, GenerateRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Raw form fields, accepted as `multipart/form-data` or urlencoded.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl GenerateForm {
    pub fn into_request(self) -> Result<GenerateRequest, AppError> {
        let job_title = self
            .job_title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("job_title is required".to_string()))?;

        let job_description = self
            .job_description
            .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => DocumentKind::default(),
            Some(kind) => kind.parse().map_err(AppError::Validation)?,
        };

        Ok(GenerateRequest {
            job_title,
            job_description,
            kind,
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for GenerateForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<GenerateForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(form);
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let mut form = GenerateForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let slot = match name.as_str() {
                "job_title" => &mut form.job_title,
                "job_description" => &mut form.job_description,
                "type" => &mut form.kind,
                _ => continue,
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            *slot = Some(value);
        }

        Ok(form)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate
///
/// Tailors the requested documents for one job posting and returns them as a
/// zip attachment named after the sanitized job title.
pub async fn handle_generate(
    State(state): State<AppState>,
    form: GenerateForm,
) -> Result<Response, AppError> {
    let request = form.into_request()?;
    let bundle = generate_documents(&state, &request).await?;
    info!(
        "Returning {} [{}]",
        bundle.archive_name,
        bundle.entries.join(", ")
    );

    let disposition = format!("attachment; filename=\"{}\"", bundle.archive_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(bundle.bytes),
    )
        .into_response())
}
