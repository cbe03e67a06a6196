//! Document generation: orchestrates one request end to end.
//!
//! Flow: tailor (LLM) → render résumé → compile
//!       split job title → cover letter (LLM) → render → compile
//!       → zip every PDF under `<folder>/` → return archive bytes.
//!
//! All-or-nothing: any failure discards the work already done. The request's
//! working directory is removed when this function returns, success or not.

use std::str::FromStr;

use anyhow::Context;
use chrono::Local;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::job_title::{archive_folder_name, split_job_title};
use crate::generation::tailor::{generate_cover_letter, tailor};
use crate::render::{build_archive, CompiledDocument, CoverLetterRenderContext, ResumeRenderContext};
use crate::state::AppState;

const COVER_LETTER_DATE_FORMAT: &str = "%B %-d, %Y";

/// Which documents a request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    #[default]
    Both,
}

impl DocumentKind {
    pub fn includes_resume(self) -> bool {
        matches!(self, DocumentKind::Resume | DocumentKind::Both)
    }

    pub fn includes_cover_letter(self) -> bool {
        matches!(self, DocumentKind::CoverLetter | DocumentKind::Both)
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "resume" => Ok(DocumentKind::Resume),
            "cover_letter" => Ok(DocumentKind::CoverLetter),
            "both" => Ok(DocumentKind::Both),
            other => Err(format!(
                "type must be one of resume, cover_letter, both (got '{other}')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub job_title: String,
    pub job_description: String,
    pub kind: DocumentKind,
}

/// A finished zip archive ready to stream to the client.
#[derive(Debug, Clone)]
pub struct GeneratedBundle {
    /// `<folder>.zip`
    pub archive_name: String,
    pub bytes: Vec<u8>,
    /// Archive entry names, e.g. `Backend_Engineer/resume_Singh.pdf`.
    pub entries: Vec<String>,
}

/// Runs the full pipeline for one request.
pub async fn generate_documents(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<GeneratedBundle, AppError> {
    let folder = archive_folder_name(&request.job_title);
    info!(
        "Generating {:?} for '{}' (folder {folder})",
        request.kind, request.job_title
    );

    tokio::fs::create_dir_all(&state.config.work_dir)
        .await
        .with_context(|| format!("Failed to create {}", state.config.work_dir.display()))?;
    let workspace = tempfile::Builder::new()
        .prefix("tailor-")
        .tempdir_in(&state.config.work_dir)
        .context("Failed to create request working directory")?;
    let job_dir = workspace.path().join(&folder);

    let mut documents: Vec<CompiledDocument> = Vec::new();

    if request.kind.includes_resume() {
        documents.push(build_resume(state, request, &job_dir).await?);
    }

    if request.kind.includes_cover_letter() {
        documents.push(build_cover_letter(state, request, &job_dir).await?);
    }

    let entries: Vec<String> = documents
        .iter()
        .map(|d| format!("{folder}/{}", d.pdf_file_name()))
        .collect();

    let archive_folder = folder.clone();
    let bytes = tokio::task::spawn_blocking(move || build_archive(&archive_folder, &documents))
        .await
        .context("Archive task panicked")??;

    info!(
        "Bundled {} documents ({} bytes) for '{}'",
        entries.len(),
        bytes.len(),
        request.job_title
    );

    Ok(GeneratedBundle {
        archive_name: format!("{folder}.zip"),
        bytes,
        entries,
    })
}

async fn build_resume(
    state: &AppState,
    request: &GenerateRequest,
    job_dir: &std::path::Path,
) -> Result<CompiledDocument, AppError> {
    let profile = &state.profile;
    let tailored = tailor(
        &state.llm,
        &state.config.tailor_settings(),
        &profile.resume,
        &request.job_description,
    )
    .await?;

    let context = ResumeRenderContext::new(&profile.contact, &tailored);
    let source = state
        .templates
        .resume
        .render(&context, state.config.bullet_policy)?;

    let document = state
        .compiler
        .compile(&source, job_dir, &profile.resume_file_stem())
        .await?;
    debug!(
        "Rendered {} to {}",
        state.templates.resume.name(),
        document.tex_path.display()
    );
    Ok(document)
}

async fn build_cover_letter(
    state: &AppState,
    request: &GenerateRequest,
    job_dir: &std::path::Path,
) -> Result<CompiledDocument, AppError> {
    let profile = &state.profile;
    let settings = state.config.tailor_settings();

    // Role and company come from user input and end up in the document.
    let parts = split_job_title(&request.job_title);
    let role_title = settings.sanitizer.apply(&parts.role_title);
    let company_name = settings.sanitizer.apply(&parts.company_name);

    let letter = generate_cover_letter(
        &state.llm,
        &settings,
        &profile.resume,
        &request.job_description,
        &request.job_title,
        &role_title,
        &company_name,
    )
    .await?;

    let context = CoverLetterRenderContext {
        contact: profile.contact.clone(),
        letter,
        role_title,
        company_name,
        date: Local::now().format(COVER_LETTER_DATE_FORMAT).to_string(),
    };
    let source = state
        .templates
        .cover_letter
        .render(&context, state.config.bullet_policy)?;

    let document = state
        .compiler
        .compile(&source, job_dir, &profile.cover_letter_file_stem())
        .await?;
    debug!(
        "Rendered {} to {}",
        state.templates.cover_letter.name(),
        document.tex_path.display()
    );
    Ok(document)
}
