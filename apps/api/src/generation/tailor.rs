//! Model calls that rewrite résumé content and draft cover letters.
//!
//! Every textual field the model returns is sanitized before it leaves this module.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{build_cover_letter_prompt, build_tailor_prompt};
use crate::generation::sanitizer::SanitizerPolicy;
use crate::llm_client::{GenerationConfig, LlmClient};
use crate::models::{CoverLetterContent, ResumeContent, TailoredContent};

/// Sampling and sanitization settings for the two generation calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailorSettings {
    pub tailor_temperature: f32,
    /// Higher than `tailor_temperature` by default.
    pub cover_letter_temperature: f32,
    pub sanitizer: SanitizerPolicy,
}

impl Default for TailorSettings {
    fn default() -> Self {
        Self {
            tailor_temperature: 0.3,
            cover_letter_temperature: 0.7,
            sanitizer: SanitizerPolicy::Denylist,
        }
    }
}

/// Rewrites `content` for `job_description` and returns a sanitized copy.
pub async fn tailor(
    llm: &LlmClient,
    settings: &TailorSettings,
    content: &ResumeContent,
    job_description: &str,
) -> Result<TailoredContent, AppError> {
    let prompt = build_tailor_prompt(content, job_description);

    let tailored: TailoredContent = llm
        .call_json(&prompt, GenerationConfig::json(settings.tailor_temperature))
        .await
        .map_err(|e| AppError::Llm(format!("Resume tailoring failed: {e}")))?;

    if !tailored.has_conventional_shape() {
        warn!(
            "Model returned {} FitKind and {} CMindset bullets",
            tailored.fitkind_bullets.len(),
            tailored.cmindset_bullets.len()
        );
    }

    info!("Tailored resume content ({} bullets)", tailored.bullet_queue().len());
    Ok(tailored.map_text(|s| settings.sanitizer.apply(s)))
}

/// Drafts the four cover-letter paragraphs and returns them sanitized.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    settings: &TailorSettings,
    content: &ResumeContent,
    job_description: &str,
    job_title: &str,
    role_title: &str,
    company_name: &str,
) -> Result<CoverLetterContent, AppError> {
    let prompt = build_cover_letter_prompt(
        content,
        job_description,
        job_title,
        role_title,
        company_name,
    );

    let letter: CoverLetterContent = llm
        .call_json(
            &prompt,
            GenerationConfig::json(settings.cover_letter_temperature),
        )
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    info!("Generated cover letter for {role_title} at {company_name}");
    Ok(letter.map_text(|s| settings.sanitizer.apply(s)))
}
