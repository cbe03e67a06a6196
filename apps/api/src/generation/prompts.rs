// LLM prompts for résumé tailoring and cover-letter writing.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{
    JSON_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION, PLAIN_TEXT_INSTRUCTION,
};
use crate::models::ResumeContent;

/// Résumé tailoring prompt.
/// Replace: {json_only}, {no_fabrication}, {plain_text}, {job_description}, {current_content}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are an expert technical resume editor tailoring an existing resume to a specific job.
Write in a confident, concise, professional tone. Start every bullet with a strong past-tense action verb.

STRICT RULES:
- Only rephrase and reorder emphasis so the existing content aligns with the job description
- Maintain the original meaning of every sentence and bullet
- Keep each field within plus or minus six words of its original length
- Mirror keywords from the job description only where the current content already supports them
{no_fabrication}
{plain_text}

JOB DESCRIPTION:
{job_description}

CURRENT CONTENT:
{current_content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "string, one paragraph, at most 50 words",
  "fitkind_bullets": ["string", "string", "string"],
  "cmindset_bullets": ["string", "string", "string"],
  "skills_languages": "string, comma separated list",
  "skills_backend": "string, comma separated list",
  "skills_devops": "string, comma separated list"
}

SCHEMA RULES:
1. "fitkind_bullets" and "cmindset_bullets" MUST each contain exactly 3 strings, in the same order as the current content
2. Each bullet is a single sentence of at most 30 words
3. Skill fields list only skills that already appear in the current content

{json_only}"#;

/// Cover-letter prompt.
/// Replace: {json_only}, {no_fabrication}, {plain_text}, {job_title}, {role_title},
///          {company_name}, {job_description}, {current_content}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an expert career writer drafting a cover letter for the candidate whose resume content is given below.
Write in a warm, specific, professional first-person tone. Avoid cliches and generic enthusiasm.

POSTING: {job_title}
ROLE: {role_title}
COMPANY: {company_name}

STRICT RULES:
- Ground every claim in the current content; connect it explicitly to the job description
- The first experience paragraph covers the FitKind experience, the second covers the CMindset experience
- Do not include a salutation, sign-off, address block or date; those are added separately
{no_fabrication}
{plain_text}

JOB DESCRIPTION:
{job_description}

CURRENT CONTENT:
{current_content}

Return a JSON object with this EXACT schema (no extra fields):
{
  "opening_paragraph": "string, 2 to 3 sentences naming the role and company",
  "experience_paragraph_one": "string, 3 to 4 sentences",
  "experience_paragraph_two": "string, 3 to 4 sentences",
  "closing_paragraph": "string, 2 sentences"
}

{json_only}"#;

/// Renders the current content the way the model sees it.
fn current_content_json(content: &ResumeContent) -> String {
    // ResumeContent is plain strings and string lists; serialization cannot fail.
    serde_json::to_string_pretty(content).unwrap_or_else(|_| format!("{content:?}"))
}

/// Substitutes `{name}` slots in a single pass; inserted values are never rescanned.
fn fill_slots(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        for (name, value) in slots {
            let after = tail
                .strip_prefix('{')
                .and_then(|t| t.strip_prefix(name))
                .and_then(|t| t.strip_prefix('}'));
            if let Some(after) = after {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Builds the tailoring prompt. The job description is embedded verbatim.
pub fn build_tailor_prompt(content: &ResumeContent, job_description: &str) -> String {
    let current_content = current_content_json(content);
    fill_slots(
        TAILOR_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("plain_text", PLAIN_TEXT_INSTRUCTION),
            ("job_description", job_description),
            ("current_content", current_content.as_str()),
        ],
    )
}

/// Builds the cover-letter prompt. The job description is embedded verbatim.
pub fn build_cover_letter_prompt(
    content: &ResumeContent,
    job_description: &str,
    job_title: &str,
    role_title: &str,
    company_name: &str,
) -> String {
    let current_content = current_content_json(content);
    fill_slots(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("no_fabrication", NO_FABRICATION_INSTRUCTION),
            ("plain_text", PLAIN_TEXT_INSTRUCTION),
            ("job_title", job_title),
            ("role_title", role_title),
            ("company_name", company_name),
            ("job_description", job_description),
            ("current_content", current_content.as_str()),
        ],
    )
}
