//! Typed render contexts. Each document type declares the placeholder keys it
//! supplies so templates can be checked against them at load time.

use std::collections::BTreeMap;

use crate::models::{ContactInfo, CoverLetterContent, TailoredContent};
use crate::render::template::RenderContext;

pub trait TemplateContext {
    /// Every scalar key `to_render_context` fills.
    const KEYS: &'static [&'static str];

    fn to_render_context(&self) -> RenderContext;
}

const CONTACT_KEYS: [&str; 6] = ["full_name", "email", "phone", "location", "linkedin", "github"];

fn contact_scalars(contact: &ContactInfo) -> impl Iterator<Item = (&'static str, String)> {
    let values = [
        &contact.full_name,
        &contact.email,
        &contact.phone,
        &contact.location,
        &contact.linkedin,
        &contact.github,
    ];
    CONTACT_KEYS.into_iter().zip(values.map(String::clone))
}

fn to_scalars(pairs: impl IntoIterator<Item = (&'static str, String)>) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Résumé fields plus the bullet queue (FitKind bullets, then CMindset).
#[derive(Debug, Clone)]
pub struct ResumeRenderContext {
    contact: ContactInfo,
    content: TailoredContent,
}

impl ResumeRenderContext {
    pub fn new(contact: &ContactInfo, content: &TailoredContent) -> Self {
        Self {
            contact: contact.clone(),
            content: content.clone(),
        }
    }
}

impl TemplateContext for ResumeRenderContext {
    const KEYS: &'static [&'static str] = &[
        "full_name",
        "email",
        "phone",
        "location",
        "linkedin",
        "github",
        "summary",
        "skills_languages",
        "skills_backend",
        "skills_devops",
    ];

    fn to_render_context(&self) -> RenderContext {
        let mut scalars = to_scalars(contact_scalars(&self.contact));
        scalars.extend(to_scalars([
            ("summary", self.content.summary.clone()),
            ("skills_languages", self.content.skills_languages.clone()),
            ("skills_backend", self.content.skills_backend.clone()),
            ("skills_devops", self.content.skills_devops.clone()),
        ]));

        RenderContext {
            scalars,
            bullets: self.content.bullet_queue(),
        }
    }
}

/// Contact block, addressee and the four letter paragraphs.
#[derive(Debug, Clone)]
pub struct CoverLetterRenderContext {
    pub contact: ContactInfo,
    pub letter: CoverLetterContent,
    pub role_title: String,
    pub company_name: String,
    pub date: String,
}

impl TemplateContext for CoverLetterRenderContext {
    const KEYS: &'static [&'static str] = &[
        "full_name",
        "email",
        "phone",
        "location",
        "linkedin",
        "github",
        "role_title",
        "company_name",
        "date",
        "opening_paragraph",
        "experience_paragraph_one",
        "experience_paragraph_two",
        "closing_paragraph",
    ];

    fn to_render_context(&self) -> RenderContext {
        let mut scalars = to_scalars(contact_scalars(&self.contact));
        scalars.extend(to_scalars([
            ("role_title", self.role_title.clone()),
            ("company_name", self.company_name.clone()),
            ("date", self.date.clone()),
            ("opening_paragraph", self.letter.opening_paragraph.clone()),
            (
                "experience_paragraph_one",
                self.letter.experience_paragraph_one.clone(),
            ),
            (
                "experience_paragraph_two",
                self.letter.experience_paragraph_two.clone(),
            ),
            ("closing_paragraph", self.letter.closing_paragraph.clone()),
        ]));

        RenderContext {
            scalars,
            bullets: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test_support::{sample_cover_letter, sample_profile};

    fn key_set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_resume_keys_match_rendered_scalars() {
        let profile = sample_profile();
        let ctx = ResumeRenderContext::new(&profile.contact, &profile.resume).to_render_context();
        let rendered: BTreeSet<String> = ctx.scalars.keys().cloned().collect();
        assert_eq!(rendered, key_set(ResumeRenderContext::KEYS));
        assert_eq!(ctx.bullets.len(), 6);
    }

    #[test]
    fn test_cover_letter_keys_match_rendered_scalars() {
        let profile = sample_profile();
        let ctx = CoverLetterRenderContext {
            contact: profile.contact.clone(),
            letter: sample_cover_letter(),
            role_title: "Backend Engineer".to_string(),
            company_name: "Acme".to_string(),
            date: "January 5, 2026".to_string(),
        }
        .to_render_context();
        let rendered: BTreeSet<String> = ctx.scalars.keys().cloned().collect();
        assert_eq!(rendered, key_set(CoverLetterRenderContext::KEYS));
        assert!(ctx.bullets.is_empty());
        assert_eq!(ctx.scalars["company_name"], "Acme");
    }

    #[test]
    fn test_contact_keys_are_shared_by_both_contexts() {
        for key in CONTACT_KEYS {
            assert!(ResumeRenderContext::KEYS.contains(&key));
            assert!(CoverLetterRenderContext::KEYS.contains(&key));
        }
    }
}
