//! Template filling: substitutes `{{ key }}` placeholders and the positional
//! `{{ bullet }}` queue in LaTeX templates.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::render::context::{CoverLetterRenderContext, ResumeRenderContext, TemplateContext};

/// The single repeated placeholder consumed once per bullet, in order.
pub const BULLET_PLACEHOLDER: &str = "{{ bullet }}";
const BULLET_KEY: &str = "bullet";

pub const RESUME_TEMPLATE_FILE: &str = "resume.tex";
pub const COVER_LETTER_TEMPLATE_FILE: &str = "cover_letter.tex";

/// Matches `{{ key }}` and `{{key}}`. LaTeX groups such as `{{\bf x}}` never match.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex is valid")
});

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template '{template}' references unknown placeholders: {}", .names.join(", "))]
    UnknownPlaceholder {
        template: String,
        names: Vec<String>,
    },

    #[error(
        "Template '{template}' has {slots} bullet placeholders but {bullets} bullets were supplied"
    )]
    BulletCountMismatch {
        template: String,
        slots: usize,
        bullets: usize,
    },

    #[error(
        "Template '{template}' spells placeholders in a form that cannot be filled: {}",
        .tokens.join(", ")
    )]
    Malformed {
        template: String,
        tokens: Vec<String>,
    },

    #[error("Template '{template}' left placeholders unresolved: {}", .names.join(", "))]
    Unresolved {
        template: String,
        names: Vec<String>,
    },
}

/// What to do when bullets and `{{ bullet }}` slots disagree in number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulletPolicy {
    /// Fail the render on any count mismatch or leftover placeholder.
    #[default]
    Strict,
    /// Drop surplus bullets and leave surplus slots in the output.
    Lenient,
}

impl FromStr for BulletPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(BulletPolicy::Strict),
            "lenient" => Ok(BulletPolicy::Lenient),
            other => Err(format!(
                "unknown bullet policy '{other}' (expected strict or lenient)"
            )),
        }
    }
}

/// Flat placeholder → value mapping for one document render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub scalars: BTreeMap<String, String>,
    pub bullets: Vec<String>,
}

/// Fills `raw` with `bullets` (one per `{{ bullet }}` occurrence, in order) and
/// `scalars` (every occurrence of `{{ key }}` or `{{key}}`).
///
/// Surplus bullets are dropped, surplus slots and unknown keys are left as-is.
pub fn fill_template(raw: &str, bullets: &[String], scalars: &BTreeMap<String, String>) -> String {
    let mut segments = raw.split(BULLET_PLACEHOLDER);
    let mut filled = segments.next().unwrap_or_default().to_string();
    let mut queue = bullets.iter();

    for segment in segments {
        match queue.next() {
            Some(bullet) => filled.push_str(bullet),
            None => filled.push_str(BULLET_PLACEHOLDER),
        }
        filled.push_str(segment);
    }

    for (key, value) in scalars {
        if key == BULLET_KEY {
            continue;
        }
        filled = filled
            .replace(&format!("{{{{ {key} }}}}"), value)
            .replace(&format!("{{{{{key}}}}}"), value);
    }

    filled
}

pub fn count_bullet_slots(raw: &str) -> usize {
    raw.matches(BULLET_PLACEHOLDER).count()
}

/// Distinct placeholder names still present in `text`, `bullet` included.
pub fn find_placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Placeholder tokens `fill_template` would never substitute, such as
/// `{{bullet}}` or `{{ summary}}`.
pub fn find_malformed_placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|c| {
            let token = &c[0];
            let name = &c[1];
            let fillable = if name == BULLET_KEY {
                token == BULLET_PLACEHOLDER
            } else {
                token == format!("{{{{ {name} }}}}") || token == format!("{{{{{name}}}}}")
            };
            (!fillable).then(|| token.to_string())
        })
        .collect()
}

/// A LaTeX template loaded into memory.
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    name: String,
    raw: String,
}

impl DocumentTemplate {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, raw))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scalar placeholder names the template references.
    pub fn placeholders(&self) -> BTreeSet<String> {
        let mut names = find_placeholders(&self.raw);
        names.remove(BULLET_KEY);
        names
    }

    pub fn bullet_slots(&self) -> usize {
        count_bullet_slots(&self.raw)
    }

    /// Rejects templates with unfillable spellings or keys the context type
    /// cannot supply.
    pub fn validate<C: TemplateContext>(&self) -> Result<(), TemplateError> {
        let malformed = find_malformed_placeholders(&self.raw);
        if !malformed.is_empty() {
            return Err(TemplateError::Malformed {
                template: self.name.clone(),
                tokens: malformed.into_iter().collect(),
            });
        }

        let unknown: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| !C::KEYS.contains(&name.as_str()))
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(TemplateError::UnknownPlaceholder {
                template: self.name.clone(),
                names: unknown,
            })
        }
    }

    pub fn render<C: TemplateContext>(
        &self,
        context: &C,
        policy: BulletPolicy,
    ) -> Result<String, TemplateError> {
        let context = context.to_render_context();
        let slots = self.bullet_slots();

        if policy == BulletPolicy::Strict && slots != context.bullets.len() {
            return Err(TemplateError::BulletCountMismatch {
                template: self.name.clone(),
                slots,
                bullets: context.bullets.len(),
            });
        }

        let filled = fill_template(&self.raw, &context.bullets, &context.scalars);
        let leftover: Vec<String> = find_placeholders(&filled).into_iter().collect();

        if !leftover.is_empty() {
            if policy == BulletPolicy::Strict {
                return Err(TemplateError::Unresolved {
                    template: self.name.clone(),
                    names: leftover,
                });
            }
            warn!(
                "Template '{}' rendered with unresolved placeholders: {}",
                self.name,
                leftover.join(", ")
            );
        }

        if context.bullets.len() > slots {
            warn!(
                "Template '{}' dropped {} surplus bullets",
                self.name,
                context.bullets.len() - slots
            );
        }

        Ok(filled)
    }
}

/// The two document templates, loaded and validated at startup.
#[derive(Debug, Clone)]
pub struct Templates {
    pub resume: DocumentTemplate,
    pub cover_letter: DocumentTemplate,
}

impl Templates {
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let resume = DocumentTemplate::load(&dir.join(RESUME_TEMPLATE_FILE))?;
        resume.validate::<ResumeRenderContext>()?;

        let cover_letter = DocumentTemplate::load(&dir.join(COVER_LETTER_TEMPLATE_FILE))?;
        cover_letter.validate::<CoverLetterRenderContext>()?;

        info!(
            "Loaded templates from {} (resume: {} bullet slots)",
            dir.display(),
            resume.bullet_slots()
        );

        Ok(Self {
            resume,
            cover_letter,
        })
    }
}
