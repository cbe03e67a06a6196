use serde::{Deserialize, Serialize};

/// Résumé sections that the model is allowed to rewrite.
///
/// Each experience group carries three bullets by convention; nothing here
/// enforces the count; template rendering decides what a mismatch means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub summary: String,
    pub skills_languages: String,
    pub skills_backend: String,
    pub skills_devops: String,
    pub fitkind_bullets: Vec<String>,
    pub cmindset_bullets: Vec<String>,
}

/// A per-request rewrite of [`ResumeContent`]. Same shape, never persisted.
pub type TailoredContent = ResumeContent;

/// Number of bullets each experience group is expected to carry.
pub const BULLETS_PER_GROUP: usize = 3;

impl ResumeContent {
    /// Returns a copy with `f` applied to every textual field, bullets included.
    pub fn map_text(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            summary: f(&self.summary),
            skills_languages: f(&self.skills_languages),
            skills_backend: f(&self.skills_backend),
            skills_devops: f(&self.skills_devops),
            fitkind_bullets: self.fitkind_bullets.iter().map(|b| f(b)).collect(),
            cmindset_bullets: self.cmindset_bullets.iter().map(|b| f(b)).collect(),
        }
    }

    /// Both bullet groups in template order: FitKind first, then CMindset.
    pub fn bullet_queue(&self) -> Vec<String> {
        self.fitkind_bullets
            .iter()
            .chain(self.cmindset_bullets.iter())
            .cloned()
            .collect()
    }

    pub fn has_conventional_shape(&self) -> bool {
        self.fitkind_bullets.len() == BULLETS_PER_GROUP
            && self.cmindset_bullets.len() == BULLETS_PER_GROUP
    }
}
