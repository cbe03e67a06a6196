use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::cover_letter::ContactInfo;
use crate::models::resume::{ResumeContent, BULLETS_PER_GROUP};

/// Candidate data every request tailors from.
/// Loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub contact: ContactInfo,
    pub resume: ResumeContent,
    /// Appended to output file names: `resume_<suffix>.pdf`, `cl_<suffix>.pdf`.
    pub file_suffix: String,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile at {}", path.display()))?;
        let profile: Profile = serde_json::from_str(&raw)
            .with_context(|| format!("Profile at {} is not valid JSON", path.display()))?;

        if profile.file_suffix.trim().is_empty() {
            anyhow::bail!("Profile file_suffix must not be empty");
        }

        if !profile.resume.has_conventional_shape() {
            warn!(
                "Profile experience groups have {} and {} bullets (expected {} each)",
                profile.resume.fitkind_bullets.len(),
                profile.resume.cmindset_bullets.len(),
                BULLETS_PER_GROUP
            );
        }

        info!("Loaded profile for {}", profile.contact.full_name);
        Ok(profile)
    }

    pub fn resume_file_stem(&self) -> String {
        format!("resume_{}", self.file_suffix)
    }

    pub fn cover_letter_file_stem(&self) -> String {
        format!("cl_{}", self.file_suffix)
    }
}
