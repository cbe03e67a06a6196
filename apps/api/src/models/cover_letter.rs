use serde::{Deserialize, Serialize};

/// The four model-written paragraphs of a cover letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetterContent {
    pub opening_paragraph: String,
    pub experience_paragraph_one: String,
    pub experience_paragraph_two: String,
    pub closing_paragraph: String,
}

impl CoverLetterContent {
    pub fn map_text(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            opening_paragraph: f(&self.opening_paragraph),
            experience_paragraph_one: f(&self.experience_paragraph_one),
            experience_paragraph_two: f(&self.experience_paragraph_two),
            closing_paragraph: f(&self.closing_paragraph),
        }
    }
}

/// Static contact block printed on every cover letter.
///
/// Values come from trusted configuration and may contain markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}
