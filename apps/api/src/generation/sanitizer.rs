//! Sanitizer: strips characters that would break LaTeX compilation from model output.

use std::str::FromStr;

/// Characters LaTeX treats as control syntax.
const LATEX_RESERVED: &[char] = &['#', '$', '%', '&', '_', '{', '}', '\\', '^', '~', '|'];

/// Punctuation the allowlist policy keeps besides ASCII alphanumerics.
const ALLOWED_PUNCTUATION: &[char] = &[' ', ',', '/', '.', '-'];

/// Which characters survive sanitization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SanitizerPolicy {
    /// Remove LaTeX-reserved characters, keep everything else.
    #[default]
    Denylist,
    /// Keep only ASCII alphanumerics, space, comma, slash, dot and hyphen.
    Allowlist,
}

impl SanitizerPolicy {
    pub fn apply(self, text: &str) -> String {
        match self {
            SanitizerPolicy::Denylist => sanitize_latex(text),
            SanitizerPolicy::Allowlist => sanitize_allowlist(text),
        }
    }
}

impl FromStr for SanitizerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "denylist" => Ok(SanitizerPolicy::Denylist),
            "allowlist" => Ok(SanitizerPolicy::Allowlist),
            other => Err(format!(
                "unknown sanitizer policy '{other}' (expected denylist or allowlist)"
            )),
        }
    }
}

/// Removes LaTeX-reserved characters and trims surrounding whitespace.
pub fn sanitize_latex(text: &str) -> String {
    text.chars()
        .filter(|c| !LATEX_RESERVED.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Keeps only allowlisted characters and trims surrounding whitespace.
pub fn sanitize_allowlist(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
