use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::generation::sanitizer::SanitizerPolicy;
use crate::generation::tailor::TailorSettings;
use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::render::BulletPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub templates_dir: PathBuf,
    pub profile_path: PathBuf,
    /// Parent of the per-request working directories.
    pub work_dir: PathBuf,
    pub latex_program: String,
    pub llm_timeout: Duration,
    pub compile_timeout: Duration,
    pub tailor_temperature: f32,
    pub cover_letter_temperature: f32,
    pub bullet_policy: BulletPolicy,
    pub sanitizer: SanitizerPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'GEMINI_API_KEY' is not set")?,
            gemini_model: get("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base: get("GEMINI_API_BASE", DEFAULT_API_BASE),
            port: parse_var("PORT", &get("PORT", "8000"))?,
            rust_log: get("RUST_LOG", "info"),
            templates_dir: PathBuf::from(get("TEMPLATES_DIR", "templates")),
            profile_path: PathBuf::from(get("PROFILE_PATH", "config/profile.json")),
            work_dir: lookup("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            latex_program: get("LATEX_PROGRAM", "pdflatex"),
            llm_timeout: Duration::from_secs(parse_var(
                "LLM_TIMEOUT_SECS",
                &get("LLM_TIMEOUT_SECS", "120"),
            )?),
            compile_timeout: Duration::from_secs(parse_var(
                "COMPILE_TIMEOUT_SECS",
                &get("COMPILE_TIMEOUT_SECS", "60"),
            )?),
            tailor_temperature: parse_var("TAILOR_TEMPERATURE", &get("TAILOR_TEMPERATURE", "0.3"))?,
            cover_letter_temperature: parse_var(
                "COVER_LETTER_TEMPERATURE",
                &get("COVER_LETTER_TEMPERATURE", "0.7"),
            )?,
            bullet_policy: parse_var("BULLET_POLICY", &get("BULLET_POLICY", "strict"))?,
            sanitizer: parse_var("SANITIZER", &get("SANITIZER", "denylist"))?,
        })
    }

    pub fn tailor_settings(&self) -> TailorSettings {
        TailorSettings {
            tailor_temperature: self.tailor_temperature,
            cover_letter_temperature: self.cover_letter_temperature,
            sanitizer: self.sanitizer,
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{key} has an invalid value '{value}': {e}"))
}
