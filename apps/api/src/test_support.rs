//! Fixtures and fakes shared by unit tests: a canned model backend, a compiler
//! that fakes PDFs, and a ready-made `AppState`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::llm_client::{GenerationConfig, LlmBackend, LlmClient, LlmError};
use crate::models::{ContactInfo, CoverLetterContent, Profile, ResumeContent};
use crate::render::{CompileError, CompiledDocument, DocumentCompiler, Templates};
use crate::state::AppState;

pub const TAILOR_JSON: &str = r#"{
  "summary": "Backend engineer building Python and Kafka services for health and education products",
  "fitkind_bullets": [
    "Built FastAPI services for 40k monthly users, cutting p95 latency from 600ms to 180ms",
    "Designed a Kafka event pipeline processing 2M events per day",
    "Automated Terraform deployments, reducing release time to fifteen minutes"
  ],
  "cmindset_bullets": [
    "Developed Django REST APIs serving 120 schools",
    "Moved reporting to PostgreSQL materialized views, cutting load time by 70 percent",
    "Introduced Prometheus alerting that lowered recovery time to 40 minutes"
  ],
  "skills_languages": "Python, Go, SQL",
  "skills_backend": "FastAPI, Django, Kafka, PostgreSQL",
  "skills_devops": "Docker, Kubernetes, Terraform, AWS"
}"#;

pub const COVER_LETTER_JSON: &str = r#"```json
{
  "opening_paragraph": "I am excited to apply for the Backend Engineer role at Acme & its platform team.",
  "experience_paragraph_one": "At FitKind I built FastAPI services handling 40k users with 99.9% uptime.",
  "experience_paragraph_two": "At CMindset I developed Django APIs for 120 schools.",
  "closing_paragraph": "Thank you for your consideration. I look forward to talking."
}
```"#;

pub fn sample_profile() -> Profile {
    Profile {
        contact: ContactInfo {
            full_name: "Harpreet Singh".to_string(),
            email: "harpreet.singh@example.com".to_string(),
            phone: "+1 (555) 010-2233".to_string(),
            location: "Toronto, ON".to_string(),
            linkedin: "linkedin.com/in/harpreet-singh".to_string(),
            github: "github.com/hsingh".to_string(),
        },
        resume: ResumeContent {
            summary: "Backend engineer with four years of Python and Go experience".to_string(),
            skills_languages: "Python, Go, SQL".to_string(),
            skills_backend: "FastAPI, Django, Kafka".to_string(),
            skills_devops: "Docker, Kubernetes, Terraform".to_string(),
            fitkind_bullets: vec![
                "Built FastAPI services for 40k monthly users".to_string(),
                "Designed a Kafka pipeline processing 2M events per day".to_string(),
                "Automated deployments with Terraform".to_string(),
            ],
            cmindset_bullets: vec![
                "Developed Django REST APIs for 120 schools".to_string(),
                "Cut dashboard load time by 70 percent".to_string(),
                "Introduced Prometheus alerting".to_string(),
            ],
        },
        file_suffix: "Singh".to_string(),
    }
}

pub fn sample_cover_letter() -> CoverLetterContent {
    CoverLetterContent {
        opening_paragraph: "I am applying for the Backend Engineer role.".to_string(),
        experience_paragraph_one: "At FitKind I built APIs.".to_string(),
        experience_paragraph_two: "At CMindset I built pipelines.".to_string(),
        closing_paragraph: "Thank you.".to_string(),
    }
}

pub fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Answers every prompt with fixed text and records what it was asked.
/// Prompts that request the cover-letter schema get `cover_letter` when set.
pub struct CannedBackend {
    response: String,
    cover_letter: Option<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl CannedBackend {
    pub fn always(response: &str) -> Self {
        Self {
            response: response.to_string(),
            cover_letter: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn documents(tailor: &str, cover_letter: &str) -> Self {
        Self {
            cover_letter: Some(cover_letter.to_string()),
            ..Self::always(tailor)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, GenerationConfig)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmBackend for CannedBackend {
    async fn generate(&self, prompt: &str, config: GenerationConfig) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push((prompt.to_string(), config));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.cover_letter {
            Some(letter) if prompt.contains("\"opening_paragraph\"") => Ok(letter.clone()),
            _ => Ok(self.response.clone()),
        }
    }
}

/// Writes `<stem>.tex` and a stub `<stem>.pdf`, or fails every compile when `failing`.
#[derive(Default)]
pub struct FakeCompiler {
    failing: bool,
    sources: Mutex<Vec<(String, String)>>,
}

impl FakeCompiler {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// `(stem, filled template)` for every compile request, in order.
    pub fn sources(&self) -> Vec<(String, String)> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentCompiler for FakeCompiler {
    async fn compile(
        &self,
        source: &str,
        out_dir: &Path,
        stem: &str,
    ) -> Result<CompiledDocument, CompileError> {
        self.sources
            .lock()
            .unwrap()
            .push((stem.to_string(), source.to_string()));

        if self.failing {
            return Err(CompileError::Failed {
                pass: 1,
                code: Some(1),
                diagnostics: "! LaTeX Error: File `missing.sty' not found.".to_string(),
            });
        }

        tokio::fs::create_dir_all(out_dir).await?;
        let tex_path = out_dir.join(format!("{stem}.tex"));
        let pdf_path = out_dir.join(format!("{stem}.pdf"));
        tokio::fs::write(&tex_path, source).await?;
        tokio::fs::write(&pdf_path, format!("%PDF-1.4 {stem}")).await?;
        Ok(CompiledDocument { tex_path, pdf_path })
    }
}

/// App state wired to the shipped templates, the sample profile and the given fakes.
pub fn test_state(
    backend: Arc<CannedBackend>,
    compiler: Arc<FakeCompiler>,
    work_dir: &Path,
) -> AppState {
    let work_dir = work_dir.to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        "WORK_DIR" => Some(work_dir.clone()),
        _ => None,
    })
    .unwrap();

    AppState {
        llm: LlmClient::new(backend, Duration::from_secs(5)),
        config,
        profile: Arc::new(sample_profile()),
        templates: Arc::new(Templates::load(&templates_dir()).unwrap()),
        compiler,
    }
}
