use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::Profile;
use crate::render::{DocumentCompiler, Templates};

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Candidate data every request tailors from.
    pub profile: Arc<Profile>,
    pub templates: Arc<Templates>,
    /// Pluggable compiler. Default: PdfLatexCompiler with LATEX_PROGRAM.
    pub compiler: Arc<dyn DocumentCompiler>,
}
