mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiBackend, LlmClient};
use crate::models::Profile;
use crate::render::{PdfLatexCompiler, Templates};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Candidate profile and LaTeX templates are read once and shared
    let profile = Profile::load(&config.profile_path)?;
    let templates = Templates::load(&config.templates_dir)
        .with_context(|| format!("Failed to load templates from {}", config.templates_dir.display()))?;
    info!("Templates loaded from {}", config.templates_dir.display());

    // Initialize LLM client
    let backend = GeminiBackend::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
        config.llm_timeout,
    )?;
    let llm = LlmClient::new(Arc::new(backend), config.llm_timeout);
    info!("LLM client initialized (model: {})", config.gemini_model);

    let compiler = PdfLatexCompiler::new(config.latex_program.clone(), config.compile_timeout);
    info!(
        "Compiler: {} (timeout {}s), work dir {}",
        config.latex_program,
        config.compile_timeout.as_secs(),
        config.work_dir.display()
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        profile: Arc::new(profile),
        templates: Arc::new(templates),
        compiler: Arc::new(compiler),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
