// Document generation: tailoring, cover letters, the end-to-end pipeline.
// All LLM calls go through llm_client; all LaTeX work goes through render.

pub mod generator;
pub mod handlers;
pub mod job_title;
pub mod prompts;
pub mod sanitizer;
pub mod tailor;
