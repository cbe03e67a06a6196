// Shared prompt fragments.
// Each document type builds its own prompt in generation/prompts.rs from these.

/// Enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Forbids invented experience, tools or metrics.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Do NOT invent experience, employers, projects or technologies that are not \
    present in the current content. Do NOT add new technologies. \
    Do NOT invent numbers; keep every metric exactly as written. \
    Do NOT replace concrete metrics with vague ones such as 'significantly', \
    'greatly' or 'various'.";

/// Characters that break LaTeX compilation; the sanitizer strips any that slip through.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Use plain text only. Never use any of these characters: # $ % & _ { } \\ ^ ~ | \
    Write 'percent' instead of the percent sign and 'and' instead of the ampersand. \
    Commas, periods, hyphens and slashes are allowed.";
