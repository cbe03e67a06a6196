//! LaTeX → PDF compilation through an external binary.
//!
//! The compiler runs twice so that references emitted on the first pass are
//! resolved on the second. Every pass is time-boxed and its exit status checked.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

pub const DEFAULT_PASSES: u32 = 2;
const DIAGNOSTIC_TAIL_LINES: usize = 30;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error while compiling: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiler pass {pass} exited with {}:\n{diagnostics}", exit_label(.code))]
    Failed {
        pass: u32,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("Compiler pass {pass} timed out after {secs}s")]
    Timeout { pass: u32, secs: u64 },

    #[error("Compiler finished but produced no PDF at {}", .0.display())]
    MissingOutput(PathBuf),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (killed by signal)".to_string(),
    }
}

/// Paths of a successfully compiled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDocument {
    pub tex_path: PathBuf,
    pub pdf_path: PathBuf,
}

impl CompiledDocument {
    /// `<stem>.pdf`
    pub fn pdf_file_name(&self) -> String {
        self.pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Turns filled template text into a PDF inside `out_dir`.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(
        &self,
        source: &str,
        out_dir: &Path,
        stem: &str,
    ) -> Result<CompiledDocument, CompileError>;
}

/// Shells out to `pdflatex` (or a compatible binary) non-interactively.
#[derive(Debug, Clone)]
pub struct PdfLatexCompiler {
    program: String,
    passes: u32,
    timeout: Duration,
}

impl PdfLatexCompiler {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            passes: DEFAULT_PASSES,
            timeout,
        }
    }

    async fn run_pass(&self, dir: &Path, tex_name: &str, pass: u32) -> Result<(), CompileError> {
        let child = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg(tex_name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CompileError::Timeout {
                pass,
                secs: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            return Err(CompileError::Failed {
                pass,
                code: output.status.code(),
                diagnostics: diagnostics_tail(&output.stdout, &output.stderr),
            });
        }

        debug!("{} pass {pass} succeeded for {tex_name}", self.program);
        Ok(())
    }
}

#[async_trait]
impl DocumentCompiler for PdfLatexCompiler {
    async fn compile(
        &self,
        source: &str,
        out_dir: &Path,
        stem: &str,
    ) -> Result<CompiledDocument, CompileError> {
        tokio::fs::create_dir_all(out_dir).await?;

        let tex_name = format!("{stem}.tex");
        let tex_path = out_dir.join(&tex_name);
        let pdf_path = out_dir.join(format!("{stem}.pdf"));
        tokio::fs::write(&tex_path, source).await?;

        for pass in 1..=self.passes {
            self.run_pass(out_dir, &tex_name, pass).await?;
        }

        if !tokio::fs::try_exists(&pdf_path).await? {
            return Err(CompileError::MissingOutput(pdf_path));
        }

        info!("Compiled {}", pdf_path.display());
        Ok(CompiledDocument { tex_path, pdf_path })
    }
}

/// Last lines of combined stdout/stderr; LaTeX reports errors at the end.
fn diagnostics_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let combined = format!(
        "{}\n{}",
        String::from_utf8_lossy(stdout),
        String::from_utf8_lossy(stderr)
    );
    let lines: Vec<&str> = combined.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(DIAGNOSTIC_TAIL_LINES);
    lines[start..].join("\n")
}
