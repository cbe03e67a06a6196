// Document rendering: template filling, LaTeX compilation and output bundling.
// Compilation shells out to an external binary; zipping runs inside spawn_blocking.

pub mod bundle;
pub mod compiler;
pub mod context;
pub mod template;

pub use bundle::{build_archive, BundleError};
pub use compiler::{CompileError, CompiledDocument, DocumentCompiler, PdfLatexCompiler};
pub use context::{CoverLetterRenderContext, ResumeRenderContext};
pub use template::{BulletPolicy, TemplateError, Templates};
