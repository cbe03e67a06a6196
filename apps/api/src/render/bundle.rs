//! Packs compiled PDFs into a zip archive under a per-job folder.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::compiler::CompiledDocument;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error while writing archive: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds an in-memory zip holding every PDF as `<folder>/<file>.pdf`.
///
/// Blocking; call from `spawn_blocking`.
pub fn build_archive(folder: &str, documents: &[CompiledDocument]) -> Result<Vec<u8>, BundleError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for document in documents {
        let bytes = std::fs::read(&document.pdf_path).map_err(|source| BundleError::Read {
            path: document.pdf_path.display().to_string(),
            source,
        })?;
        writer.start_file(format!("{folder}/{}", document.pdf_file_name()), options)?;
        writer.write_all(&bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
