//! PDF text extraction.
//!
//! Pulls text content in document order via `pdf-extract`. There is no
//! layout reconstruction and no OCR fallback for scanned, image-only PDFs —
//! those come back (near-)empty rather than failing. Encrypted or malformed
//! input surfaces as [`ExtractError::Pdf`] with the library error attached.

use tracing::debug;

use crate::error::ExtractError;

/// Extract text from PDF bytes.
///
/// Parsing is CPU-bound, so the caller is expected to run this inside
/// `spawn_blocking` (the dispatcher does).
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|source| ExtractError::Pdf { source })?;
    debug!(chars = text.len(), "extracted PDF text");
    Ok(text)
}
