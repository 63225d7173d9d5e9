//! Format extractors: one submodule per supported source format.
//!
//! Each submodule implements exactly one transformation from raw bytes to
//! raw text. Keeping them separate makes each independently testable and
//! lets a backend change (say, a different PDF library) stay contained.
//!
//! ## Data Flow
//!
//! ```text
//! bytes + declared type ──▶ {pdf | email | vision} ──▶ raw text ──▶ sanitize
//! ```
//!
//! 1. [`pdf`]    — text extraction from PDF bytes; CPU-bound, runs in
//!    `spawn_blocking`
//! 2. [`email`]  — RFC822/MIME parsing down to the plain-text body
//! 3. [`vision`] — OCR transcription via the hosted vision oracle; the only
//!    stage with network I/O
//!
//! Sanitization is not a stage here: the dispatcher in [`crate::extract`]
//! applies it unconditionally after whichever extractor ran.

pub mod email;
pub mod pdf;
pub mod vision;
