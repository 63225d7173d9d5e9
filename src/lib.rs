//! # tripdoc-extract
//!
//! Turn an uploaded travel document — a PDF, an RFC822/plain-text email, or
//! a raster image — into sanitized plain text fit for downstream itinerary
//! processing.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes + declared media type
//!  │
//!  ├─ 1. Dispatch  closed mapping on the declared type (no sniffing)
//!  ├─ 2. Extract   pdf-extract │ mail-parser │ vision-oracle OCR
//!  └─ 3. Sanitize  ordered PII redaction passes (always applied)
//! ```
//!
//! The sanitizer replaces emails, URLs, payment-card numbers, "ending-in"
//! card references, phone numbers, national IDs, labelled account numbers,
//! and passport-like tokens with fixed placeholders, in a documented order
//! (see [`sanitize`]). Raw text never leaves the pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tripdoc_extract::{Pipeline, PipelineConfig, UploadedFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Oracle key auto-detected from OPENAI_API_KEY when an image arrives
//!     let pipeline = Pipeline::new(PipelineConfig::default())?;
//!     let bytes = std::fs::read("boarding-pass.png")?;
//!     let result = pipeline
//!         .extract(&UploadedFile::new(&bytes, "image/png"))
//!         .await?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Supported media types
//!
//! | Declared type | Extractor |
//! |---------------|-----------|
//! | `application/pdf` | PDF text extraction |
//! | `message/rfc822` | email body extraction |
//! | `text/plain` | direct text decoding |
//! | `image/jpeg` (+`image/jpg`), `image/png`, `image/gif`, `image/webp` | vision-oracle OCR |
//!
//! Anything else fails with [`ExtractError::UnsupportedMediaType`] before
//! any extractor runs.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tripdoc` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod input;
pub mod pipeline;
pub mod prompts;
pub mod sanitize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{ExtractError, SourceKind};
pub use extract::Pipeline;
pub use input::{ExtractionResult, MediaType, UploadedFile};
pub use pipeline::vision::{OpenAiOracle, VisionOracle};
pub use sanitize::sanitize;
