//! The extraction dispatcher: declared media type → extractor → sanitizer.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::ExtractError;
use crate::input::{ExtractionResult, MediaType, UploadedFile};
use crate::pipeline::vision::{OpenAiOracle, VisionOracle};
use crate::pipeline::{email, pdf};
use crate::sanitize;

/// The document extraction-and-sanitization pipeline.
///
/// Holds the only two pieces of cross-request state: the immutable redaction
/// ruleset (a process-wide static) and at most one long-lived oracle client
/// handle. Requests are otherwise independent and stateless, so a single
/// `Pipeline` can be shared across tasks freely.
///
/// # Example
/// ```rust,no_run
/// use tripdoc_extract::{Pipeline, PipelineConfig, UploadedFile};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = Pipeline::new(PipelineConfig::default())?;
/// let bytes = std::fs::read("confirmation.pdf")?;
/// let result = pipeline
///     .extract(&UploadedFile::new(&bytes, "application/pdf"))
///     .await?;
/// println!("{}", result.text);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    oracle: OracleHandle,
    config: PipelineConfig,
}

enum OracleHandle {
    /// Caller-supplied oracle, fixed at construction.
    Injected(Arc<dyn VisionOracle>),
    /// Default [`OpenAiOracle`], built on the first image request.
    Lazy(OnceCell<Arc<OpenAiOracle>>),
}

impl Pipeline {
    /// Build a pipeline backed by the default [`OpenAiOracle`] vision client.
    ///
    /// The oracle client is constructed lazily, on the first image request.
    /// PDF and email extraction therefore work without any oracle
    /// configuration; a missing API key surfaces as
    /// [`ExtractError::InvalidConfig`] only when an image is submitted.
    pub fn new(config: PipelineConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            oracle: OracleHandle::Lazy(OnceCell::new()),
            config,
        })
    }

    /// Build a pipeline around a caller-supplied oracle.
    ///
    /// This is how tests substitute a stub oracle, and how callers wrap the
    /// client in middleware of their own.
    pub fn with_oracle(oracle: Arc<dyn VisionOracle>, config: PipelineConfig) -> Self {
        Self {
            oracle: OracleHandle::Injected(oracle),
            config,
        }
    }

    fn oracle(&self) -> Result<Arc<dyn VisionOracle>, ExtractError> {
        match &self.oracle {
            OracleHandle::Injected(oracle) => Ok(Arc::clone(oracle)),
            OracleHandle::Lazy(cell) => {
                let oracle =
                    cell.get_or_try_init(|| OpenAiOracle::new(&self.config).map(Arc::new))?;
                let oracle: Arc<dyn VisionOracle> = Arc::<OpenAiOracle>::clone(oracle);
                Ok(oracle)
            }
        }
    }

    /// Extract and sanitize the text of one uploaded document.
    ///
    /// Dispatch is a pure mapping on the declared media type — the bytes are
    /// never sniffed, so a mislabelled upload fails inside the extractor the
    /// label pointed at. The raw text always passes through the sanitizer
    /// before returning; there is no way to obtain unsanitized text from
    /// this API.
    pub async fn extract(
        &self,
        file: &UploadedFile<'_>,
    ) -> Result<ExtractionResult, ExtractError> {
        let media_type = MediaType::parse(file.media_type)?;
        info!(media_type = media_type.mime(), bytes = file.content.len(), "extracting document");

        let raw = match media_type {
            MediaType::Pdf => {
                // pdf parsing is CPU-bound; keep it off the async executor.
                let bytes = file.content.to_vec();
                tokio::task::spawn_blocking(move || pdf::extract(&bytes))
                    .await
                    .map_err(|e| ExtractError::Internal(format!("pdf task panicked: {e}")))??
            }
            MediaType::Rfc822 => email::extract(file.content)?,
            MediaType::PlainText => email::extract_plain(file.content),
            image => {
                let oracle = self.oracle()?;
                oracle.transcribe(file.content, image.mime()).await?
            }
        };

        debug!(raw_chars = raw.len(), "sanitizing extracted text");
        let text = sanitize::sanitize(&raw);
        Ok(ExtractionResult { text })
    }

    /// The pipeline configuration (read-only).
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
