//! Error types for the tripdoc-extract library.
//!
//! Every failure is terminal for the current request: nothing is retried or
//! locally recovered. The variants preserve the originating library or
//! transport error as `#[source]` so diagnostics keep the full chain, while
//! [`ExtractError::kind`] gives callers (typically an HTTP layer) a stable
//! failure-source label without matching on variants.

use thiserror::Error;

/// All errors returned by the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The declared media type is not in the supported set.
    ///
    /// Raised by the dispatcher before any extractor runs.
    #[error("unsupported media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },

    /// PDF text extraction failed (malformed, encrypted, or unreadable PDF).
    #[error("PDF text extraction failed")]
    Pdf {
        #[source]
        source: pdf_extract::OutputError,
    },

    /// The email bytes could not be parsed as an RFC822 message.
    #[error("email parsing failed: {detail}")]
    Email { detail: String },

    /// The vision oracle call failed at the transport or HTTP level.
    #[error("vision OCR request failed")]
    Vision {
        #[source]
        source: reqwest::Error,
    },

    /// The oracle answered but carried no usable text (no choices, or an
    /// empty/missing content field).
    #[error("vision oracle returned an empty response: {detail}")]
    EmptyOracleResponse { detail: &'static str },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error (e.g. a blocking task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The extraction source that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Email,
    Vision,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Pdf => write!(f, "pdf"),
            SourceKind::Email => write!(f, "email"),
            SourceKind::Vision => write!(f, "vision"),
        }
    }
}

impl ExtractError {
    /// The failure-source kind, when the error came from one of the three
    /// extractors. `None` for dispatch and configuration errors.
    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            ExtractError::Pdf { .. } => Some(SourceKind::Pdf),
            ExtractError::Email { .. } => Some(SourceKind::Email),
            ExtractError::Vision { .. } | ExtractError::EmptyOracleResponse { .. } => {
                Some(SourceKind::Vision)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_media_type_display() {
        let e = ExtractError::UnsupportedMediaType {
            media_type: "application/zip".into(),
        };
        assert!(e.to_string().contains("application/zip"));
        assert_eq!(e.kind(), None);
    }

    #[test]
    fn empty_oracle_response_is_vision_kind() {
        let e = ExtractError::EmptyOracleResponse {
            detail: "no choices in response",
        };
        assert_eq!(e.kind(), Some(SourceKind::Vision));
        assert!(e.to_string().contains("no choices"));
    }

    #[test]
    fn source_kind_labels() {
        assert_eq!(SourceKind::Pdf.to_string(), "pdf");
        assert_eq!(SourceKind::Email.to_string(), "email");
        assert_eq!(SourceKind::Vision.to_string(), "vision");
    }

    #[test]
    fn email_error_display() {
        let e = ExtractError::Email {
            detail: "not an RFC822 message".into(),
        };
        assert!(e.to_string().contains("not an RFC822 message"));
        assert_eq!(e.kind(), Some(SourceKind::Email));
    }
}
