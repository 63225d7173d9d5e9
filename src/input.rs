//! Input and output values for a single extraction call.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// An uploaded document: raw bytes plus the caller-declared media type.
///
/// The pipeline borrows the upload for the duration of one extraction call
/// and never retains it. The declared type is trusted as-is — there is no
/// content sniffing, so a mislabelled upload fails inside the extractor it
/// was dispatched to (see [`crate::error::ExtractError`]).
#[derive(Debug, Clone, Copy)]
pub struct UploadedFile<'a> {
    /// Raw file bytes.
    pub content: &'a [u8],
    /// Caller-supplied MIME type, e.g. `"application/pdf"`.
    pub media_type: &'a str,
}

impl<'a> UploadedFile<'a> {
    pub fn new(content: &'a [u8], media_type: &'a str) -> Self {
        Self {
            content,
            media_type,
        }
    }
}

/// The pipeline's sole output: sanitized plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
}

/// The closed set of supported declared media types.
///
/// `image/jpg` is accepted as an alias of `image/jpeg` because real upload
/// clients send it, even though it was never a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Rfc822,
    PlainText,
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl MediaType {
    /// Parse a declared media type, failing with
    /// [`ExtractError::UnsupportedMediaType`] for anything outside the set.
    ///
    /// Matching is case-insensitive and ignores parameters after `;`
    /// (e.g. `text/plain; charset=utf-8`).
    pub fn parse(declared: &str) -> Result<Self, ExtractError> {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Ok(MediaType::Pdf),
            "message/rfc822" => Ok(MediaType::Rfc822),
            "text/plain" => Ok(MediaType::PlainText),
            "image/jpeg" | "image/jpg" => Ok(MediaType::Jpeg),
            "image/png" => Ok(MediaType::Png),
            "image/gif" => Ok(MediaType::Gif),
            "image/webp" => Ok(MediaType::Webp),
            _ => Err(ExtractError::UnsupportedMediaType {
                media_type: declared.to_string(),
            }),
        }
    }

    /// The canonical MIME string, used verbatim in the image data URI.
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Rfc822 => "message/rfc822",
            MediaType::PlainText => "text/plain",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Gif => "image/gif",
            MediaType::Webp => "image/webp",
        }
    }

    /// Whether this type dispatches to the image OCR extractor.
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            MediaType::Jpeg | MediaType::Png | MediaType::Gif | MediaType::Webp
        )
    }
}
