//! Integration tests for the full extraction pipeline.
//!
//! These drive the dispatcher end to end with a stub vision oracle, so no
//! network access or API key is needed. The oracle contract itself (request
//! shape, response normalization) is covered by unit tests in the library.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tripdoc_extract::{
    ExtractError, Pipeline, PipelineConfig, SourceKind, UploadedFile, VisionOracle,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Canned-reply oracle recording how it was called.
struct StubOracle {
    reply: &'static str,
    calls: AtomicUsize,
    last_mime: Mutex<Option<&'static str>>,
}

impl StubOracle {
    fn new(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_mime: Mutex::new(None),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VisionOracle for StubOracle {
    async fn transcribe(&self, _image: &[u8], mime: &'static str) -> Result<String, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_mime.lock().unwrap() = Some(mime);
        Ok(self.reply.to_string())
    }
}

/// Oracle that always fails at the transport level is not constructible
/// without a reqwest error, so failure paths use this empty-response stub.
struct EmptyOracle;

#[async_trait]
impl VisionOracle for EmptyOracle {
    async fn transcribe(&self, _image: &[u8], _mime: &'static str) -> Result<String, ExtractError> {
        Err(ExtractError::EmptyOracleResponse {
            detail: "no choices in response",
        })
    }
}

fn pipeline_with(oracle: Arc<dyn VisionOracle>) -> Pipeline {
    Pipeline::with_oracle(oracle, PipelineConfig::default())
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unsupported_media_type_fails_without_invoking_any_extractor() {
    let oracle = StubOracle::new("never seen");
    let pipeline = pipeline_with(oracle.clone());

    let err = pipeline
        .extract(&UploadedFile::new(b"PK\x03\x04", "application/zip"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::UnsupportedMediaType { .. }));
    assert_eq!(err.kind(), None);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn invalid_pdf_bytes_fail_with_pdf_kind() {
    let pipeline = pipeline_with(StubOracle::new(""));

    let err = pipeline
        .extract(&UploadedFile::new(b"not a pdf at all", "application/pdf"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(SourceKind::Pdf));
}

#[tokio::test]
async fn declared_type_is_trusted_not_sniffed() {
    // PDF bytes declared as plain text are decoded as text, verbatim.
    // No content sniffing anywhere.
    let pipeline = pipeline_with(StubOracle::new(""));

    let result = pipeline
        .extract(&UploadedFile::new(b"%PDF-1.7 pretend", "text/plain"))
        .await
        .unwrap();

    assert!(result.text.contains("pretend"));
}

#[tokio::test]
async fn images_dispatch_to_the_oracle_with_canonical_mime() {
    let oracle = StubOracle::new("GATE B12 SEAT 14A");
    let pipeline = pipeline_with(oracle.clone());

    let result = pipeline
        .extract(&UploadedFile::new(&[0xFF, 0xD8, 0xFF, 0xE0], "image/jpg"))
        .await
        .unwrap();

    assert_eq!(result.text, "GATE B12 SEAT 14A");
    assert_eq!(oracle.call_count(), 1);
    // image/jpg is normalized to the registered type before the oracle call
    assert_eq!(*oracle.last_mime.lock().unwrap(), Some("image/jpeg"));
}

#[tokio::test]
async fn oracle_failure_propagates_as_vision_kind() {
    let pipeline = pipeline_with(Arc::new(EmptyOracle));

    let err = pipeline
        .extract(&UploadedFile::new(&[0x89, 0x50, 0x4E, 0x47], "image/png"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(SourceKind::Vision));
}

// ── Extraction + sanitization ────────────────────────────────────────────────

#[tokio::test]
async fn email_end_to_end_scenario() {
    let pipeline = pipeline_with(StubOracle::new(""));
    let raw = b"From: jane@example.com\r\n\
                To: trips@example.org\r\n\
                Subject: hello\r\n\
                \r\n\
                Contact me at jane@example.com or call 415-555-1234.\r\n";

    let result = pipeline
        .extract(&UploadedFile::new(raw, "message/rfc822"))
        .await
        .unwrap();

    assert_eq!(
        result.text.trim(),
        "Contact me at [EMAIL REMOVED] or call [PHONE NUMBER REMOVED]."
    );
}

#[tokio::test]
async fn plain_text_body_is_sanitized() {
    let pipeline = pipeline_with(StubOracle::new(""));

    let result = pipeline
        .extract(&UploadedFile::new(
            b"Account: 123456789 belongs to jane@example.com",
            "text/plain",
        ))
        .await
        .unwrap();

    assert!(result.text.contains("Account [ACCOUNT NUMBER REMOVED]"));
    assert!(result.text.contains("[EMAIL REMOVED]"));
    assert!(!result.text.contains("123456789"));
}

#[tokio::test]
async fn plain_text_keeps_header_shaped_lines() {
    // A colon-separated first line must not be mistaken for an email header.
    let pipeline = pipeline_with(StubOracle::new(""));

    let result = pipeline
        .extract(&UploadedFile::new(
            b"Gate: B12\nBoarding at 9am\nSeat 14A",
            "text/plain",
        ))
        .await
        .unwrap();

    assert!(result.text.contains("Gate: B12"), "first line lost: {:?}", result.text);
    assert!(result.text.contains("Seat 14A"));
}

#[tokio::test]
async fn documents_need_no_oracle_configuration() {
    // PDF and email extraction work without any API key or base URL; the
    // vision client is only built when an image actually arrives.
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();

    let result = pipeline
        .extract(&UploadedFile::new(
            b"Reach me at jane@example.com",
            "text/plain",
        ))
        .await
        .unwrap();
    assert_eq!(result.text, "Reach me at [EMAIL REMOVED]");

    let raw = b"From: agent@travel.example\r\n\r\nSee you Tuesday.\r\n";
    let result = pipeline
        .extract(&UploadedFile::new(raw, "message/rfc822"))
        .await
        .unwrap();
    assert_eq!(result.text.trim(), "See you Tuesday.");
}

#[tokio::test]
async fn ocr_output_cannot_bypass_the_sanitizer() {
    let oracle = StubOracle::new(
        "BOARDING PASS\nPassenger: JANE DOE\nCard on file: 4111 1111 1111 1111\nRef: QX7R2P9",
    );
    let pipeline = pipeline_with(oracle);

    let result = pipeline
        .extract(&UploadedFile::new(&[0x47, 0x49, 0x46], "image/gif"))
        .await
        .unwrap();

    assert!(result.text.contains("[CREDIT CARD REMOVED]"));
    assert!(result.text.contains("[ID NUMBER REMOVED]"));
    assert!(!result.text.contains("4111"));
    assert!(!result.text.contains("QX7R2P9"));
    assert!(result.text.contains("BOARDING PASS"));
}
