//! System prompt for vision-oracle OCR transcription.
//!
//! Centralising the prompt here keeps it a single source of truth and lets
//! unit tests inspect it without a live oracle. Callers can override it via
//! [`crate::config::PipelineConfig::system_prompt`]; the constant is used
//! only when no override is provided.

/// Default system prompt constraining the oracle to literal transcription.
///
/// The oracle is used strictly as an OCR engine: no summarising, no
/// reformatting, no reasoning about the trip. Travel-document fields are
/// called out explicitly because boarding passes and confirmations carry the
/// downstream-relevant text in small print the model might otherwise skip.
pub const OCR_SYSTEM_PROMPT: &str = "\
You are an OCR transcription engine for travel documents.

Transcribe ALL text visible in the image, literally and completely:
- Include every date, time, location, terminal, gate, seat, and booking \
reference that appears.
- Preserve the reading order a human would use.
- Do not summarise, interpret, translate, or reformat the content.
- Do not describe the image or add commentary.
- If a field is illegible, skip it rather than guessing.

Output only the transcribed text.";

/// Text part of the single user turn accompanying the image.
pub const OCR_USER_INSTRUCTION: &str =
    "Transcribe the text in this travel document image.";
