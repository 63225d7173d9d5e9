//! Email body extraction.
//!
//! Parses RFC822 (or bare plain-text) bytes and returns the best-effort
//! plain-text body. Attachments, HTML markup beyond `mail-parser`'s own
//! text conversion, and header metadata are all out of scope of the
//! returned text.

use mail_parser::MessageParser;
use tracing::debug;

use crate::error::ExtractError;

/// Extract the plain-text body from RFC822 bytes.
///
/// Returns an empty string when the message parses but carries no text
/// body. When the parse produces neither headers nor a body, the input was
/// a bare text blob rather than a message, and the raw text is returned
/// instead of silently dropping it. Fails with [`ExtractError::Email`] only
/// when the input cannot be parsed as a message at all.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let message = MessageParser::default()
        .parse(bytes)
        .ok_or_else(|| ExtractError::Email {
            detail: "input could not be parsed as an RFC822 message".into(),
        })?;

    let body = message
        .body_text(0)
        .map(|text| text.into_owned())
        .unwrap_or_default();

    // A headerless parse with an empty body means the input was never a
    // message in the first place; its text is the body.
    if body.is_empty() && message.headers().is_empty() {
        debug!(chars = bytes.len(), "no headers parsed, treating input as bare body");
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }

    debug!(chars = body.len(), "extracted email body");
    Ok(body)
}

/// Decode bytes declared as `text/plain`.
///
/// Plain text is taken verbatim. It must not go through the MIME parser: a
/// header-shaped first line such as `"Gate: B12"` would be consumed as a
/// header and vanish from the body.
pub fn extract_plain(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
