//! PII sanitization: deterministic, rule-ordered redaction of extracted text.
//!
//! ## Why an ordered rule list?
//!
//! Heuristic regex passes over free text are inherently order-dependent:
//! later, looser patterns must never re-consume text an earlier pass already
//! replaced, and some categories are specializations of others (a full card
//! number must win over an "ending in 1234" reference, which must win over a
//! phone-number match on the same digits). The ruleset is therefore an
//! explicit ordered sequence of independently testable [`RedactionRule`]
//! values, built once and shared read-only, rather than inline sequential
//! string mutation. Each pass is one global substitution over the output of
//! the previous pass.
//!
//! ## Pass order
//!
//! 1. Email addresses            → `[EMAIL REMOVED]`
//! 2. URLs                       → `[URL REMOVED]`
//! 3. Full payment-card numbers  → `[CREDIT CARD REMOVED]`
//! 4. "Ending-in" card references (contextual, then masked digits)
//!                               → `[CARD ENDING REMOVED]`
//! 5. Phone numbers              → `[PHONE NUMBER REMOVED]`
//! 6. National ID numbers        → `[SSN REMOVED]`
//! 7. Labelled account/loyalty numbers, label text preserved
//!                               → `<label> [ACCOUNT NUMBER REMOVED]`
//! 8. Passport-like ID tokens    → `[ID NUMBER REMOVED]`
//!
//! The account pass runs before the generic ID-token heuristic; otherwise the
//! heuristic would consume the digits after an "Account:" label and the label
//! context would be lost. The ID-token pass is a known false-positive risk on
//! booking codes and flight numbers; that behaviour is intentional and
//! tracked at the product level rather than patched here.
//!
//! ## Idempotence
//!
//! `sanitize(sanitize(t)) == sanitize(t)` for all `t`: no placeholder token
//! matches any rule. Every rule that could touch placeholder words requires
//! at least one digit in the match, and the placeholders contain none.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// How a rule rewrites the text it matched.
enum Replacement {
    /// Replace the whole match with a fixed placeholder token.
    Token(&'static str),
    /// Keep the captured label prefix, redact the number:
    /// `"Account: 123456789"` → `"Account [ACCOUNT NUMBER REMOVED]"`.
    KeepLabel,
    /// Passport-style heuristic: redact 6–9 char alphanumeric tokens that
    /// contain a digit, except pure 6- or 8-digit tokens (calendar dates
    /// such as `20240615` must survive).
    IdToken,
}

/// One ordered redaction pass: a pattern plus a replacement strategy.
pub struct RedactionRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RedactionRule {
    /// Rule identifier, for logs and tests.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this single rule as one global substitution.
    pub fn apply(&self, text: &str) -> String {
        match &self.replacement {
            Replacement::Token(token) => self.pattern.replace_all(text, *token).into_owned(),
            Replacement::KeepLabel => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| {
                    format!("{} [ACCOUNT NUMBER REMOVED]", caps[1].trim_end())
                })
                .into_owned(),
            Replacement::IdToken => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| {
                    let token = &caps[0];
                    if is_exempt_id_token(token) {
                        token.to_string()
                    } else {
                        "[ID NUMBER REMOVED]".to_string()
                    }
                })
                .into_owned(),
        }
    }
}

/// Tokens the passport-style heuristic must leave alone: anything without a
/// digit (ordinary words), and pure 6- or 8-digit runs (date shapes).
fn is_exempt_id_token(token: &str) -> bool {
    let mut digits = 0;
    for b in token.bytes() {
        if b.is_ascii_digit() {
            digits += 1;
        }
    }
    if digits == 0 {
        return true;
    }
    digits == token.len() && (token.len() == 6 || token.len() == 8)
}

/// The ruleset, constructed once and shared read-only across requests.
static RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        RedactionRule {
            name: "email",
            pattern: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
            replacement: Replacement::Token("[EMAIL REMOVED]"),
        },
        RedactionRule {
            name: "url",
            pattern: Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"')]+"#).unwrap(),
            replacement: Replacement::Token("[URL REMOVED]"),
        },
        // 13–16 digits, optionally grouped by spaces or hyphens. Must run
        // before the ending-in and phone passes so a full number is never
        // double-matched as a fragment.
        RedactionRule {
            name: "credit-card",
            pattern: Regex::new(r"\b\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{1,4}\b").unwrap(),
            replacement: Replacement::Token("[CREDIT CARD REMOVED]"),
        },
        RedactionRule {
            name: "card-ending-contextual",
            pattern: Regex::new(
                r"(?i)\b(?:(?:card|account|acct)\s+)?(?:ending|ends)\s+(?:in|with)\s+\d{4}\b|\blast\s+(?:4|four)(?:\s+digits?)?\s*:?\s*\d{4}\b",
            )
            .unwrap(),
            replacement: Replacement::Token("[CARD ENDING REMOVED]"),
        },
        RedactionRule {
            name: "card-ending-masked",
            pattern: Regex::new(r"(?i)(?:[x*]{2,4}[\s-]*){1,3}\d{4}\b").unwrap(),
            replacement: Replacement::Token("[CARD ENDING REMOVED]"),
        },
        // Optional country code, 3-3-4 grouping, flexible separators.
        RedactionRule {
            name: "phone",
            pattern: Regex::new(r"(?:\+?\d{1,3}[-. ])?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}\b")
                .unwrap(),
            replacement: Replacement::Token("[PHONE NUMBER REMOVED]"),
        },
        RedactionRule {
            name: "ssn",
            pattern: Regex::new(r"\b\d{3}[- ]\d{2}[- ]\d{4}\b").unwrap(),
            replacement: Replacement::Token("[SSN REMOVED]"),
        },
        // Label word followed by 5+ digits or a 4-4-4 grouping. The label is
        // preserved so the reader still knows what kind of number was
        // removed. Runs before the ID-token heuristic, which would otherwise
        // swallow the digits and orphan the label.
        RedactionRule {
            name: "account-number",
            pattern: Regex::new(
                r"(?i)\b((?:account|acct|member(?:ship)?|loyalty|frequent)(?:\s+(?:flyer|flier|number|no|num|id))*)\s*[#:.]?\s*(\d{4}[- ]\d{4}[- ]\d{4}|\d{5,})\b",
            )
            .unwrap(),
            replacement: Replacement::KeepLabel,
        },
        RedactionRule {
            name: "id-token",
            pattern: Regex::new(r"\b[A-Za-z0-9]{6,9}\b").unwrap(),
            replacement: Replacement::IdToken,
        },
    ]
});

/// The ordered, process-wide redaction ruleset.
pub fn ruleset() -> &'static [RedactionRule] {
    &RULES
}

/// Redact personally identifying content from `input`.
///
/// Applies every rule of [`ruleset`] in order; pass *n*+1 sees the output of
/// pass *n*, not the original text. Purely functional — no I/O, no mutable
/// shared state — and idempotent on already-redacted text.
pub fn sanitize(input: &str) -> String {
    let mut text = input.to_string();
    for rule in ruleset() {
        text = rule.apply(&text);
    }
    text
}
