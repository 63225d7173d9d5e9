//! Configuration for the extraction pipeline.
//!
//! All pipeline behaviour is controlled through [`PipelineConfig`], built via
//! its [`PipelineConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share the config across tasks and to diff two runs when their
//! outputs differ.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults for
//! the rest; adding a field later does not break existing call sites.

use std::fmt;

use crate::error::ExtractError;

/// Default chat-completions endpoint for the vision oracle.
pub const DEFAULT_ORACLE_BASE_URL: &str = "https://api.openai.com/v1";

/// Default vision-capable model used for OCR transcription.
pub const DEFAULT_ORACLE_MODEL: &str = "gpt-4o-mini";

/// Configuration for a [`crate::Pipeline`].
///
/// # Example
/// ```rust
/// use tripdoc_extract::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .model("gpt-4o")
///     .api_key("sk-test")
///     .oracle_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Base URL of the oracle's OpenAI-compatible API. Default:
    /// [`DEFAULT_ORACLE_BASE_URL`], overridable with `TRIPDOC_ORACLE_BASE_URL`.
    pub base_url: Option<String>,

    /// API key for the oracle. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,

    /// Vision model identifier. Default: [`DEFAULT_ORACLE_MODEL`],
    /// overridable with `TRIPDOC_ORACLE_MODEL`.
    pub model: Option<String>,

    /// Sampling temperature for the OCR call. Default: 0.1.
    ///
    /// Near-zero keeps the model deterministic and faithful to the pixels,
    /// which is exactly what transcription wants. Higher values introduce
    /// creativity that shows up as hallucinated text.
    pub temperature: f32,

    /// Maximum tokens the oracle may generate per image. Default: 4096.
    ///
    /// Dense documents (itineraries with fare tables) can exceed 2 000
    /// output tokens; setting this too low silently truncates the
    /// transcription mid-line.
    pub max_tokens: usize,

    /// Per-oracle-call timeout in seconds. Default: 60. No retry is
    /// performed on timeout — the request fails as a vision error.
    pub oracle_timeout_secs: u64,

    /// Custom OCR system prompt. If `None`, uses
    /// [`crate::prompts::OCR_SYSTEM_PROMPT`].
    pub system_prompt: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: None,
            temperature: 0.1,
            max_tokens: 4096,
            oracle_timeout_secs: 60,
            system_prompt: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("oracle_timeout_secs", &self.oracle_timeout_secs)
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }

    /// The effective base URL: explicit field, then `TRIPDOC_ORACLE_BASE_URL`,
    /// then the built-in default. A trailing slash is stripped so request
    /// paths can be joined with a plain `/`.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| non_empty_env("TRIPDOC_ORACLE_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_ORACLE_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// The effective model: explicit field, then `TRIPDOC_ORACLE_MODEL`,
    /// then the built-in default.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .or_else(|| non_empty_env("TRIPDOC_ORACLE_MODEL"))
            .unwrap_or_else(|| DEFAULT_ORACLE_MODEL.to_string())
    }

    /// The effective API key: explicit field, then `OPENAI_API_KEY`.
    pub fn resolved_api_key(&self) -> Result<String, ExtractError> {
        self.api_key
            .clone()
            .or_else(|| non_empty_env("OPENAI_API_KEY"))
            .ok_or_else(|| {
                ExtractError::InvalidConfig(
                    "no oracle API key: set one on the builder or export OPENAI_API_KEY".into(),
                )
            })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn oracle_timeout_secs(mut self, secs: u64) -> Self {
        self.config.oracle_timeout_secs = secs;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, ExtractError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(ExtractError::InvalidConfig("max_tokens must be ≥ 1".into()));
        }
        if c.oracle_timeout_secs == 0 {
            return Err(ExtractError::InvalidConfig(
                "oracle_timeout_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
