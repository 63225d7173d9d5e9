//! CLI binary for tripdoc-extract.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PipelineConfig` and prints the sanitized text.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tripdoc_extract::{Pipeline, PipelineConfig, UploadedFile};

/// Extract sanitized text from a travel document (PDF, email, or image).
#[derive(Parser, Debug)]
#[command(name = "tripdoc", version, about)]
struct Cli {
    /// Document to process.
    file: PathBuf,

    /// Declared media type, e.g. "application/pdf". Inferred from the file
    /// extension when omitted. The content itself is never sniffed.
    #[arg(long, short = 't')]
    media_type: Option<String>,

    /// Vision model used for image OCR.
    #[arg(long, env = "TRIPDOC_ORACLE_MODEL")]
    model: Option<String>,

    /// Base URL of the OCR oracle's OpenAI-compatible API.
    #[arg(long, env = "TRIPDOC_ORACLE_BASE_URL")]
    oracle_base_url: Option<String>,

    /// Per-oracle-call timeout in seconds.
    #[arg(long, default_value_t = 60)]
    oracle_timeout_secs: u64,
}

/// Map a file extension to a declared media type.
fn media_type_from_extension(path: &PathBuf) -> Option<&'static str> {
    match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "eml" => Some("message/rfc822"),
        "txt" => Some("text/plain"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let media_type = match &cli.media_type {
        Some(t) => t.clone(),
        None => match media_type_from_extension(&cli.file) {
            Some(t) => t.to_string(),
            None => bail!(
                "cannot infer media type of '{}'; pass --media-type",
                cli.file.display()
            ),
        },
    };

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read '{}'", cli.file.display()))?;

    let mut builder = PipelineConfig::builder().oracle_timeout_secs(cli.oracle_timeout_secs);
    if let Some(model) = &cli.model {
        builder = builder.model(model.as_str());
    }
    if let Some(url) = &cli.oracle_base_url {
        builder = builder.base_url(url.as_str());
    }
    let config = builder.build()?;

    let pipeline = Pipeline::new(config)?;
    let result = pipeline
        .extract(&UploadedFile::new(&bytes, &media_type))
        .await
        .context("could not process document")?;

    println!("{}", result.text);
    Ok(())
}
