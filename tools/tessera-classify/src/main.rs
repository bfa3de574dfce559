//! Tessera Classify
//!
//! Runs the classification pipeline over `.torrent` files (or bare info
//! dictionaries) and prints one JSON line per input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use tessera::action::Compiler;
use tessera::metainfo::compute_info_hash;
use tessera::{
    Cancellation, Classification, ClassifierConfig, ContentType, InfoHash, Pipeline,
    ReleaseIndex, Torrent, cancellation,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser)]
#[command(name = "tessera-classify")]
#[command(about = "Classify torrent metadata into structured content records")]
#[command(version)]
struct Cli {
    /// Bencoded .torrent files or bare info dictionaries
    #[arg(required_unless_present = "schema")]
    files: Vec<PathBuf>,

    /// Info hash the metadata must hash to (single input only; default: computed)
    #[arg(short, long)]
    expect: Option<InfoHash>,

    /// Content type hint, e.g. movie or tv_show
    #[arg(long)]
    hint: Option<ContentType>,

    /// JSON classifier configuration
    #[arg(short, long, env = "TESSERA_CONFIG")]
    config: Option<PathBuf>,

    /// JSON list of known releases to attach
    #[arg(short, long, env = "TESSERA_RELEASES")]
    releases: Option<PathBuf>,

    /// Override the configured files threshold
    #[arg(long)]
    files_threshold: Option<usize>,

    /// Override the configured search timeout, in milliseconds
    #[arg(long)]
    search_timeout_ms: Option<u64>,

    /// Print the workflow JSON Schema and exit
    #[arg(long)]
    schema: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    file: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    torrent: Option<Torrent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn load_config(cli: &Cli) -> Result<ClassifierConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ClassifierConfig::new(),
    };
    if let Some(threshold) = cli.files_threshold {
        config = config.with_files_threshold(threshold);
    }
    if let Some(ms) = cli.search_timeout_ms {
        config = config.with_search_timeout(Some(std::time::Duration::from_millis(ms)));
    }
    Ok(config)
}

fn load_releases(path: Option<&Path>) -> Result<ReleaseIndex> {
    let Some(path) = path else {
        return Ok(ReleaseIndex::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read releases {}", path.display()))?;
    let index = ReleaseIndex::from_json(&text)
        .with_context(|| format!("Invalid releases {}", path.display()))?;
    info!(releases = index.len(), "loaded release index");
    Ok(index)
}

async fn classify_file(
    pipeline: &Pipeline,
    cancel: &Cancellation,
    path: &Path,
    expect: Option<InfoHash>,
    hint: Option<ContentType>,
) -> Result<(Torrent, Classification)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let info_hash = match expect {
        Some(hash) => hash,
        None => compute_info_hash(&bytes).context("Failed to hash metadata")?,
    };
    let classified = pipeline
        .classify_bytes(cancel, info_hash, &bytes, hint)
        .await
        .with_context(|| format!("Failed to classify {}", path.display()))?;
    Ok(classified)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.schema {
        let schema = Compiler::default().json_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    if cli.expect.is_some() && cli.files.len() != 1 {
        bail!("--expect applies to exactly one input file");
    }

    let config = load_config(&cli)?;
    let search = Arc::new(load_releases(cli.releases.as_deref())?);
    let pipeline = Pipeline::new(config, search).context("Failed to build pipeline")?;

    let (handle, cancel) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let mut failures = 0usize;
    for file in &cli.files {
        let output = match classify_file(&pipeline, &cancel, file, cli.expect, cli.hint).await {
            Ok((torrent, classification)) => Output {
                file,
                torrent: Some(torrent),
                classification: Some(classification),
                error: None,
            },
            Err(e) => {
                failures += 1;
                error!(file = %file.display(), "{e:#}");
                Output {
                    file,
                    torrent: None,
                    classification: None,
                    error: Some(format!("{e:#}")),
                }
            }
        };
        println!("{}", serde_json::to_string(&output)?);
    }

    info!(files = cli.files.len(), failures, "done");
    if failures > 0 {
        bail!("{failures} of {} inputs failed", cli.files.len());
    }
    Ok(())
}
