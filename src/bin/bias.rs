//! Logit bias payload builder
//!
//! Reads the Japanese id list written by `jp-token-analyzer` and emits a
//! `logit_bias` JSON object for OpenAI-compatible chat completion APIs.
//! Usage: jp-logit-bias --model-name <id> --bias 5.0 [--output bias.json]

use anyhow::{bail, Context, Result};
use clap::Parser;
use jp_token_analyzer::bias::{load_bias_ids, resolve_ids_file, LogitBias};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jp-logit-bias")]
#[command(about = "Build a logit_bias payload from analyzed Japanese token ids")]
struct Args {
    /// TXT id list or JSON report (default: located from the model name)
    #[arg(short, long)]
    ids_file: Option<PathBuf>,

    /// Model id the ids were produced for
    #[arg(short, long)]
    model_name: String,

    /// Bias added to each Japanese token (0 disables)
    #[arg(short, long, default_value = "5.0", allow_negative_numbers = true)]
    bias: f32,

    /// Directory searched for default id files
    #[arg(short, long, default_value = "token_analysis_output")]
    search_dir: PathBuf,

    /// Write the payload here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_payload(args: &Args) -> Result<BTreeMap<String, f32>> {
    if args.bias == 0.0 {
        tracing::info!("Bias is 0, logit bias disabled");
        return Ok(BTreeMap::new());
    }

    let Some(path) = resolve_ids_file(args.ids_file.as_deref(), &args.model_name, &args.search_dir)
    else {
        bail!(
            "no ids file for {} in {}; run jp-token-analyzer first",
            args.model_name,
            args.search_dir.display()
        );
    };

    let ids = load_bias_ids(&path)
        .with_context(|| format!("Failed to read ids file: {}", path.display()))?;
    let bias = LogitBias::new(ids, args.bias);
    if !bias.is_enabled() {
        tracing::warn!("Ids file {} is empty", path.display());
    }

    tracing::info!(
        "Biasing {} tokens by {}",
        bias.token_ids().len(),
        bias.clamped_bias()
    );
    Ok(bias.api_payload())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let payload = build_payload(&args)?;
    let json = serde_json::to_string_pretty(&payload)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write payload: {}", path.display()))?;
            tracing::info!("Logit bias payload saved: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
