//! Japanese token analyzer - vocabulary classification CLI
//!
//! Loads a Hugging Face tokenizer, classifies every token id by its Japanese
//! script content, writes the JSON report and id lists, and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use jp_token_analyzer::analysis::{Category, TokenClassifier};
use jp_token_analyzer::cli::Display;
use jp_token_analyzer::output::{write_id_lists, write_report, IdListSource, EXPORTED_LISTS};
use jp_token_analyzer::vocab::loader;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jp-token-analyzer")]
#[command(about = "Classify a tokenizer vocabulary by Japanese script content")]
struct Args {
    /// Path to tokenizer.json
    #[arg(short, long)]
    tokenizer: PathBuf,

    /// Model id used in output file names (default: tokenizer directory name)
    #[arg(short, long)]
    model_id: Option<String>,

    /// Ids below this value are excluded from analysis
    #[arg(long, default_value = "102")]
    min_token_id: u32,

    /// Directory for the JSON report and id lists
    #[arg(short, long, default_value = "token_analysis_output")]
    output_dir: PathBuf,

    /// Extra special token id to exclude (repeatable)
    #[arg(long = "special-id")]
    special_ids: Vec<u32>,

    /// Example tokens printed per category (0 disables)
    #[arg(short, long, default_value = "10")]
    examples: usize,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// Model id derived from the tokenizer location
fn default_model_id(tokenizer: &Path) -> String {
    tokenizer
        .parent()
        .and_then(|dir| dir.file_name())
        .or_else(|| tokenizer.file_stem())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}

/// Lists shown as examples: the exported files, then categories without one
fn example_lists() -> Vec<(&'static str, IdListSource)> {
    let mut lists = EXPORTED_LISTS.to_vec();
    lists.push((
        Category::ContainsDigit.name(),
        IdListSource::Category(Category::ContainsDigit),
    ));
    lists
}

fn progress_bar(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("decoding tokens");
    Ok(pb)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let model_id = args
        .model_id
        .clone()
        .unwrap_or_else(|| default_model_id(&args.tokenizer));
    tracing::info!("Analyzing tokenizer for {}", model_id);

    let pb = progress_bar(args.no_progress)?;
    let vocab = loader::from_tokenizer_file(&args.tokenizer, Some(&pb))
        .with_context(|| format!("Failed to load vocabulary: {}", args.tokenizer.display()))?
        .with_special_ids(args.special_ids.iter().copied());
    pb.finish_and_clear();

    let result = TokenClassifier::default().classify(&vocab, args.min_token_id);
    tracing::info!(
        "Classified {} tokens ({} excluded)",
        result.analyzed_count(),
        result.excluded_count()
    );

    write_report(&args.output_dir, &model_id, &result).context("Failed to write report")?;
    let written =
        write_id_lists(&args.output_dir, &model_id, &result).context("Failed to write id lists")?;
    tracing::info!("Wrote {} id lists to {}", written.len(), args.output_dir.display());

    let display = Display::new();
    display.show_summary(&model_id, &result)?;

    if args.examples > 0 {
        for (name, source) in example_lists() {
            display.show_examples(name, source, &vocab, &result, args.examples)?;
        }
    }

    Ok(())
}
