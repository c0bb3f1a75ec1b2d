//! # Site Audit
//!
//! A website-audit pipeline that turns raw crawler dumps into scored
//! audit data. The crawling layer (page fetching, link following,
//! product/article classification) and the report renderers are external
//! collaborators; this binary covers the two stages between them:
//!
//! 1. **Extraction**: Normalize raw page records into typed product and
//!    article collections — strip markup, parse prices and physical
//!    dimensions out of free-text specifications, compute content counters
//! 2. **Analysis**: Score every record and the dataset as a whole —
//!    readability, sentiment, key phrases, specification/image/template
//!    completeness, price formatting, and SEO flag coverage
//!
//! ## Usage
//!
//! ```sh
//! site_audit run data/raw/www_example_com_20250512_230136.json
//! ```
//!
//! ## Architecture
//!
//! Stages are synchronous and file-to-file: each reads one JSON input
//! fully into memory, computes, and writes one fresh timestamped JSON
//! output. Same input, same computed result; reruns never mutate earlier
//! artifacts.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod analyzer;
mod cli;
mod extractor;
mod models;
mod outputs;
mod utils;

use cli::{Cli, Command};
use outputs::json;
use utils::{ensure_writable_dir, file_stem};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("site_audit starting up");

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    match args.command {
        Command::Extract { input, output_dir } => {
            run_extract(&input, &output_dir).await?;
        }
        Command::Analyze { input, output_dir } => {
            run_analyze(&input, &output_dir).await?;
        }
        Command::Run {
            input,
            processed_dir,
            analyzed_dir,
        } => {
            let processed_path = run_extract(&input, &processed_dir).await?;
            run_analyze(&processed_path, &analyzed_dir).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Extraction stage: raw crawler dump in, processed dataset file out.
async fn run_extract(input: &str, output_dir: &str) -> Result<String, Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;

    let raw_pages = json::read_raw_pages(input).await?;
    let dataset = extractor::process(raw_pages);
    info!(
        product_count = dataset.metadata.product_count,
        article_count = dataset.metadata.article_count,
        other_count = dataset.metadata.other_count,
        "Extracted structured records"
    );

    let output_path = json::write_dataset(&dataset, output_dir, &file_stem(input)).await?;
    info!(path = %output_path, "Extraction output written");
    Ok(output_path)
}

/// Analysis stage: processed dataset file in, analysis file out.
async fn run_analyze(input: &str, output_dir: &str) -> Result<String, Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;

    let dataset = json::read_dataset(input).await?;
    let result = analyzer::analyze(&dataset);
    info!(
        product_analyses = result.product_analyses.len(),
        article_analyses = result.article_analyses.len(),
        "Analysis completed"
    );

    let output_path = json::write_analysis(&result, output_dir, &file_stem(input)).await?;
    info!(path = %output_path, "Analysis output written");
    Ok(output_path)
}
