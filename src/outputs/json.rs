//! JSON file reading and writing for the pipeline stages.
//!
//! Each stage reads its entire input file into memory and writes one new
//! timestamped output file. Read and parse failures are stage-fatal and
//! propagate to the caller; there is no partial-success mode.

use crate::analyzer::results::AnalysisResult;
use crate::models::{ProcessedDataset, RawPageRecord};
use crate::utils::timestamp_slug;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Read a raw crawler dump: a JSON array of page records.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn read_raw_pages(path: &str) -> Result<Vec<RawPageRecord>, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    let records: Vec<RawPageRecord> = serde_json::from_str(&contents)?;
    info!(count = records.len(), "Read raw page records");
    Ok(records)
}

/// Read a previously written [`ProcessedDataset`].
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn read_dataset(path: &str) -> Result<ProcessedDataset, Box<dyn Error>> {
    let contents = fs::read_to_string(path).await?;
    let dataset: ProcessedDataset = serde_json::from_str(&contents)?;
    info!(
        product_count = dataset.metadata.product_count,
        article_count = dataset.metadata.article_count,
        "Read processed dataset"
    );
    Ok(dataset)
}

/// Write a [`ProcessedDataset`] to a fresh timestamped file.
///
/// The file is written to
/// `{output_dir}/processed_{source_stem}_{timestamp}.json` and the full
/// path is returned so the caller can chain the analysis stage onto it.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_dataset(
    dataset: &ProcessedDataset,
    output_dir: &str,
    source_stem: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(dataset)?;
    let path = format!(
        "{}/processed_{}_{}.json",
        output_dir.trim_end_matches('/'),
        source_stem,
        timestamp_slug()
    );
    write_file(&path, output_dir, json).await?;
    Ok(path)
}

/// Write an [`AnalysisResult`] to a fresh timestamped file.
///
/// The file is written to
/// `{output_dir}/analyzed_{source_stem}_{timestamp}.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_analysis(
    result: &AnalysisResult,
    output_dir: &str,
    source_stem: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;
    let path = format!(
        "{}/analyzed_{}_{}.json",
        output_dir.trim_end_matches('/'),
        source_stem,
        timestamp_slug()
    );
    write_file(&path, output_dir, json).await?;
    Ok(path)
}

async fn write_file(path: &str, output_dir: &str, json: String) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(%output_dir, error = %e, "Failed to create output dir");
        return Err(e.into());
    }
    info!(%path, "Writing JSON");
    fs::write(path, json).await?;
    info!(%path, "Wrote JSON file");
    Ok(())
}
