//! Command-line interface definitions for the site audit pipeline.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Each pipeline stage can be run on its own, or `run` chains
//! extraction and analysis over a single raw dump.

use clap::{Parser, Subcommand};

/// Command-line arguments for the site audit pipeline.
///
/// # Examples
///
/// ```sh
/// # Extract structured records from a raw crawl dump
/// site_audit extract data/raw/www_example_com_20250512_230136.json
///
/// # Score a previously extracted dataset
/// site_audit analyze data/processed/processed_www_example_com_20250512_230136.json
///
/// # Full pipeline in one invocation
/// site_audit run data/raw/www_example_com_20250512_230136.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// The pipeline stages exposed as subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract typed product/article records from a raw crawler dump
    Extract {
        /// Path to the raw crawler JSON file
        input: String,

        /// Output directory for the processed dataset
        #[arg(short, long, default_value = "data/processed")]
        output_dir: String,
    },

    /// Compute content, SEO, and readability scores for a processed dataset
    Analyze {
        /// Path to a processed dataset file
        input: String,

        /// Output directory for the analysis results
        #[arg(short, long, default_value = "data/analyzed")]
        output_dir: String,
    },

    /// Run extraction and analysis back to back on a raw crawler dump
    Run {
        /// Path to the raw crawler JSON file
        input: String,

        /// Output directory for the processed dataset
        #[arg(long, default_value = "data/processed")]
        processed_dir: String,

        /// Output directory for the analysis results
        #[arg(long, default_value = "data/analyzed")]
        analyzed_dir: String,
    },
}
