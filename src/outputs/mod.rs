//! File input/output for the pipeline stages.
//!
//! # Submodules
//!
//! - [`json`]: Reads stage inputs and writes timestamped stage outputs
//!
//! # Output Structure
//!
//! Each run creates fresh, timestamped artifacts; nothing is ever updated
//! in place:
//!
//! ```text
//! data/processed/
//! └── processed_<source>_<YYYYmmdd_HHMMSS>.json
//! data/analyzed/
//! └── analyzed_<source>_<YYYYmmdd_HHMMSS>.json
//! ```

pub mod json;
