//! Utility functions for timestamps and file system checks.
//!
//! This module provides the helpers shared by both pipeline stages:
//! - Timestamp formatting for metadata fields and output filenames
//! - Filename stem extraction for deriving output names from input paths
//! - Output directory validation before any work is done

use chrono::Local;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Current local time as an ISO-8601 string with microseconds.
///
/// Embedded in the `processed_timestamp`, `extraction_timestamp`, and
/// `analysis_timestamp` metadata fields.
pub fn iso_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Current local time as a filename-safe slug.
///
/// Every pipeline run stamps its output files with this slug so reruns
/// create fresh artifacts instead of overwriting prior ones.
///
/// # Examples
///
/// ```ignore
/// // e.g. "20250512_230136"
/// let slug = timestamp_slug();
/// ```
pub fn timestamp_slug() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// The filename stem of a path, used to carry the source name through the
/// generated output filenames.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(file_stem("data/raw/www_example_com_20250512.json"), "www_example_com_20250512");
/// ```
pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_shape() {
        let ts = iso_timestamp();
        assert_eq!(&ts[4..5], "-");
        assert!(ts.contains('T'));
        assert!(ts.contains('.'));
    }

    #[test]
    fn test_timestamp_slug_shape() {
        let slug = timestamp_slug();
        assert_eq!(slug.len(), 15);
        assert_eq!(&slug[8..9], "_");
        assert!(slug.replace('_', "").chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("data/raw/site_dump.json"), "site_dump");
        assert_eq!(file_stem("site_dump.json"), "site_dump");
        assert_eq!(file_stem("no_extension"), "no_extension");
    }

    #[test]
    fn test_ensure_writable_dir() {
        let dir = std::env::temp_dir().join("site_audit_probe_test");
        let path = dir.to_string_lossy().into_owned();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(ensure_writable_dir(&path)).unwrap();
        assert!(dir.is_dir());
        let _ = stdfs::remove_dir_all(&dir);
    }
}
