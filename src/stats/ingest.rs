//! Stats file ingestion and validation.
//!
//! Reads a bundler stats file into memory, parses it as JSON, and checks
//! structural minimums before any derived computation runs. Validation
//! failures are terminal: there is no partial-analysis fallback.

use std::fs;
use std::path::Path;

use super::types::{RawModuleRef, RawStats};

/// How many upstream build errors to surface in a `BuildFailed` message.
const ERROR_PREVIEW_COUNT: usize = 3;

/// Errors that abort an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The stats path does not resolve to a readable file.
    #[error("Stats file not found or unreadable: {path}")]
    FileNotFound {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON (an empty file is a degenerate
    /// case of this).
    #[error("Failed to parse stats JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The upstream build reported errors; a failed build cannot be
    /// meaningfully analyzed.
    #[error("Build failed with {count} error(s): {summary}")]
    BuildFailed {
        /// Total number of build errors reported.
        count: usize,
        /// First few error messages, joined for diagnostics.
        summary: String,
    },

    /// The document has no analyzable content or violates size invariants.
    #[error("Invalid stats document: {0}")]
    Schema(String),
}

/// Result type alias for ingestion operations.
pub type IngestResult<T> = Result<T, AnalysisError>;

/// Read and parse a stats file without validating it.
///
/// # Example
///
/// ```ignore
/// use bundlescope::stats::ingest::read_stats;
///
/// let raw = read_stats("stats.json".as_ref())?;
/// println!("{} modules", raw.modules.len());
/// ```
pub fn read_stats(path: &Path) -> IngestResult<RawStats> {
    let content = fs::read_to_string(path).map_err(|source| AnalysisError::FileNotFound {
        path: path.display().to_string(),
        source,
    })?;
    parse_stats(&content)
}

/// Parse a stats document from a JSON string.
pub fn parse_stats(content: &str) -> IngestResult<RawStats> {
    let stats: RawStats = serde_json::from_str(content)?;
    Ok(stats)
}

/// Validate structural minimums of a parsed stats document.
///
/// Checks, in order:
/// 1. The upstream build succeeded (`errors` is empty).
/// 2. At least one of `assets`/`modules`/`chunks` has content.
/// 3. No module, asset, or chunk declares a negative size.
pub fn validate(stats: &RawStats) -> IngestResult<()> {
    if !stats.errors.is_empty() {
        let summary = stats
            .errors
            .iter()
            .take(ERROR_PREVIEW_COUNT)
            .map(|e| e.text().to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AnalysisError::BuildFailed {
            count: stats.errors.len(),
            summary,
        });
    }

    if stats.assets.is_empty() && stats.modules.is_empty() && stats.chunks.is_empty() {
        return Err(AnalysisError::Schema(
            "no assets, modules, or chunks to analyze".to_string(),
        ));
    }

    for asset in &stats.assets {
        if asset.size < 0 {
            return Err(AnalysisError::Schema(format!(
                "asset declares negative size {}",
                asset.size
            )));
        }
    }

    for module in &stats.modules {
        if module.size < 0 {
            return Err(AnalysisError::Schema(format!(
                "module {} declares negative size {}",
                module.name.as_deref().unwrap_or("unknown"),
                module.size
            )));
        }
    }

    for chunk in &stats.chunks {
        if chunk.size < 0 {
            return Err(AnalysisError::Schema(format!(
                "chunk {} declares negative size {}",
                chunk.name.as_deref().unwrap_or("unknown"),
                chunk.size
            )));
        }
        for module_ref in &chunk.modules {
            if let RawModuleRef::Detailed(module) = module_ref {
                if module.size < 0 {
                    return Err(AnalysisError::Schema(format!(
                        "module {} declares negative size {}",
                        module.name.as_deref().unwrap_or("unknown"),
                        module.size
                    )));
                }
            }
        }
    }

    Ok(())
}
