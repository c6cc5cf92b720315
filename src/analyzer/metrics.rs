//! Aggregate scalar metrics for the bundle.

use serde::{Deserialize, Serialize};

use super::extract::BundleStats;

/// Brotli typically lands around 17% below gzip; a fixed estimate.
const BROTLI_RATIO: f64 = 0.83;

/// Name and size of the single largest module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    /// Module name.
    pub name: String,

    /// Module size in bytes.
    pub size: u64,

    /// Gzip-compressed size, when reported.
    pub gzip_size: Option<u64>,

    /// Share of the total bundle size.
    pub percentage: f64,
}

impl Default for ModuleSummary {
    fn default() -> Self {
        Self {
            name: "N/A".to_string(),
            size: 0,
            gzip_size: None,
            percentage: 0.0,
        }
    }
}

/// Aggregate scalar metrics derived from the canonical stats.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetrics {
    /// Total bundle size in bytes.
    pub total_size: u64,

    /// Total gzip-compressed size in bytes.
    pub total_gzip_size: u64,

    /// Estimated Brotli size (gzip x 0.83); absent when gzip is unreported.
    pub estimated_brotli_size: Option<u64>,

    /// Number of modules.
    pub module_count: usize,

    /// Number of chunks.
    pub chunk_count: usize,

    /// The single largest module ("N/A" placeholder when there are none).
    pub largest_module: ModuleSummary,

    /// Arithmetic mean module size in bytes (0 when there are no modules).
    pub average_module_size: f64,
}

/// Compute aggregate metrics.
///
/// Relies on the module list already being sorted descending by size, so
/// the largest module is simply the first element.
pub fn compute_metrics(stats: &BundleStats) -> BundleMetrics {
    let largest_module = stats
        .modules
        .first()
        .map(|m| ModuleSummary {
            name: m.name.clone(),
            size: m.size,
            gzip_size: m.gzip_size,
            percentage: m.percentage,
        })
        .unwrap_or_default();

    let average_module_size = if stats.modules.is_empty() {
        0.0
    } else {
        let total: u64 = stats.modules.iter().map(|m| m.size).sum();
        total as f64 / stats.modules.len() as f64
    };

    let estimated_brotli_size = if stats.total_gzip_size > 0 {
        Some((stats.total_gzip_size as f64 * BROTLI_RATIO) as u64)
    } else {
        None
    };

    BundleMetrics {
        total_size: stats.total_size,
        total_gzip_size: stats.total_gzip_size,
        estimated_brotli_size,
        module_count: stats.modules.len(),
        chunk_count: stats.chunks.len(),
        largest_module,
        average_module_size,
    }
}
