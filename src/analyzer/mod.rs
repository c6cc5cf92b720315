//! Bundle analysis pipeline.
//!
//! Single-pass, in-memory derivation over one parsed stats document: extract
//! canonical modules/chunks, derive package groupings, duplicates, heuristic
//! findings, chunk statistics, recommendations, and aggregate metrics, and
//! assemble everything into one immutable [`AnalysisResult`].
//!
//! # Example
//!
//! ```ignore
//! use bundlescope::analyzer::{Analyzer, AnalyzerOptions};
//!
//! let mut analyzer = Analyzer::new(AnalyzerOptions::default());
//! let result = analyzer.analyze_file("stats.json".as_ref())?;
//! println!("{} modules, {} bytes", result.metrics.module_count, result.metrics.total_size);
//! ```

pub mod chunks;
pub mod extract;
pub mod heuristics;
pub mod metrics;
pub mod packages;
pub mod recommend;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::{ingest, RawStats};

// Re-export main types for convenience
pub use chunks::{analyze_chunks, ChunkAnalysis, ChunkSummary};
pub use extract::{extract, BundleStats, Chunk, Extraction, Module};
pub use heuristics::{find_unused, tree_shaking_issues, UnusedModule};
pub use metrics::{compute_metrics, BundleMetrics, ModuleSummary};
pub use packages::{extract_package_name, find_duplicates, package_stats, DuplicateGroup, PackageStats};
pub use recommend::{recommendations, Recommendation, Severity};

/// Resolved analysis thresholds.
///
/// The analyzer is agnostic to where these values came from; callers merge
/// config-file defaults and CLI overrides before constructing it.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Gzip size above which the bundle is critically large, in bytes.
    pub gzip_critical: u64,

    /// Gzip size above which the bundle deserves a warning, in bytes.
    pub gzip_warning: u64,

    /// Bundle share above which a single module is flagged, in percent.
    pub large_module_percent: f64,

    /// Module count above which an informational note fires.
    pub max_modules: usize,

    /// Average chunk size above which splitting is advised, in bytes.
    pub avg_chunk_size_limit: u64,

    /// Chunk count above which tiny-chunk overhead is checked.
    pub max_chunks: usize,

    /// Average chunk size below which chunks count as tiny, in bytes.
    pub tiny_chunk_size: u64,

    /// Initial load size above which deferral is advised, in bytes.
    pub initial_size_limit: u64,

    /// Largest/smallest chunk ratio above which imbalance is flagged.
    pub imbalance_ratio: u64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            gzip_critical: 500_000,
            gzip_warning: 250_000,
            large_module_percent: 5.0,
            max_modules: 500,
            avg_chunk_size_limit: 500_000,
            max_chunks: 20,
            tiny_chunk_size: 50_000,
            initial_size_limit: 500_000,
            imbalance_ratio: 10,
        }
    }
}

/// Complete analysis output for one invocation.
///
/// Created once, never mutated after construction; serializes directly to
/// JSON as the canonical output contract. Alternate renderers are
/// presentation-only projections of this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Canonical modules, chunks, and totals.
    pub stats: BundleStats,

    /// Heuristic recommendations, in rule order.
    pub recommendations: Vec<Recommendation>,

    /// Tree-shaking diagnostics (textual heuristic).
    pub tree_shaking: Vec<String>,

    /// Duplicate module groups, largest first.
    pub duplicates: Vec<DuplicateGroup>,

    /// Per-package statistics, largest first.
    pub packages: Vec<PackageStats>,

    /// Chunk statistics and advisories.
    pub chunk_analysis: ChunkAnalysis,

    /// Modules flagged as likely unused.
    pub unused_modules: Vec<UnusedModule>,

    /// Aggregate scalar metrics.
    pub metrics: BundleMetrics,

    /// When this analysis was produced.
    pub generated_at: DateTime<Utc>,
}

/// Drives the analysis pipeline over one stats document.
///
/// The optional progress sink is a best-effort diagnostic channel receiving
/// stage names; it never affects results.
pub struct Analyzer<'a> {
    options: AnalyzerOptions,
    progress: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer with the given resolved thresholds.
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            options,
            progress: None,
        }
    }

    /// Attach a progress sink receiving pipeline stage names.
    pub fn with_progress(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    fn notify(&mut self, stage: &str) {
        debug!(stage, "pipeline stage");
        if let Some(sink) = &mut self.progress {
            sink(stage);
        }
    }

    /// Read, validate, and analyze a stats file.
    pub fn analyze_file(&mut self, path: &Path) -> Result<AnalysisResult, ingest::AnalysisError> {
        self.notify("Reading stats file");
        let raw = ingest::read_stats(path)?;
        self.analyze(&raw)
    }

    /// Validate and analyze an already-parsed stats document.
    pub fn analyze(&mut self, raw: &RawStats) -> Result<AnalysisResult, ingest::AnalysisError> {
        self.notify("Validating stats");
        ingest::validate(raw)?;

        self.notify("Extracting modules and chunks");
        let Extraction { stats, sources } = extract(raw);
        debug!(
            modules = stats.modules.len(),
            chunks = stats.chunks.len(),
            total_size = stats.total_size,
            "extraction complete"
        );

        self.notify("Grouping packages");
        let packages = package_stats(&stats.modules, stats.total_size);

        self.notify("Detecting duplicates");
        let duplicates = find_duplicates(&stats.modules);

        self.notify("Scanning for tree-shaking issues");
        let tree_shaking = tree_shaking_issues(&stats.modules, &sources);

        self.notify("Detecting unused modules");
        let unused_modules = find_unused(&stats.modules, &stats.chunks);

        self.notify("Analyzing chunks");
        let chunk_analysis = analyze_chunks(&stats.chunks, &self.options);

        self.notify("Generating recommendations");
        let recommendations = recommendations(&stats, &self.options);

        self.notify("Computing metrics");
        let metrics = compute_metrics(&stats);

        Ok(AnalysisResult {
            stats,
            recommendations,
            tree_shaking,
            duplicates,
            packages,
            chunk_analysis,
            unused_modules,
            metrics,
            generated_at: Utc::now(),
        })
    }
}

/// Format a byte size as a human-readable string.
///
/// # Example
///
/// ```
/// use bundlescope::analyzer::format_size;
///
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
