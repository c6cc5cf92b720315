//! Heuristic recommendation engine.
//!
//! A pure function from bundle stats to an ordered recommendation list.
//! Rules are evaluated independently: every applicable rule fires, nothing
//! is deduplicated across invocations.

use serde::{Deserialize, Serialize};

use super::extract::BundleStats;
use super::packages::find_duplicates;
use super::{format_size, AnalyzerOptions};

/// How strongly a recommendation should be acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must fix: actively hurting users.
    Critical,
    /// Should fix: meaningful savings available.
    Warning,
    /// Worth knowing.
    Info,
}

impl Severity {
    /// Display label for console/markdown output.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

/// A single actionable recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Severity of the finding.
    pub severity: Severity,

    /// What was found.
    pub message: String,

    /// What to do about it.
    pub action: String,
}

/// Derive recommendations from bundle stats.
pub fn recommendations(stats: &BundleStats, options: &AnalyzerOptions) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    let gzip = stats.total_gzip_size;
    if gzip > options.gzip_critical {
        recommendations.push(Recommendation {
            severity: Severity::Critical,
            message: format!("Bundle gzip size is {}", format_size(gzip)),
            action: "Split the bundle with dynamic imports and audit the largest dependencies"
                .to_string(),
        });
    } else if gzip > options.gzip_warning {
        recommendations.push(Recommendation {
            severity: Severity::Warning,
            message: format!("Bundle gzip size is {}", format_size(gzip)),
            action: "Consider code splitting before the bundle grows further".to_string(),
        });
    }

    let large_count = stats
        .modules
        .iter()
        .filter(|m| m.percentage > options.large_module_percent)
        .count();
    if large_count > 0 {
        recommendations.push(Recommendation {
            severity: Severity::Warning,
            message: format!(
                "{} module(s) each exceed {:.0}% of the bundle",
                large_count, options.large_module_percent
            ),
            action: "Check whether these modules can be lazy-loaded or replaced with lighter alternatives"
                .to_string(),
        });
    }

    let duplicates = find_duplicates(&stats.modules);
    if !duplicates.is_empty() {
        let duplicate_total: u64 = duplicates.iter().map(|d| d.total_size).sum();
        recommendations.push(Recommendation {
            severity: Severity::Warning,
            message: format!(
                "{} duplicate module group(s) totaling {:.1} KB",
                duplicates.len(),
                duplicate_total as f64 / 1024.0
            ),
            action: "Deduplicate shared files or align dependency versions".to_string(),
        });
    }

    if stats.modules.len() > options.max_modules {
        recommendations.push(Recommendation {
            severity: Severity::Info,
            message: format!("Bundle contains {} modules", stats.modules.len()),
            action: "A module count this high often indicates missing tree-shaking or over-bundling"
                .to_string(),
        });
    }

    recommendations
}
