//! Chunk statistics and splitting advisories.

use serde::{Deserialize, Serialize};

use super::extract::Chunk;
use super::{format_size, AnalyzerOptions};

/// Name and size of a single notable chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkSummary {
    /// Chunk name.
    pub name: String,

    /// Chunk size in bytes.
    pub size: u64,
}

impl Default for ChunkSummary {
    fn default() -> Self {
        Self {
            name: "N/A".to_string(),
            size: 0,
        }
    }
}

/// Aggregate chunk statistics plus splitting advisories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChunkAnalysis {
    /// Number of chunks.
    pub chunk_count: usize,

    /// Mean chunk size in bytes.
    pub average_size: f64,

    /// Mean number of modules per chunk.
    pub average_modules: f64,

    /// Largest chunk by size.
    pub largest: ChunkSummary,

    /// Smallest chunk by size.
    pub smallest: ChunkSummary,

    /// Combined size of chunks flagged `initial`.
    pub initial_size: u64,

    /// Advisory strings describing chunking problems.
    pub advisories: Vec<String>,
}

/// Compute chunk statistics and up to four advisories.
///
/// Zero chunks short-circuits to a zero-valued result with no advisories.
/// The imbalance check is skipped entirely when the smallest chunk has
/// size 0, since the ratio would be meaningless.
pub fn analyze_chunks(chunks: &[Chunk], options: &AnalyzerOptions) -> ChunkAnalysis {
    if chunks.is_empty() {
        return ChunkAnalysis::default();
    }

    let count = chunks.len();
    let total: u64 = chunks.iter().map(|c| c.size).sum();
    let total_modules: usize = chunks.iter().map(|c| c.modules.len()).sum();
    let average_size = total as f64 / count as f64;
    let average_modules = total_modules as f64 / count as f64;

    let largest_chunk = chunks.iter().max_by_key(|c| c.size).map(|c| ChunkSummary {
        name: c.name.clone(),
        size: c.size,
    });
    let smallest_chunk = chunks.iter().min_by_key(|c| c.size).map(|c| ChunkSummary {
        name: c.name.clone(),
        size: c.size,
    });

    let largest = largest_chunk.unwrap_or_default();
    let smallest = smallest_chunk.unwrap_or_default();

    let initial_size: u64 = chunks.iter().filter(|c| c.initial).map(|c| c.size).sum();

    let mut advisories = Vec::new();

    if average_size > options.avg_chunk_size_limit as f64 {
        advisories.push(format!(
            "Average chunk size is {} - consider more aggressive code splitting",
            format_size(average_size as u64)
        ));
    }

    if count > options.max_chunks && average_size < options.tiny_chunk_size as f64 {
        advisories.push(format!(
            "{} chunks averaging {} each - too many tiny chunks add request overhead",
            count,
            format_size(average_size as u64)
        ));
    }

    if initial_size > options.initial_size_limit {
        advisories.push(format!(
            "Initial load is {} - defer non-critical chunks to speed up startup",
            format_size(initial_size)
        ));
    }

    if smallest.size > 0 && largest.size > options.imbalance_ratio * smallest.size {
        advisories.push(format!(
            "Chunk sizes are imbalanced: {} ({}) vs {} ({})",
            largest.name,
            format_size(largest.size),
            smallest.name,
            format_size(smallest.size)
        ));
    }

    ChunkAnalysis {
        chunk_count: count,
        average_size,
        average_modules,
        largest,
        smallest,
        initial_size,
        advisories,
    }
}
