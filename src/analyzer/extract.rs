//! Module/chunk extraction and normalization.
//!
//! Normalizes the two possible stats schema shapes (flat top-level `modules`
//! array vs. per-chunk nested module lists) into one canonical module list
//! with computed percentages, plus canonical chunks and total-size scalars.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::stats::types::{ChunkId, RawModule, RawModuleRef, RawStats};

/// A canonical module derived from the stats document.
///
/// Created once during extraction by merging all occurrences of the same
/// name; immutable afterward except for the percentage backfill once the
/// bundle total is known.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Module path/name ("unknown" when the document omits it).
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Gzip-compressed size in bytes, when reported.
    pub gzip_size: Option<u64>,

    /// Share of the total bundle size, in [0, 100].
    pub percentage: f64,

    /// Names of modules that reference this one.
    pub reasons: Vec<String>,
}

/// A canonical chunk derived from the stats document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Chunk ID (number or string).
    pub id: ChunkId,

    /// Chunk name (falls back to the ID when unnamed).
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Gzip-compressed size in bytes, when reported.
    pub gzip_size: Option<u64>,

    /// Whether this chunk loads on application start.
    pub initial: bool,

    /// Names of modules contained in this chunk.
    pub modules: Vec<String>,
}

/// Canonical module/chunk lists plus total-size scalars.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    /// All modules, sorted descending by size.
    pub modules: Vec<Module>,

    /// All chunks, in document order.
    pub chunks: Vec<Chunk>,

    /// Total bundle size in bytes.
    pub total_size: u64,

    /// Total gzip-compressed size in bytes (0 when unreported).
    pub total_gzip_size: u64,

    /// Combined size of chunks flagged `initial` (the initial load size).
    pub initial_size: u64,
}

/// Extraction output: canonical stats plus the module-source map used by
/// the tree-shaking heuristic (only populated for the flat schema shape).
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Canonical bundle stats.
    pub stats: BundleStats,

    /// Original source text per module name.
    pub sources: HashMap<String, String>,
}

/// Accumulates module occurrences merged by name.
///
/// The same physical module recurring across chunks must not inflate the
/// reported total, so sizes merge as max, never sum. Reasons merge as a
/// union preserving first-seen order.
#[derive(Default)]
struct ModuleMerger {
    by_name: HashMap<String, Module>,
    order: Vec<String>,
}

impl ModuleMerger {
    fn add(&mut self, name: &str, size: u64, gzip_size: Option<u64>, reasons: &[String]) {
        match self.by_name.get_mut(name) {
            Some(existing) => {
                existing.size = existing.size.max(size);
                existing.gzip_size = match (existing.gzip_size, gzip_size) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                for reason in reasons {
                    if !existing.reasons.contains(reason) {
                        existing.reasons.push(reason.clone());
                    }
                }
            }
            None => {
                self.order.push(name.to_string());
                self.by_name.insert(
                    name.to_string(),
                    Module {
                        name: name.to_string(),
                        size,
                        gzip_size,
                        percentage: 0.0,
                        reasons: reasons.to_vec(),
                    },
                );
            }
        }
    }

    fn add_raw(&mut self, module: &RawModule) {
        let name = module.name.as_deref().unwrap_or("unknown");
        let reasons: Vec<String> = module
            .reasons
            .iter()
            .filter_map(|r| r.referencing_name().map(str::to_string))
            .collect();
        self.add(
            name,
            module.size.max(0) as u64,
            module.gzip_size.map(|g| g.max(0) as u64),
            &reasons,
        );
    }

    fn total_size(&self) -> u64 {
        self.by_name.values().map(|m| m.size).sum()
    }

    fn total_gzip_size(&self) -> u64 {
        self.by_name.values().filter_map(|m| m.gzip_size).sum()
    }

    /// Drain into a list preserving first-seen order.
    fn into_modules(mut self) -> Vec<Module> {
        let mut modules = Vec::with_capacity(self.order.len());
        for name in &self.order {
            if let Some(module) = self.by_name.remove(name) {
                modules.push(module);
            }
        }
        modules
    }
}

/// Merge every chunk's nested module list into one deduplicated merger.
fn merge_chunk_modules(raw: &RawStats) -> ModuleMerger {
    let mut merger = ModuleMerger::default();
    for chunk in &raw.chunks {
        for module_ref in &chunk.modules {
            match module_ref {
                RawModuleRef::Name(name) => merger.add(name, 0, None, &[]),
                RawModuleRef::Detailed(module) => merger.add_raw(module),
            }
        }
    }
    merger
}

/// First non-zero candidate wins; 0 when all candidates are 0.
fn first_nonzero(candidates: [u64; 4]) -> u64 {
    candidates.into_iter().find(|&c| c != 0).unwrap_or(0)
}

/// Extract canonical modules, chunks, and totals from a validated document.
///
/// The flat top-level `modules` array is the preferred shape; per-chunk
/// nested modules are the fallback when it is absent or empty.
pub fn extract(raw: &RawStats) -> Extraction {
    // Flat-shape merger (also feeds the totals fallback chain).
    let mut flat_merger = ModuleMerger::default();
    for module in &raw.modules {
        flat_merger.add_raw(module);
    }

    let chunk_merger = merge_chunk_modules(raw);

    let asset_total: u64 = raw.assets.iter().map(|a| a.size.max(0) as u64).sum();
    let asset_gzip: u64 = raw
        .assets
        .iter()
        .filter_map(|a| a.gzip_size)
        .map(|g| g.max(0) as u64)
        .sum();
    let chunk_total: u64 = raw.chunks.iter().map(|c| c.size.max(0) as u64).sum();
    let chunk_gzip: u64 = raw
        .chunks
        .iter()
        .filter_map(|c| c.gzip_size)
        .map(|g| g.max(0) as u64)
        .sum();

    let total_size = first_nonzero([
        asset_total,
        flat_merger.total_size(),
        chunk_merger.total_size(),
        chunk_total,
    ]);
    let total_gzip_size = first_nonzero([
        asset_gzip,
        flat_merger.total_gzip_size(),
        chunk_merger.total_gzip_size(),
        chunk_gzip,
    ]);

    let use_flat = !raw.modules.is_empty();

    // Source text is only available in the flat shape.
    let sources: HashMap<String, String> = if use_flat {
        raw.modules
            .iter()
            .filter_map(|m| {
                let source = m.source.clone()?;
                Some((m.name.clone().unwrap_or_else(|| "unknown".to_string()), source))
            })
            .collect()
    } else {
        HashMap::new()
    };

    let mut modules = if use_flat {
        flat_merger.into_modules()
    } else {
        chunk_merger.into_modules()
    };

    for module in &mut modules {
        module.percentage = if total_size > 0 {
            module.size as f64 / total_size as f64 * 100.0
        } else {
            0.0
        };
    }

    // Stable: ties keep first-seen order.
    modules.sort_by(|a, b| b.size.cmp(&a.size));

    let chunks: Vec<Chunk> = raw
        .chunks
        .iter()
        .map(|chunk| {
            let id = chunk.id.clone().unwrap_or_default();
            let name = chunk.name.clone().unwrap_or_else(|| id.to_string());
            Chunk {
                id,
                name,
                size: chunk.size.max(0) as u64,
                gzip_size: chunk.gzip_size.map(|g| g.max(0) as u64),
                initial: chunk.initial,
                modules: chunk
                    .modules
                    .iter()
                    .filter_map(|m| m.name().map(str::to_string))
                    .collect(),
            }
        })
        .collect();

    let initial_size = chunks.iter().filter(|c| c.initial).map(|c| c.size).sum();

    Extraction {
        stats: BundleStats {
            modules,
            chunks,
            total_size,
            total_gzip_size,
            initial_size,
        },
        sources,
    }
}
