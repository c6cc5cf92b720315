//! Raw stats document model and ingestion.
//!
//! This module owns the untrusted side of the pipeline: serde types for the
//! bundler's JSON output and the read/parse/validate entry points. Everything
//! downstream of [`ingest::validate`] operates on canonical analyzer types
//! instead of these raw shapes.

pub mod ingest;
pub mod types;

// Re-export main types for convenience
pub use ingest::{parse_stats, read_stats, validate, AnalysisError, IngestResult};
pub use types::{ChunkId, RawAsset, RawChunk, RawModule, RawModuleRef, RawReason, RawStats};
