//! BundleScope - bundle stats analyzer with size summaries and recommendations
//!
//! This crate ingests a bundler-produced size report (webpack-style
//! `stats.json`), derives summary statistics, duplicate/package groupings,
//! and heuristic recommendations, and renders the result as console output,
//! JSON, CSV, or Markdown.

pub mod analyzer;
pub mod export;
pub mod history;
pub mod stats;
