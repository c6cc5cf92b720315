//! Console summary renderer.
//!
//! A compact, human-readable projection of the analysis result for
//! terminal output. Same data as the other renderers, no extra semantics.

use crate::analyzer::{format_size, AnalysisResult};
use std::io::{self, Write};

/// How many modules/packages to show in the console summary.
const TOP_COUNT: usize = 10;

/// Write the console summary to the given writer.
pub fn write_summary<W: Write>(result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
    let metrics = &result.metrics;

    writeln!(writer, "📊 Bundle Analysis")?;
    writeln!(writer)?;
    writeln!(writer, "  Total size:      {}", format_size(metrics.total_size))?;
    if metrics.total_gzip_size > 0 {
        writeln!(
            writer,
            "  Gzip size:       {}",
            format_size(metrics.total_gzip_size)
        )?;
    }
    if let Some(brotli) = metrics.estimated_brotli_size {
        writeln!(writer, "  Est. Brotli:     {}", format_size(brotli))?;
    }
    writeln!(writer, "  Modules:         {}", metrics.module_count)?;
    writeln!(writer, "  Chunks:          {}", metrics.chunk_count)?;
    if result.stats.initial_size > 0 {
        writeln!(
            writer,
            "  Initial load:    {}",
            format_size(result.stats.initial_size)
        )?;
    }

    if !result.stats.modules.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "  Largest modules:")?;
        for module in result.stats.modules.iter().take(TOP_COUNT) {
            writeln!(
                writer,
                "    {:>9}  {:5.1}%  {}",
                format_size(module.size),
                module.percentage,
                module.name
            )?;
        }
    }

    if !result.packages.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "  Top packages:")?;
        for package in result.packages.iter().take(TOP_COUNT) {
            writeln!(
                writer,
                "    {:>9}  {:5.1}%  {} ({} modules)",
                format_size(package.total_size),
                package.percentage,
                package.name,
                package.module_count
            )?;
        }
    }

    if !result.duplicates.is_empty() {
        writeln!(writer)?;
        writeln!(
            writer,
            "  ⚠️  {} duplicate group(s):",
            result.duplicates.len()
        )?;
        for group in &result.duplicates {
            writeln!(
                writer,
                "    {} copies, save up to {}: {}",
                group.names.len(),
                format_size(group.savings),
                group.names.join(", ")
            )?;
        }
    }

    if !result.chunk_analysis.advisories.is_empty() {
        writeln!(writer)?;
        for advisory in &result.chunk_analysis.advisories {
            writeln!(writer, "  ⚠️  {}", advisory)?;
        }
    }

    if !result.recommendations.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "  Recommendations:")?;
        for rec in &result.recommendations {
            writeln!(
                writer,
                "    [{}] {}",
                rec.severity.label(),
                rec.message
            )?;
            writeln!(writer, "      → {}", rec.action)?;
        }
    }

    Ok(())
}
