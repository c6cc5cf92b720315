//! Markdown export implementation.
//!
//! Exports bundle analysis results in Markdown format for documentation and reporting.

use super::Exporter;
use crate::analyzer::{format_size, AnalysisResult};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
        let metrics = &result.metrics;

        // Title
        writeln!(writer, "# Bundle Analysis Report")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "**Generated:** {}",
            result.generated_at.to_rfc3339()
        )?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Value |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Size | {} |", format_size(metrics.total_size))?;
        if metrics.total_gzip_size > 0 {
            writeln!(
                writer,
                "| Gzip Size | {} |",
                format_size(metrics.total_gzip_size)
            )?;
        }
        if let Some(brotli) = metrics.estimated_brotli_size {
            writeln!(writer, "| Est. Brotli Size | {} |", format_size(brotli))?;
        }
        writeln!(writer, "| Modules | {} |", metrics.module_count)?;
        writeln!(writer, "| Chunks | {} |", metrics.chunk_count)?;
        writeln!(
            writer,
            "| Largest Module | {} ({}) |",
            metrics.largest_module.name,
            format_size(metrics.largest_module.size)
        )?;
        writeln!(
            writer,
            "| Average Module Size | {} |",
            format_size(metrics.average_module_size as u64)
        )?;
        if result.stats.initial_size > 0 {
            writeln!(
                writer,
                "| Initial Load Size | {} |",
                format_size(result.stats.initial_size)
            )?;
        }
        writeln!(writer)?;

        // Recommendations
        if !result.recommendations.is_empty() {
            writeln!(writer, "## Recommendations")?;
            writeln!(writer)?;
            for rec in &result.recommendations {
                writeln!(
                    writer,
                    "- **{}**: {} — {}",
                    rec.severity.label(),
                    rec.message,
                    rec.action
                )?;
            }
            writeln!(writer)?;
        }

        // Top packages
        if !result.packages.is_empty() {
            writeln!(writer, "## Top Packages ({})", result.packages.len())?;
            writeln!(writer)?;
            writeln!(writer, "| Package | Size | Modules | % of Bundle |")?;
            writeln!(writer, "|---------|------|---------|-------------|")?;
            for package in &result.packages {
                writeln!(
                    writer,
                    "| {} | {} | {} | {:.1}% |",
                    package.name,
                    format_size(package.total_size),
                    package.module_count,
                    package.percentage
                )?;
            }
            writeln!(writer)?;
        }

        // Duplicates
        if !result.duplicates.is_empty() {
            writeln!(writer, "## Duplicate Modules ({})", result.duplicates.len())?;
            writeln!(writer)?;
            writeln!(writer, "| Files | Total Size | Potential Savings |")?;
            writeln!(writer, "|-------|------------|-------------------|")?;
            for group in &result.duplicates {
                writeln!(
                    writer,
                    "| {} | {} | {} |",
                    group.names.join("<br>"),
                    format_size(group.total_size),
                    format_size(group.savings)
                )?;
            }
            writeln!(writer)?;
        }

        // Chunk advisories
        if !result.chunk_analysis.advisories.is_empty() {
            writeln!(writer, "## Chunk Advisories")?;
            writeln!(writer)?;
            for advisory in &result.chunk_analysis.advisories {
                writeln!(writer, "- {}", advisory)?;
            }
            writeln!(writer)?;
        }

        // Tree-shaking issues
        if !result.tree_shaking.is_empty() {
            writeln!(writer, "## Tree-Shaking Issues")?;
            writeln!(writer)?;
            for issue in &result.tree_shaking {
                writeln!(writer, "- {}", issue)?;
            }
            writeln!(writer)?;
        }

        // Unused modules
        if !result.unused_modules.is_empty() {
            writeln!(
                writer,
                "## Possibly Unused Modules ({})",
                result.unused_modules.len()
            )?;
            writeln!(writer)?;
            writeln!(writer, "| Module | Size |")?;
            writeln!(writer, "|--------|------|")?;
            for unused in &result.unused_modules {
                writeln!(
                    writer,
                    "| {} | {} |",
                    unused.name,
                    format_size(unused.size)
                )?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
