//! CSV export implementation.
//!
//! Exports the canonical module list in CSV format for spreadsheet use.

use super::Exporter;
use crate::analyzer::{extract_package_name, AnalysisResult};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "name,size,gzip_size,percentage,package")?;

        for module in &result.stats.modules {
            let gzip = module
                .gzip_size
                .map(|g| g.to_string())
                .unwrap_or_default();
            let package = extract_package_name(&module.name).unwrap_or_default();

            writeln!(
                writer,
                "{},{},{},{:.2},{}",
                Self::escape_field(&module.name),
                module.size,
                gzip,
                module.percentage,
                Self::escape_field(&package)
            )?;
        }

        Ok(())
    }
}
