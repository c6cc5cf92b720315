//! Export functionality for bundle analysis results.
//!
//! Renderers are presentation-only projections of [`AnalysisResult`]: they
//! consume the result read-only and carry no additional semantics. Formats:
//! JSON (machine-readable, full data), CSV (spreadsheet-friendly module
//! rows), and Markdown (documentation/reporting).

pub mod csv;
pub mod json;
pub mod markdown;
pub mod summary;

use std::io::{self, Write};

use crate::analyzer::AnalysisResult;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the analysis result to the given writer.
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()>;
}

/// Export an analysis result in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    result: &AnalysisResult,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(result, writer),
        ExportFormat::Csv => csv::CsvExporter.export(result, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(result, writer),
    }
}

/// Export an analysis result to a string.
pub fn export_to_string(format: ExportFormat, result: &AnalysisResult) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, result, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
