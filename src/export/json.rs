//! JSON export implementation.
//!
//! Serializes the full [`AnalysisResult`] as pretty-printed JSON. This is
//! the canonical output contract; the other renderers are projections.

use super::Exporter;
use crate::analyzer::AnalysisResult;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, result: &AnalysisResult, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, result)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer)?;
        Ok(())
    }
}
