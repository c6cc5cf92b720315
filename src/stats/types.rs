//! Raw bundler stats document model.
//!
//! This module defines serde types mirroring the loosely-structured JSON
//! emitted by bundlers (e.g. webpack's `stats.json`). Every field is optional
//! or defaulted: the document is untrusted and never assumed to conform.
//! Loose shapes (bare-string vs. object module references, string vs. object
//! reasons, numeric vs. string chunk ids) are modeled as untagged enums at
//! this boundary and normalized into canonical types by the analyzer.

use serde::{Deserialize, Serialize};

/// Top-level bundler stats document.
///
/// Sizes are deserialized as `i64` rather than `u64` so that documents
/// declaring negative sizes parse successfully and are rejected by
/// validation with a schema error instead of a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawStats {
    /// Bundle/build name, if the bundler reports one.
    pub name: Option<String>,

    /// Overall parsed size reported by the bundler, if any.
    pub parsed_size: Option<i64>,

    /// Build errors reported by the bundler.
    #[serde(default)]
    pub errors: Vec<RawError>,

    /// Emitted output files.
    #[serde(default)]
    pub assets: Vec<RawAsset>,

    /// Flat module list (preferred schema shape).
    #[serde(default)]
    pub modules: Vec<RawModule>,

    /// Chunk list, possibly carrying nested module lists (fallback shape).
    #[serde(default)]
    pub chunks: Vec<RawChunk>,
}

/// A build-error descriptor from the upstream bundler.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawError {
    /// Error message text.
    pub message: Option<String>,

    /// Additional error details.
    pub details: Option<String>,
}

impl RawError {
    /// Best-available human-readable text for this error.
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.details.as_deref())
            .unwrap_or("unknown build error")
    }
}

/// An emitted asset (output file).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawAsset {
    /// Asset size in bytes.
    #[serde(default)]
    pub size: i64,

    /// Gzip-compressed size in bytes, when the bundler reports it.
    pub gzip_size: Option<i64>,
}

/// A module entry from either the flat `modules` array or a chunk's
/// nested module list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    /// Module path/name.
    pub name: Option<String>,

    /// Module size in bytes.
    #[serde(default)]
    pub size: i64,

    /// Gzip-compressed size in bytes.
    pub gzip_size: Option<i64>,

    /// Why this module was included: free-text strings or reason objects.
    #[serde(default)]
    pub reasons: Vec<RawReason>,

    /// Original source text, when the bundler embeds it.
    pub source: Option<String>,
}

/// A reason entry explaining why a module was bundled.
///
/// Webpack-style dumps mix bare strings with `{moduleName}` objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReason {
    /// Bare referencing-module string.
    Text(String),
    /// Structured reason object.
    Ref {
        /// Name of the referencing module.
        #[serde(rename = "moduleName")]
        module_name: Option<String>,
    },
}

impl RawReason {
    /// The referencing-module string carried by this reason, if any.
    pub fn referencing_name(&self) -> Option<&str> {
        match self {
            RawReason::Text(s) => Some(s),
            RawReason::Ref { module_name } => module_name.as_deref(),
        }
    }
}

/// A chunk (code-split output group).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawChunk {
    /// Chunk ID (number or string).
    pub id: Option<ChunkId>,

    /// Chunk name.
    pub name: Option<String>,

    /// Chunk size in bytes.
    #[serde(default)]
    pub size: i64,

    /// Gzip-compressed size in bytes.
    pub gzip_size: Option<i64>,

    /// Whether this chunk loads on application start.
    #[serde(default)]
    pub initial: bool,

    /// Modules contained in this chunk, as bare names or full objects.
    #[serde(default)]
    pub modules: Vec<RawModuleRef>,
}

/// A module reference inside a chunk: bare name or detailed object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawModuleRef {
    /// Bare module name; size unknown (treated as 0).
    Name(String),
    /// Full module object.
    Detailed(RawModule),
}

impl RawModuleRef {
    /// The module name carried by this reference, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            RawModuleRef::Name(s) => Some(s),
            RawModuleRef::Detailed(m) => m.name.as_deref(),
        }
    }

    /// The declared size, or 0 for bare-name references.
    pub fn size(&self) -> i64 {
        match self {
            RawModuleRef::Name(_) => 0,
            RawModuleRef::Detailed(m) => m.size,
        }
    }
}

/// Chunk ID can be either a number or a string in bundler stats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ChunkId {
    /// Numeric chunk ID.
    Number(i64),
    /// String chunk ID.
    String(String),
}

impl Default for ChunkId {
    fn default() -> Self {
        ChunkId::Number(0)
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkId::Number(n) => write!(f, "{}", n),
            ChunkId::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_shapes() {
        let reasons: Vec<RawReason> = serde_json::from_str(
            r#"["./src/index.js", {"moduleName": "./src/app.js"}, {}]"#,
        )
        .unwrap();

        assert_eq!(reasons[0].referencing_name(), Some("./src/index.js"));
        assert_eq!(reasons[1].referencing_name(), Some("./src/app.js"));
        assert_eq!(reasons[2].referencing_name(), None);
    }

    #[test]
    fn test_module_ref_shapes() {
        let refs: Vec<RawModuleRef> = serde_json::from_str(
            r#"["./src/a.js", {"name": "./src/b.js", "size": 42}]"#,
        )
        .unwrap();

        assert_eq!(refs[0].name(), Some("./src/a.js"));
        assert_eq!(refs[0].size(), 0);
        assert_eq!(refs[1].name(), Some("./src/b.js"));
        assert_eq!(refs[1].size(), 42);
    }

    #[test]
    fn test_chunk_id_display() {
        assert_eq!(format!("{}", ChunkId::Number(42)), "42");
        assert_eq!(format!("{}", ChunkId::String("main".to_string())), "main");
    }

    #[test]
    fn test_negative_size_parses() {
        // Negative sizes must survive parsing so validation can reject
        // them with a schema error rather than a parse error.
        let module: RawModule =
            serde_json::from_str(r#"{"name": "a.js", "size": -100}"#).unwrap();
        assert_eq!(module.size, -100);
    }

    #[test]
    fn test_empty_document() {
        let stats: RawStats = serde_json::from_str("{}").unwrap();
        assert!(stats.modules.is_empty());
        assert!(stats.assets.is_empty());
        assert!(stats.chunks.is_empty());
        assert!(stats.errors.is_empty());
    }
}
