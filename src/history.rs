//! Append-only analysis history log.
//!
//! Persists a small metrics subset per invocation so size changes can be
//! tracked over time. The log is a single JSON file rewritten whole on each
//! append and capped at 100 entries; concurrent invocations against the
//! same file are not protected against interleaving, which is an accepted
//! limitation for a single-user CLI tool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::AnalysisResult;

/// Maximum number of entries retained; oldest are dropped first.
pub const MAX_ENTRIES: usize = 100;

/// One recorded analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,

    /// Total bundle size in bytes.
    pub total_size: u64,

    /// Total gzip size in bytes.
    pub gzip_size: u64,

    /// Number of modules.
    pub module_count: usize,

    /// Number of chunks.
    pub chunk_count: usize,

    /// Git commit hash, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    /// Git branch name, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl HistoryEntry {
    /// Build an entry from an analysis result, attaching best-effort git
    /// metadata from the current directory.
    pub fn from_result(result: &AnalysisResult) -> Self {
        let (commit, branch) = git_metadata(Path::new("."));
        Self {
            timestamp: result.generated_at,
            total_size: result.metrics.total_size,
            gzip_size: result.metrics.total_gzip_size,
            module_count: result.metrics.module_count,
            chunk_count: result.metrics.chunk_count,
            commit,
            branch,
        }
    }
}

/// Load all history entries; a missing file is an empty history.
pub fn load(path: &Path) -> Result<Vec<HistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    let entries: Vec<HistoryEntry> =
        serde_json::from_str(&content).context("Failed to parse history JSON")?;
    Ok(entries)
}

/// Append an entry, dropping the oldest entries beyond the cap.
pub fn record(path: &Path, entry: HistoryEntry) -> Result<()> {
    let mut entries = load(path)?;
    entries.push(entry);
    if entries.len() > MAX_ENTRIES {
        let excess = entries.len() - MAX_ENTRIES;
        entries.drain(..excess);
    }

    let content =
        serde_json::to_string_pretty(&entries).context("Failed to serialize history")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write history file {}", path.display()))?;
    debug!(entries = entries.len(), path = %path.display(), "history updated");
    Ok(())
}

/// Best-effort git commit/branch discovery via `.git/HEAD`.
///
/// Returns `(None, None)` on any failure; history entries simply omit the
/// metadata.
fn git_metadata(repo_root: &Path) -> (Option<String>, Option<String>) {
    let head_path = repo_root.join(".git").join("HEAD");
    let Ok(head) = fs::read_to_string(&head_path) else {
        return (None, None);
    };
    let head = head.trim();

    if let Some(reference) = head.strip_prefix("ref: ") {
        let branch = reference.rsplit('/').next().map(str::to_string);
        let commit = fs::read_to_string(repo_root.join(".git").join(reference))
            .ok()
            .map(|c| c.trim().to_string());
        (commit, branch)
    } else {
        // Detached HEAD: the file holds the commit hash directly.
        (Some(head.to_string()), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(size: u64) -> HistoryEntry {
        HistoryEntry {
            timestamp: Utc::now(),
            total_size: size,
            gzip_size: size / 3,
            module_count: 10,
            chunk_count: 2,
            commit: None,
            branch: None,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_record_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        record(&path, entry(1000)).unwrap();
        record(&path, entry(2000)).unwrap();

        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].total_size, 1000);
        assert_eq!(entries[1].total_size, 2000);
    }

    #[test]
    fn test_record_caps_at_max_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        for i in 0..(MAX_ENTRIES as u64 + 5) {
            record(&path, entry(i)).unwrap();
        }

        let entries = load(&path).unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // The oldest entries were dropped.
        assert_eq!(entries[0].total_size, 5);
    }

    #[test]
    fn test_record_rejects_corrupt_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        assert!(record(&path, entry(1)).is_err());
    }

    #[test]
    fn test_git_metadata_missing_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(git_metadata(dir.path()), (None, None));
    }

    #[test]
    fn test_git_metadata_detached_head() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/HEAD"), "abc123def\n").unwrap();

        let (commit, branch) = git_metadata(dir.path());
        assert_eq!(commit.as_deref(), Some("abc123def"));
        assert_eq!(branch, None);
    }

    #[test]
    fn test_git_metadata_branch() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path().join(".git");
        fs::create_dir_all(git.join("refs/heads")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git.join("refs/heads/main"), "abc123\n").unwrap();

        let (commit, branch) = git_metadata(dir.path());
        assert_eq!(commit.as_deref(), Some("abc123"));
        assert_eq!(branch.as_deref(), Some("main"));
    }
}
