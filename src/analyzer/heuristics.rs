//! Tree-shaking and unused-module heuristics.
//!
//! Both passes are textual heuristics, not guarantees: tree-shaking issues
//! come from substring matching against embedded module source, and unused
//! modules are inferred from free-text `reasons` strings rather than real
//! reachability analysis. Ambiguous input produces no finding, never an
//! error. The reason-matching is tuned to webpack-style stats dumps; other
//! bundlers' reason formats may misclassify.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::extract::{Chunk, Module};

/// Maximum number of tree-shaking diagnostics reported.
const MAX_TREE_SHAKING_ISSUES: usize = 10;

/// Maximum number of unused-module findings reported.
const MAX_UNUSED_MODULES: usize = 20;

/// Reason values that carry no referencing file.
const NON_FILE_REASONS: [&str; 2] = ["entry", "cjs require"];

/// File extensions recognized as module references inside reason strings.
const FILE_EXTENSIONS: [&str; 4] = [".js", ".ts", ".jsx", ".tsx"];

/// A module flagged as likely unused.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UnusedModule {
    /// Module name.
    pub name: String,

    /// Module size in bytes.
    pub size: u64,
}

/// Flag modules whose embedded source contains CommonJS patterns that
/// defeat tree-shaking.
///
/// Source text is only available when the flat `modules` schema shape was
/// used; modules without source are silently skipped. One diagnostic per
/// flagged module, capped to the first 10 in module order.
pub fn tree_shaking_issues(
    modules: &[Module],
    sources: &HashMap<String, String>,
) -> Vec<String> {
    let mut issues = Vec::new();
    for module in modules {
        if issues.len() >= MAX_TREE_SHAKING_ISSUES {
            break;
        }
        let Some(source) = sources.get(&module.name) else {
            continue;
        };
        if source.contains("module.exports") || source.contains("require(") {
            issues.push(format!(
                "{} uses CommonJS patterns (module.exports/require) that prevent tree-shaking",
                module.name
            ));
        }
    }
    issues
}

fn looks_like_module_file(token: &str) -> bool {
    FILE_EXTENSIONS.iter().any(|ext| token.ends_with(ext))
}

/// Collect file-like tokens embedded in every module's reason strings.
fn referenced_names(modules: &[Module]) -> HashSet<String> {
    let mut referenced = HashSet::new();
    for module in modules {
        for reason in &module.reasons {
            if NON_FILE_REASONS.contains(&reason.as_str()) {
                continue;
            }
            for token in reason.split_whitespace() {
                if looks_like_module_file(token) {
                    referenced.insert(token.to_string());
                }
            }
        }
    }
    referenced
}

/// Flag modules that appear bundled but unreferenced.
///
/// A module is flagged when it is not an entry point, its name never appears
/// as a file token in any reason string, it has non-zero size, and it is a
/// member of at least one chunk (modules with zero chunk membership are
/// assumed unreachable rather than wasted). Capped to the top 20 by size.
pub fn find_unused(modules: &[Module], chunks: &[Chunk]) -> Vec<UnusedModule> {
    let referenced = referenced_names(modules);
    let in_chunk: HashSet<&str> = chunks
        .iter()
        .flat_map(|c| c.modules.iter().map(String::as_str))
        .collect();

    let mut unused: Vec<UnusedModule> = modules
        .iter()
        .filter(|m| {
            let is_entry = m.reasons.iter().any(|r| r.contains("entry"));
            !is_entry
                && !referenced.contains(&m.name)
                && m.size > 0
                && in_chunk.contains(m.name.as_str())
        })
        .map(|m| UnusedModule {
            name: m.name.clone(),
            size: m.size,
        })
        .collect();

    unused.sort_by(|a, b| b.size.cmp(&a.size));
    unused.truncate(MAX_UNUSED_MODULES);
    unused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ChunkId;

    fn module(name: &str, size: u64, reasons: &[&str]) -> Module {
        Module {
            name: name.to_string(),
            size,
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    fn chunk(members: &[&str]) -> Chunk {
        Chunk {
            id: ChunkId::Number(0),
            name: "main".to_string(),
            modules: members.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tree_shaking_flags_commonjs() {
        let modules = vec![
            module("./src/cjs.js", 100, &[]),
            module("./src/esm.js", 100, &[]),
        ];
        let mut sources = HashMap::new();
        sources.insert(
            "./src/cjs.js".to_string(),
            "module.exports = {};".to_string(),
        );
        sources.insert("./src/esm.js".to_string(), "export default 1;".to_string());

        let issues = tree_shaking_issues(&modules, &sources);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("./src/cjs.js"));
    }

    #[test]
    fn test_tree_shaking_flags_require_call() {
        let modules = vec![module("./src/a.js", 100, &[])];
        let mut sources = HashMap::new();
        sources.insert(
            "./src/a.js".to_string(),
            "const x = require('lodash');".to_string(),
        );

        assert_eq!(tree_shaking_issues(&modules, &sources).len(), 1);
    }

    #[test]
    fn test_tree_shaking_missing_source_skipped() {
        let modules = vec![module("./src/a.js", 100, &[])];
        assert!(tree_shaking_issues(&modules, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_tree_shaking_capped_at_ten() {
        let mut modules = Vec::new();
        let mut sources = HashMap::new();
        for i in 0..15 {
            let name = format!("./src/m{i}.js");
            modules.push(module(&name, 10, &[]));
            sources.insert(name, "module.exports = 1;".to_string());
        }

        assert_eq!(tree_shaking_issues(&modules, &sources).len(), 10);
    }

    #[test]
    fn test_unused_module_detected() {
        // index.js is an entry; used.js appears as a file token in
        // helper.js's reasons; helper.js appears in nobody's.
        let modules = vec![
            module("./src/index.js", 500, &["entry"]),
            module("./src/used.js", 300, &["./src/index.js"]),
            module("./src/helper.js", 200, &["./src/used.js"]),
        ];
        let chunks = vec![chunk(&["./src/index.js", "./src/used.js", "./src/helper.js"])];

        let unused = find_unused(&modules, &chunks);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].name, "./src/helper.js");
    }

    #[test]
    fn test_referenced_module_not_flagged() {
        // util.js's reason embeds lib.js's name inside free text, which
        // counts as usage evidence for lib.js.
        let modules = vec![
            module("./src/lib.js", 200, &[]),
            module("./src/util.js", 50, &["./src/lib.js + 1 modules"]),
        ];
        let chunks = vec![chunk(&["./src/lib.js", "./src/util.js"])];

        let unused = find_unused(&modules, &chunks);
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].name, "./src/util.js");
    }

    #[test]
    fn test_entry_modules_never_flagged() {
        let modules = vec![module("./src/main.js", 100, &["entry"])];
        let chunks = vec![chunk(&["./src/main.js"])];
        assert!(find_unused(&modules, &chunks).is_empty());
    }

    #[test]
    fn test_zero_size_never_flagged() {
        let modules = vec![module("./src/empty.js", 0, &[])];
        let chunks = vec![chunk(&["./src/empty.js"])];
        assert!(find_unused(&modules, &chunks).is_empty());
    }

    #[test]
    fn test_module_outside_chunks_never_flagged() {
        let modules = vec![module("./src/orphan.js", 100, &[])];
        assert!(find_unused(&modules, &[]).is_empty());
    }

    #[test]
    fn test_cjs_require_reason_ignored_for_references() {
        // "cjs require" is a reason kind, not a file reference.
        let modules = vec![
            module("./src/a.js", 100, &["cjs require"]),
            module("./src/b.js", 50, &[]),
        ];
        let chunks = vec![chunk(&["./src/a.js", "./src/b.js"])];

        let unused = find_unused(&modules, &chunks);
        let names: Vec<&str> = unused.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["./src/a.js", "./src/b.js"]);
    }

    #[test]
    fn test_unused_sorted_and_capped() {
        let mut modules = Vec::new();
        let mut members = Vec::new();
        for i in 0..25 {
            let name = format!("./src/m{i}.js");
            modules.push(module(&name, (i + 1) as u64, &[]));
            members.push(name);
        }
        let member_refs: Vec<&str> = members.iter().map(String::as_str).collect();
        let chunks = vec![chunk(&member_refs)];

        let unused = find_unused(&modules, &chunks);
        assert_eq!(unused.len(), 20);
        assert_eq!(unused[0].size, 25);
        assert!(unused.windows(2).all(|w| w[0].size >= w[1].size));
    }
}
