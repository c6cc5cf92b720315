//! Package grouping and duplicate detection.
//!
//! Groups canonical modules under an inferred package key: the npm package
//! name for `node_modules` paths (scope preserved), or the file basename as a
//! same-named-file heuristic for everything else.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::extract::Module;

/// Maximum number of package entries reported.
const TOP_PACKAGES: usize = 20;

/// Maximum number of duplicate groups reported.
const TOP_DUPLICATES: usize = 10;

/// Aggregated size statistics for one inferred package.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    /// Package identifier (e.g. "lodash", "@babel/core") or file basename.
    pub name: String,

    /// Combined size of all member modules in bytes.
    pub total_size: u64,

    /// Combined gzip size of members that report one.
    pub gzip_size: u64,

    /// Number of member modules.
    pub module_count: usize,

    /// Member module names.
    pub modules: Vec<String>,

    /// Share of the total bundle size, in [0, 100].
    pub percentage: f64,
}

/// A group of modules sharing an inferred package/basename key.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    /// Distinct full paths mapping to the same key.
    pub names: Vec<String>,

    /// Combined size of all members in bytes.
    pub total_size: u64,

    /// Bytes recoverable by collapsing to the cheapest member.
    pub savings: u64,
}

/// Infer the package key for a module path.
///
/// Paths under `node_modules/` map to the npm package identifier (scope
/// preserved, `\` normalized to `/`); anything else maps to the final path
/// segment. Returns `None` only for empty input.
///
/// # Example
///
/// ```
/// use bundlescope::analyzer::packages::extract_package_name;
///
/// assert_eq!(
///     extract_package_name("./node_modules/lodash/lodash.js"),
///     Some("lodash".to_string())
/// );
/// assert_eq!(
///     extract_package_name("./node_modules/@babel/core/lib/index.js"),
///     Some("@babel/core".to_string())
/// );
/// assert_eq!(
///     extract_package_name("./src/utils/helpers.js"),
///     Some("helpers.js".to_string())
/// );
/// ```
pub fn extract_package_name(module_path: &str) -> Option<String> {
    if module_path.is_empty() {
        return None;
    }

    let normalized = module_path.replace('\\', "/");

    // Use the last occurrence to handle nested node_modules.
    if let Some(pos) = normalized.rfind("node_modules/") {
        let after = &normalized[pos + "node_modules/".len()..];
        let segments: Vec<&str> = after.split('/').filter(|s| !s.is_empty()).collect();

        if segments.first().is_some_and(|s| s.starts_with('@')) {
            if segments.len() >= 2 {
                return Some(format!("{}/{}", segments[0], segments[1]));
            }
        } else if let Some(first) = segments.first() {
            return Some(first.to_string());
        }
    }

    // Same-named-file heuristic: group by basename.
    let basename = normalized
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or(normalized.as_str());
    Some(basename.to_string())
}

/// Group modules by inferred package key, preserving member order.
fn group_by_package(modules: &[Module]) -> HashMap<String, Vec<&Module>> {
    let mut groups: HashMap<String, Vec<&Module>> = HashMap::new();
    for module in modules {
        if let Some(key) = extract_package_name(&module.name) {
            groups.entry(key).or_default().push(module);
        }
    }
    groups
}

/// Aggregate per-package statistics, capped to the top 20 by size.
pub fn package_stats(modules: &[Module], total_size: u64) -> Vec<PackageStats> {
    let mut packages: Vec<PackageStats> = group_by_package(modules)
        .into_iter()
        .map(|(name, members)| {
            let package_size: u64 = members.iter().map(|m| m.size).sum();
            PackageStats {
                name,
                total_size: package_size,
                gzip_size: members.iter().filter_map(|m| m.gzip_size).sum(),
                module_count: members.len(),
                modules: members.iter().map(|m| m.name.clone()).collect(),
                percentage: if total_size > 0 {
                    package_size as f64 / total_size as f64 * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();

    // Name tiebreak keeps output deterministic across hash orders.
    packages.sort_by(|a, b| b.total_size.cmp(&a.total_size).then(a.name.cmp(&b.name)));
    packages.truncate(TOP_PACKAGES);
    packages
}

/// Detect duplicate module groups, capped to the top 10 by total size.
///
/// A group is only a duplicate when it has at least two members with at
/// least two distinct full paths: a single file matching its own basename
/// is never reported.
pub fn find_duplicates(modules: &[Module]) -> Vec<DuplicateGroup> {
    let mut duplicates: Vec<DuplicateGroup> = group_by_package(modules)
        .into_values()
        .filter_map(|members| {
            if members.len() < 2 {
                return None;
            }
            let names: Vec<String> = members.iter().map(|m| m.name.clone()).collect();
            if names.iter().collect::<std::collections::HashSet<_>>().len() < 2 {
                return None;
            }

            let total_size: u64 = members.iter().map(|m| m.size).sum();
            let cheapest = members.iter().map(|m| m.size).min().unwrap_or(0);
            Some(DuplicateGroup {
                names,
                total_size,
                savings: total_size - cheapest,
            })
        })
        .collect();

    duplicates.sort_by(|a, b| {
        b.total_size
            .cmp(&a.total_size)
            .then_with(|| a.names.cmp(&b.names))
    });
    duplicates.truncate(TOP_DUPLICATES);
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: &str, size: u64) -> Module {
        Module {
            name: name.to_string(),
            size,
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_package_name_regular() {
        assert_eq!(
            extract_package_name("./node_modules/lodash/lodash.js"),
            Some("lodash".to_string())
        );
        assert_eq!(
            extract_package_name("/abs/path/node_modules/react/cjs/react.js"),
            Some("react".to_string())
        );
    }

    #[test]
    fn test_extract_package_name_scoped() {
        assert_eq!(
            extract_package_name("./node_modules/@babel/core/lib/index.js"),
            Some("@babel/core".to_string())
        );
        assert_eq!(
            extract_package_name("./node_modules/@types/react/index.d.ts"),
            Some("@types/react".to_string())
        );
    }

    #[test]
    fn test_extract_package_name_nested_node_modules() {
        assert_eq!(
            extract_package_name("./node_modules/pkg-a/node_modules/pkg-b/index.js"),
            Some("pkg-b".to_string())
        );
    }

    #[test]
    fn test_extract_package_name_backslashes() {
        assert_eq!(
            extract_package_name(".\\node_modules\\chalk\\index.js"),
            Some("chalk".to_string())
        );
    }

    #[test]
    fn test_extract_package_name_basename_fallback() {
        assert_eq!(
            extract_package_name("./src/utils/helpers.js"),
            Some("helpers.js".to_string())
        );
        assert_eq!(
            extract_package_name("webpack/runtime/define"),
            Some("define".to_string())
        );
    }

    #[test]
    fn test_extract_package_name_empty() {
        assert_eq!(extract_package_name(""), None);
    }

    #[test]
    fn test_package_stats_aggregation() {
        let modules = vec![
            module("node_modules/lodash/index.js", 5000),
            module("node_modules/lodash/clone.js", 2000),
            module("node_modules/react/index.js", 3000),
        ];

        let packages = package_stats(&modules, 10000);
        let lodash = packages.iter().find(|p| p.name == "lodash").unwrap();

        assert_eq!(lodash.total_size, 7000);
        assert_eq!(lodash.module_count, 2);
        assert!((lodash.percentage - 70.0).abs() < 1e-9);
        assert_eq!(packages[0].name, "lodash");
    }

    #[test]
    fn test_package_stats_zero_total() {
        let modules = vec![module("node_modules/lodash/index.js", 0)];
        let packages = package_stats(&modules, 0);
        assert_eq!(packages[0].percentage, 0.0);
    }

    #[test]
    fn test_package_stats_capped_at_twenty() {
        let modules: Vec<Module> = (0..30)
            .map(|i| module(&format!("node_modules/pkg{i}/index.js"), 100 + i))
            .collect();
        assert_eq!(package_stats(&modules, 10000).len(), 20);
    }

    #[test]
    fn test_find_duplicates_basic() {
        let modules = vec![
            module("./src/a/util.js", 300),
            module("./src/b/util.js", 200),
            module("./src/unique.js", 100),
        ];

        let duplicates = find_duplicates(&modules);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].total_size, 500);
        assert_eq!(duplicates[0].savings, 300);
        assert_eq!(duplicates[0].names.len(), 2);
    }

    #[test]
    fn test_single_module_never_a_duplicate() {
        let modules = vec![module("./src/lodash", 100), module("other.js", 50)];
        assert!(find_duplicates(&modules).is_empty());
    }

    #[test]
    fn test_duplicates_capped_at_ten() {
        let mut modules = Vec::new();
        for i in 0..15 {
            modules.push(module(&format!("./a/dup{i}.js"), 100));
            modules.push(module(&format!("./b/dup{i}.js"), 100));
        }
        assert_eq!(find_duplicates(&modules).len(), 10);
    }

    #[test]
    fn test_duplicates_sorted_by_total_size() {
        let modules = vec![
            module("./a/small.js", 10),
            module("./b/small.js", 10),
            module("./a/big.js", 1000),
            module("./b/big.js", 1000),
        ];

        let duplicates = find_duplicates(&modules);
        assert_eq!(duplicates[0].total_size, 2000);
        assert_eq!(duplicates[1].total_size, 20);
    }
}
