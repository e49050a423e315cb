use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A single `paths` alias entry: `prefix*` maps to `target_dir/*` under `base_dir`.
///
/// `prefix` and `target` have their trailing `*` stripped at load time so
/// resolution only has to substitute the remainder once.
#[derive(Debug, Clone)]
pub struct PathAlias {
    pub prefix: String,
    pub target_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
struct TsconfigFile {
    #[serde(rename = "compilerOptions")]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Deserialize, Default)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    paths: Option<HashMap<String, Vec<String>>>,
}

/// Load TS path aliases from a `tsconfig.json`-shaped file.
///
/// Returns an empty vector when the file is missing, unreadable, malformed, or
/// declares no `baseUrl`/`paths` — resolution simply falls through to relative
/// resolution in that case, matching the scanner's fallback contract.
pub fn load_path_aliases(tsconfig_path: &Path) -> Vec<PathAlias> {
    let contents = match std::fs::read_to_string(tsconfig_path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let parsed: TsconfigFile = match serde_json::from_str(&contents) {
        Ok(p) => p,
        Err(_) => return Vec::new(),
    };

    let Some(opts) = parsed.compiler_options else {
        return Vec::new();
    };

    let project_root = tsconfig_path.parent().unwrap_or_else(|| Path::new("."));
    let base = opts.base_url.as_deref().unwrap_or(".");
    let base_dir = project_root.join(base);

    let Some(paths) = opts.paths else {
        return Vec::new();
    };

    let mut aliases = Vec::new();
    for (alias, targets) in paths {
        let Some(first_target) = targets.into_iter().next() else {
            continue;
        };
        let prefix = alias.trim_end_matches('*').to_string();
        let target = first_target.trim_end_matches('*');
        aliases.push(PathAlias {
            prefix,
            target_dir: base_dir.join(target),
        });
    }
    // Longest prefix first so a more specific alias wins over a catch-all `*`.
    aliases.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    aliases
}

/// Resolve `specifier` against the alias list. Returns the substituted path
/// (not yet extension-probed) on the first matching prefix.
pub fn resolve_alias(aliases: &[PathAlias], specifier: &str) -> Option<PathBuf> {
    for alias in aliases {
        if let Some(remainder) = specifier.strip_prefix(&alias.prefix) {
            return Some(alias.target_dir.join(remainder));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_alias_wildcard() {
        let aliases = vec![PathAlias {
            prefix: "@/".into(),
            target_dir: PathBuf::from("/proj/src/"),
        }];
        let resolved = resolve_alias(&aliases, "@/components/Button");
        assert_eq!(resolved, Some(PathBuf::from("/proj/src/components/Button")));
    }

    #[test]
    fn test_resolve_alias_no_match() {
        let aliases = vec![PathAlias {
            prefix: "@/".into(),
            target_dir: PathBuf::from("/proj/src/"),
        }];
        assert!(resolve_alias(&aliases, "react").is_none());
    }

    #[test]
    fn test_load_path_aliases_missing_file() {
        let aliases = load_path_aliases(Path::new("/nonexistent/tsconfig.json"));
        assert!(aliases.is_empty());
    }
}
