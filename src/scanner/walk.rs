use std::path::Path;

use crate::framework::Framework;

/// Default exclusions applied on top of `user_excludes`, regardless of framework.
const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "coverage",
    "*.test.*",
    "*.spec.*",
    "*.d.ts",
];

/// Walk `root` and collect candidate source files for `framework`.
///
/// Respects `.gitignore`-style rules via the `ignore` crate, then applies the
/// default exclude set plus `user_excludes` as glob patterns matched against
/// path components and the full path. Only regular, existing files pass
/// through — directories and broken entries are skipped.
pub fn collect_candidate_files(
    root: &Path,
    framework: Framework,
    user_excludes: &[String],
) -> Vec<std::path::PathBuf> {
    let extensions = framework.source_extensions();
    let mut out = Vec::new();

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(true)
        .require_git(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().map(|ft| !ft.is_file()).unwrap_or(true) {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !extensions.contains(&ext) {
            continue;
        }

        if is_excluded(path, user_excludes) {
            continue;
        }

        out.push(path.to_path_buf());
    }

    out
}

fn is_excluded(path: &Path, user_excludes: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    let all_patterns = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).chain(user_excludes.iter().cloned());

    for pattern in all_patterns {
        if let Ok(matched) = glob::Pattern::new(&pattern) {
            if matched.matches(&path_str) {
                return true;
            }
            for component in path.components() {
                if let Some(s) = component.as_os_str().to_str()
                    && matched.matches(s)
                {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_excluded_node_modules() {
        let path = Path::new("/proj/node_modules/react/index.js");
        assert!(is_excluded(path, &[]));
    }

    #[test]
    fn test_is_excluded_test_file() {
        let path = Path::new("/proj/src/Button.test.tsx");
        assert!(is_excluded(path, &[]));
    }

    #[test]
    fn test_is_excluded_declaration_file() {
        let path = Path::new("/proj/src/types.d.ts");
        assert!(is_excluded(path, &[]));
    }

    #[test]
    fn test_not_excluded_normal_component() {
        let path = Path::new("/proj/src/Button.tsx");
        assert!(!is_excluded(path, &[]));
    }

    #[test]
    fn test_user_exclude_applies() {
        let path = Path::new("/proj/src/legacy/Old.tsx");
        assert!(is_excluded(path, &["*legacy*".to_string()]));
    }
}
