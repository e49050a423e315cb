mod tsconfig;
mod walk;

use std::path::{Path, PathBuf};

use crate::error::CoreError;
use crate::file_id::{self, FileId};
use crate::framework::Framework;
use tsconfig::PathAlias;

/// Discovers project-local source files and resolves module specifiers to
/// in-project `FileId`s.
///
/// Holds the project's TS path aliases (loaded once, at construction) so
/// repeated `resolve_import` calls during `ASTAnalyzer`'s parallel fan-out
/// don't re-parse `tsconfig.json` per file.
pub struct FileScanner {
    project_path: FileId,
    framework: Framework,
    user_excludes: Vec<String>,
    path_aliases: Vec<PathAlias>,
}

impl FileScanner {
    /// Construct a scanner for `project_path`. Loads TS path aliases from
    /// `tsconfig_override` if given, else `<project_path>/tsconfig.json` if it
    /// exists.
    ///
    /// # Errors
    /// Returns [`CoreError::ProjectNotFound`] if `project_path` does not exist.
    pub fn new(
        project_path: &Path,
        framework: Framework,
        user_excludes: Vec<String>,
        tsconfig_override: Option<&Path>,
    ) -> Result<Self, CoreError> {
        if !project_path.exists() {
            return Err(CoreError::ProjectNotFound(project_path.to_path_buf()));
        }

        let canonical_root = file_id::canonicalize(project_path);

        let tsconfig_path = tsconfig_override
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| canonical_root.join("tsconfig.json"));
        let path_aliases = tsconfig::load_path_aliases(&tsconfig_path);

        Ok(Self {
            project_path: canonical_root,
            framework,
            user_excludes,
            path_aliases,
        })
    }

    /// Enumerate project source files.
    ///
    /// Deduplicated, sorted lexicographically (determinism is a contract), and
    /// canonicalized so every returned `FileId` is consistent with the ones
    /// produced by `resolve_import`.
    pub fn scan_files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = walk::collect_candidate_files(
            &self.project_path,
            self.framework,
            &self.user_excludes,
        )
        .into_iter()
        .map(|p| file_id::canonicalize(&p))
        .collect();

        files.sort();
        files.dedup();
        files
    }

    /// Returns true iff `path` is a descendant of the project root.
    pub fn in_project_scope(&self, path: &Path) -> bool {
        path.starts_with(&self.project_path)
    }

    /// Resolve a module specifier written in `from_file` to an in-project `FileId`.
    ///
    /// Resolution order (first match wins):
    /// 1. TS path aliases (`tsconfig.json` `baseUrl`/`paths`).
    /// 2. Relative / root-anchored (`./`, `../`, `/`) against `from_file`'s directory.
    /// 3. Anything else (bare specifiers) — third-party, returns `None`.
    ///
    /// Once a candidate base path is chosen, extension probing runs in the
    /// framework's fixed order: exact match if already a supported extension
    /// and it exists, else each extension in turn, else `candidate/index.<ext>`
    /// in the same order. Returns `None` if nothing exists or the result would
    /// fall outside project scope.
    pub fn resolve_import(&self, specifier: &str, from_file: &Path) -> Option<FileId> {
        let candidate = if let Some(aliased) = tsconfig::resolve_alias(&self.path_aliases, specifier) {
            aliased
        } else if specifier.starts_with("./") || specifier.starts_with("../") {
            from_file.parent()?.join(specifier)
        } else if let Some(stripped) = specifier.strip_prefix('/') {
            self.project_path.join(stripped)
        } else {
            return None;
        };

        let resolved = self.probe_extensions(&candidate)?;
        if !self.in_project_scope(&resolved) {
            return None;
        }
        Some(resolved)
    }

    fn probe_extensions(&self, candidate: &Path) -> Option<FileId> {
        let extensions = self.framework.source_extensions();

        if let Some(ext) = candidate.extension().and_then(|e| e.to_str())
            && extensions.contains(&ext)
            && candidate.is_file()
        {
            return Some(file_id::canonicalize(candidate));
        }

        for ext in extensions {
            let with_ext = append_extension(candidate, ext);
            if with_ext.is_file() {
                return Some(file_id::canonicalize(&with_ext));
            }
        }

        for ext in extensions {
            let index = candidate.join(format!("index.{ext}"));
            if index.is_file() {
                return Some(file_id::canonicalize(&index));
            }
        }

        None
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, contents: &str) {
        let full = dir.join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, contents).unwrap();
    }

    #[test]
    fn test_scan_files_deduped_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "b.jsx", "export default function B(){}");
        write(tmp.path(), "a.jsx", "export default function A(){}");
        write(tmp.path(), "node_modules/dep/index.js", "module.exports = {};");

        let scanner = FileScanner::new(tmp.path(), Framework::React, vec![], None).unwrap();
        let files = scanner.scan_files();
        assert_eq!(files.len(), 2, "node_modules must be excluded");
        assert!(files[0] < files[1], "results must be sorted");
    }

    #[test]
    fn test_resolve_relative_import() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "App.jsx", "");
        write(tmp.path(), "Button.jsx", "");

        let scanner = FileScanner::new(tmp.path(), Framework::React, vec![], None).unwrap();
        let from = tmp.path().join("App.jsx");
        let resolved = scanner.resolve_import("./Button", &from);
        assert_eq!(resolved, Some(file_id::canonicalize(&tmp.path().join("Button.jsx"))));
    }

    #[test]
    fn test_resolve_index_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "App.jsx", "");
        write(tmp.path(), "components/index.jsx", "");

        let scanner = FileScanner::new(tmp.path(), Framework::React, vec![], None).unwrap();
        let from = tmp.path().join("App.jsx");
        let resolved = scanner.resolve_import("./components", &from);
        assert_eq!(
            resolved,
            Some(file_id::canonicalize(&tmp.path().join("components/index.jsx")))
        );
    }

    #[test]
    fn test_resolve_bare_specifier_returns_none() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "App.jsx", "");
        let scanner = FileScanner::new(tmp.path(), Framework::React, vec![], None).unwrap();
        let from = tmp.path().join("App.jsx");
        assert!(scanner.resolve_import("react", &from).is_none());
    }

    #[test]
    fn test_resolve_tsconfig_alias() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "tsconfig.json",
            r#"{"compilerOptions": {"baseUrl": ".", "paths": {"@/*": ["src/*"]}}}"#,
        );
        write(tmp.path(), "src/a.ts", "");
        write(tmp.path(), "src/b.ts", "");

        let scanner = FileScanner::new(tmp.path(), Framework::React, vec![], None).unwrap();
        let from = tmp.path().join("src/a.ts");
        let resolved = scanner.resolve_import("@/b", &from);
        assert_eq!(resolved, Some(file_id::canonicalize(&tmp.path().join("src/b.ts"))));
    }

    #[test]
    fn test_missing_project_root_is_fatal() {
        let result = FileScanner::new(Path::new("/nonexistent-project-root"), Framework::React, vec![], None);
        assert!(matches!(result, Err(CoreError::ProjectNotFound(_))));
    }
}
