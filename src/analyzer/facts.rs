use std::collections::{BTreeMap, BTreeSet};

use crate::file_id::FileId;

/// One export statement recognized in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    Default,
    Named,
    ReexportWildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub kind: ExportKind,
    /// `None` for an anonymous default export or a wildcard re-export.
    pub name: Option<String>,
    /// The module specifier a re-export names, e.g. `"./Button"`.
    pub reexport_source: Option<String>,
}

/// How a single import contributes a dependency — kept so downstream consumers
/// (notably S6's "specifier metadata contains both records" requirement) can
/// see every way a target was reached, even after specifiers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    DefaultSpec(String),
    NamedSpec { imported: String, local: String },
    NamespaceSpec(String),
    BareReexport,
    DynamicImport,
    CjsRequire,
}

/// All the ways one file's imports reached one resolved target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportEdge {
    pub source_specifier: String,
    pub kinds: Vec<ImportKind>,
}

/// How many times, and with what props, a file's JSX/template referenced a
/// particular imported component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentUsage {
    pub usage_count: u32,
    pub passed_props: BTreeSet<String>,
}

/// The immutable, per-file output of AST extraction. Created once per analyzed
/// file by [`crate::analyzer::analyze`] and never mutated afterward.
#[derive(Debug, Clone)]
pub struct FileFacts {
    pub file_id: FileId,
    pub component_name: String,
    pub is_component: bool,
    pub exports: Vec<Export>,
    pub imports: BTreeMap<FileId, ImportEdge>,
    pub props_declared: BTreeSet<String>,
    pub props_used: BTreeSet<String>,
    pub uses_rest_spread: bool,
    pub component_usages: BTreeMap<FileId, ComponentUsage>,
    pub cyclomatic_complexity: u32,
}

impl FileFacts {
    /// Derive a component name from a file's basename: the stem, unless it's
    /// `index`, in which case the containing directory's name is used instead.
    pub fn derive_name(file_id: &FileId) -> String {
        let stem = file_id
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        if stem.eq_ignore_ascii_case("index") {
            file_id
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .unwrap_or(stem)
                .to_string()
        } else {
            stem.to_string()
        }
    }

    /// True iff this file contributes nothing a graph node could represent:
    /// neither a recognized component nor any export. Per spec §4.2, `analyze`
    /// returns `None` in this case rather than an empty `FileFacts`.
    pub fn is_empty_contribution(&self) -> bool {
        !self.is_component && self.exports.is_empty()
    }
}
