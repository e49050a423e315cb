pub mod facts;
mod js;
mod languages;
mod vue;

use std::time::Duration;

use crate::error::{ParseFailure, ParseFailureReason};
use crate::file_id::FileId;
use crate::scanner::FileScanner;
use facts::FileFacts;
use languages::lang_for_extension;

/// Turn one source file into [`FileFacts`], or `None` when it contributes
/// nothing recognizable. Parse and I/O failures are reported through `Err`
/// rather than raised — they're non-fatal, folded into `parse_failures` by
/// the caller, and never poison sibling work. A per-file `timeout`, when
/// given, bounds the tree-sitter parse and surfaces as `ParseFailureReason::Timeout`.
pub fn analyze(
    file_id: &FileId,
    scanner: &FileScanner,
    timeout: Option<Duration>,
) -> Result<Option<FileFacts>, ParseFailure> {
    let source = std::fs::read_to_string(file_id).map_err(|err| ParseFailure {
        file_id: file_id.clone(),
        reason: ParseFailureReason::IoError(err.to_string()),
    })?;

    let ext = file_id
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let extraction = if ext == "vue" {
        vue::analyze_vue(&source, file_id, scanner, timeout).map_err(|reason| ParseFailure {
            file_id: file_id.clone(),
            reason,
        })?
    } else {
        let Some(lang) = lang_for_extension(&ext) else {
            return Err(ParseFailure {
                file_id: file_id.clone(),
                reason: ParseFailureReason::UnsupportedExtension,
            });
        };
        let language = languages::language_for(lang);
        let Some(tree) = languages::parse(lang, &source, timeout) else {
            let reason = if timeout.is_some() {
                ParseFailureReason::Timeout
            } else {
                ParseFailureReason::SyntaxError("tree-sitter failed to produce a tree".into())
            };
            return Err(ParseFailure {
                file_id: file_id.clone(),
                reason,
            });
        };
        js::extract(&tree, &source, &language, file_id, scanner)
    };

    let facts = FileFacts {
        file_id: file_id.clone(),
        component_name: FileFacts::derive_name(file_id),
        is_component: extraction.is_component,
        exports: extraction.exports,
        imports: extraction.imports,
        props_declared: extraction.props_declared,
        props_used: extraction.props_used,
        uses_rest_spread: extraction.uses_rest_spread,
        component_usages: extraction.component_usages,
        cyclomatic_complexity: extraction.cyclomatic_complexity,
    };

    if facts.is_empty_contribution() {
        return Ok(None);
    }
    Ok(Some(facts))
}

/// Run `analyze` over every scanned file using a bounded rayon worker pool
/// (width = `concurrency`), collecting results sorted by `FileId` — this
/// ordering is the determinism contract [`crate::graph::build`] depends on.
pub fn analyze_all(
    file_ids: &[FileId],
    scanner: &FileScanner,
    concurrency: usize,
    timeout: Option<Duration>,
) -> (Vec<FileFacts>, Vec<ParseFailure>) {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrency.max(1))
        .build()
        .expect("failed to build analysis thread pool");

    let results: Vec<Result<Option<FileFacts>, ParseFailure>> = pool.install(|| {
        use rayon::prelude::*;
        file_ids.par_iter().map(|file_id| analyze(file_id, scanner, timeout)).collect()
    });

    let mut facts = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(Some(f)) => facts.push(f),
            Ok(None) => {}
            Err(failure) => failures.push(failure),
        }
    }

    facts.sort_by(|a, b| a.file_id.cmp(&b.file_id));
    failures.sort_by(|a, b| a.file_id.cmp(&b.file_id));
    (facts, failures)
}

/// Build a lookup for placeholder-node naming: any import target not covered
/// by a successfully-analyzed `FileFacts` still needs a `component_name`.
pub fn derive_placeholder_name(file_id: &FileId) -> String {
    FileFacts::derive_name(file_id)
}
