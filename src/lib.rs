pub mod analysis;
pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;
pub mod file_id;
pub mod framework;
pub mod graph;
pub mod scanner;
pub mod serialize;

use analysis::findings::Findings;
use analysis::AnalysisEngine;
use config::CoreConfig;
use error::{CoreError, ParseFailure};
use graph::build::GraphBuilder;
use graph::Graph;
use scanner::FileScanner;

/// The output of a complete analysis run: the frozen dependency graph, the
/// derived findings, and every file the analyzer could not process.
pub struct CoreResult {
    pub graph: Graph,
    pub findings: Findings,
    pub parse_failures: Vec<ParseFailure>,
}

/// The core's single library-level entry point. Runs the four-stage pipeline
/// — FileScanner, ASTAnalyzer, GraphBuilder, AnalysisEngine — and returns
/// either a complete result or a single fatal error. Non-fatal per-file
/// failures never propagate; they're folded into `parse_failures`.
pub fn analyze(config: CoreConfig) -> Result<CoreResult, CoreError> {
    let scanner = FileScanner::new(
        &config.project_path,
        config.framework,
        config.user_excludes.clone(),
        config.tsconfig_override.as_deref(),
    )?;

    let file_ids = scanner.scan_files();

    let (facts, parse_failures) =
        analyzer::analyze_all(&file_ids, &scanner, config.concurrency, config.per_file_timeout);

    let graph = GraphBuilder::build(facts);

    let findings = AnalysisEngine::analyze(&graph)?;

    Ok(CoreResult {
        graph,
        findings,
        parse_failures,
    })
}
