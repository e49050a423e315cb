use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Static dependency and prop-usage analyzer for React/Vue component codebases.
///
/// compgraph walks a project, extracts imports/exports/component shapes, builds
/// a typed dependency graph, and reports orphans, unused props, cycles, hubs,
/// dead code, and coupling.
#[derive(Parser, Debug)]
#[command(name = "compgraph", version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for an analysis run.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable summary counts (default).
    #[default]
    Summary,
    /// Full serialized result per the core's JSON output contract.
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FrameworkArg {
    React,
    Vue,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project and report findings.
    Analyze {
        /// Path to the project root to analyze.
        path: PathBuf,

        /// Component framework to analyze as. Falls back to `compgraph.toml` if omitted.
        #[arg(long, value_enum)]
        framework: Option<FrameworkArg>,

        /// Additional glob patterns to exclude, beyond the framework defaults.
        #[arg(long = "exclude", value_delimiter = ',')]
        excludes: Vec<String>,

        /// Worker pool width for the AST-extraction stage. Defaults to hardware parallelism.
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-file parse timeout in milliseconds. Unbounded if omitted.
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Explicit tsconfig.json path, overriding the project-root default.
        #[arg(long)]
        tsconfig: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,

        /// Write the serialized JSON result to this path in addition to stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Reuse a fresh on-disk cache of the last run instead of re-analyzing.
        #[arg(long)]
        use_cache: bool,
    },
}
