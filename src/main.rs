mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, FrameworkArg, OutputFormat};
use compgraph::config::FileConfig;
use compgraph::framework::Framework;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            framework,
            excludes,
            concurrency,
            timeout_ms,
            tsconfig,
            format,
            out,
            use_cache,
        } => run_analyze(path, framework, excludes, concurrency, timeout_ms, tsconfig, format, out, use_cache),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    path: std::path::PathBuf,
    framework: Option<FrameworkArg>,
    excludes: Vec<String>,
    concurrency: Option<usize>,
    timeout_ms: Option<u64>,
    tsconfig: Option<std::path::PathBuf>,
    format: OutputFormat,
    out: Option<std::path::PathBuf>,
    use_cache: bool,
) -> Result<()> {
    let project_path = std::fs::canonicalize(&path).unwrap_or(path);

    let cli_framework = framework.map(|f| match f {
        FrameworkArg::React => Framework::React,
        FrameworkArg::Vue => Framework::Vue,
    });

    let file_config = FileConfig::load(&project_path);
    let mut config = file_config.merge(project_path.clone(), cli_framework, excludes)?;

    if let Some(n) = concurrency {
        config.concurrency = n;
    }
    if let Some(ms) = timeout_ms {
        config.per_file_timeout = Some(Duration::from_millis(ms));
    }
    if let Some(tsconfig_path) = tsconfig {
        config.tsconfig_override = Some(tsconfig_path);
    }

    if use_cache {
        // A cache hit only short-circuits the JSON output path — a `Summary`
        // request still needs the live `CoreResult` to print counts from.
        if matches!(format, OutputFormat::Json) {
            let scanner = compgraph::scanner::FileScanner::new(
                &config.project_path,
                config.framework,
                config.user_excludes.clone(),
                config.tsconfig_override.as_deref(),
            )?;
            let files = scanner.scan_files();
            if let Some(cached) = compgraph::cache::load_cache_if_fresh(&config.project_path, &files) {
                return emit(&cached, out.as_deref());
            }
        }
    }

    let result = compgraph::analyze(config.clone())?;

    match format {
        OutputFormat::Summary => {
            print_summary(&result);
        }
        OutputFormat::Json => {
            let json = compgraph::serialize::to_json(
                &result,
                &config.project_path.to_string_lossy(),
                config.framework,
            );
            let serialized = serde_json::to_vec_pretty(&json)?;
            if use_cache {
                let _ = compgraph::cache::save_cache(&config.project_path, &result, &serialized);
            }
            emit(&serialized, out.as_deref())?;
        }
    }

    Ok(())
}

fn emit(bytes: &[u8], out: Option<&std::path::Path>) -> Result<()> {
    if let Some(path) = out {
        std::fs::write(path, bytes)?;
    }
    println!("{}", String::from_utf8_lossy(bytes));
    Ok(())
}

fn print_summary(result: &compgraph::CoreResult) {
    let m = &result.graph.metadata;
    println!("nodes: {}", m.node_count);
    println!("edges: {}", m.edge_count);
    println!("parse failures: {}", result.parse_failures.len());
    println!();
    println!("orphan components: {}", result.findings.orphan_components.len());
    println!("unused props: {}", result.findings.unused_props.len());
    println!("circular dependencies: {}", result.findings.circular_dependencies.len());
    println!("hub components: {}", result.findings.hub_components.len());
    println!("dead code: {}", result.findings.dead_code.len());
    println!("high coupling: {}", result.findings.high_coupling.len());
    println!();
    for rec in &result.findings.recommendations {
        println!("[{:?}] {}: {}", rec.priority, rec.title, rec.description);
    }
}
