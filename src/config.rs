use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::CoreError;
use crate::framework::Framework;

/// The explicit configuration value the analysis core accepts.
///
/// Per the design notes, the core never reads environment variables or performs
/// dynamic property lookups — every option the pipeline needs is enumerated here
/// and passed down explicitly from the caller.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub project_path: PathBuf,
    pub framework: Framework,
    pub user_excludes: Vec<String>,
    pub concurrency: usize,
    pub per_file_timeout: Option<Duration>,
    pub tsconfig_override: Option<PathBuf>,
}

impl CoreConfig {
    pub fn new(project_path: impl Into<PathBuf>, framework: Framework) -> Self {
        Self {
            project_path: project_path.into(),
            framework,
            user_excludes: Vec::new(),
            concurrency: default_concurrency(),
            per_file_timeout: None,
            tsconfig_override: None,
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// On-disk project configuration layered underneath CLI flags.
///
/// Loaded from `compgraph.toml` at the project root, exactly like the teacher's
/// `code-graph.toml`. A missing or malformed file silently yields defaults — this
/// loader is a thin, out-of-core collaborator; it never fails the pipeline.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub framework: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub concurrency: Option<usize>,
    pub per_file_timeout_ms: Option<u64>,
    pub tsconfig: Option<PathBuf>,
}

impl FileConfig {
    /// Load `compgraph.toml` from `root`, falling back to defaults on any error.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("compgraph.toml");
        if !config_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse compgraph.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read compgraph.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Merge the file config underneath explicit CLI overrides, producing a `CoreConfig`.
    ///
    /// `cli_framework` and `cli_excludes` take precedence when present; the file
    /// config only fills gaps. This is the layered-merge contract mentioned in
    /// the spec's "out of scope" collaborators list.
    ///
    /// An unresolvable framework is the one fatal condition this ambient layer
    /// can hit before a `CoreConfig` even exists, so it's reported through the
    /// core's own closed `CoreError::InvalidFramework` variant rather than an
    /// ad-hoc `anyhow` string — callers that match on `CoreError` downstream of
    /// `analyze` see the same variant they'd get from a core-internal check.
    pub fn merge(
        self,
        project_path: PathBuf,
        cli_framework: Option<Framework>,
        cli_excludes: Vec<String>,
    ) -> Result<CoreConfig, CoreError> {
        let framework = match cli_framework {
            Some(f) => f,
            None => match self.framework.as_deref() {
                Some(s) => Framework::from_str_loose(s)
                    .ok_or_else(|| CoreError::InvalidFramework(s.to_string()))?,
                None => {
                    return Err(CoreError::InvalidFramework(
                        "not specified via --framework or compgraph.toml".to_string(),
                    ))
                }
            },
        };

        let mut user_excludes = self.exclude.unwrap_or_default();
        user_excludes.extend(cli_excludes);

        let concurrency = self.concurrency.unwrap_or_else(default_concurrency);
        let per_file_timeout = self.per_file_timeout_ms.map(Duration::from_millis);

        Ok(CoreConfig {
            project_path,
            framework,
            user_excludes,
            concurrency,
            per_file_timeout,
            tsconfig_override: self.tsconfig,
        })
    }
}
