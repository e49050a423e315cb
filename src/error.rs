use std::path::PathBuf;

use thiserror::Error;

/// Reason a single file failed to contribute `FileFacts` to the pipeline.
///
/// Non-fatal: collected into [`crate::CoreResult::parse_failures`] and reported
/// alongside a successful result. The offending file never poisons sibling work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailureReason {
    SyntaxError(String),
    Timeout,
    IoError(String),
    UnsupportedExtension,
}

impl std::fmt::Display for ParseFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SyntaxError(msg) => write!(f, "syntax error: {msg}"),
            Self::Timeout => write!(f, "timed out"),
            Self::IoError(msg) => write!(f, "io error: {msg}"),
            Self::UnsupportedExtension => write!(f, "unsupported extension"),
        }
    }
}

/// A single non-fatal failure to parse a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub file_id: PathBuf,
    pub reason: ParseFailureReason,
}

/// Fatal error taxonomy for the analysis core.
///
/// Every other condition the pipeline encounters is non-fatal and surfaces as
/// [`ParseFailure`] content or as `Findings`, never as a propagated error — see
/// the error handling design in the spec (`§7`).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("project root not found: {0}")]
    ProjectNotFound(PathBuf),

    #[error("invalid framework: {0}")]
    InvalidFramework(String),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}
