//! CLI error types.

use gram_config::ConfigError;
use gram_tag::GramError;
use gram_tag::tag::ProcessError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Gram(#[from] GramError),

    #[error("{}: {source}", path.display())]
    Process {
        path: std::path::PathBuf,
        source: ProcessError,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
