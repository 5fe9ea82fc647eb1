//! CLI error types.

use wt_lower::LowerError;
use wt_site::{ConfigError, TitleError};
use wt_wom::PrintError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid syntax tree: {0}")]
    Ast(#[from] serde_json::Error),

    #[error("invalid page title: {0}")]
    Title(#[from] TitleError),

    #[error("{0}")]
    Lower(#[from] LowerError),

    #[error("{0}")]
    Print(#[from] PrintError),
}
