use std::path::PathBuf;

use commitfmt_locate::error::{ConfigError, ResolveError};
use commitfmt_utils::error::{FileSystemError, PathError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] FileSystemError),

    #[error("Binary is missing or not executable: {}", .path.display())]
    #[diagnostic(
        code(commitfmt_locate::binary_unusable),
        help("Reinstall the commitfmt npm package to restore the platform binary")
    )]
    BinaryUnusable { path: PathBuf },

    #[error("Failed to serialize output: {0}")]
    #[diagnostic(code(commitfmt_locate::json))]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
