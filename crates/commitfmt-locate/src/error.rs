//! Error types for commitfmt-locate.

use std::{fmt, path::PathBuf};

use commitfmt_utils::error::{FileSystemError, PathError, UtilsError};
use miette::Diagnostic;
use thiserror::Error;

/// Failure of a [`PackageLocator`](crate::locator::PackageLocator).
#[derive(Error, Diagnostic, Debug)]
pub enum LocateError {
    #[error("Cannot find package '{package}'")]
    #[diagnostic(
        code(commitfmt::package_not_found),
        help(
            "Install the optional dependency '{package}' or check that this platform is supported.\nSearched:\n{searched}"
        )
    )]
    PackageNotFound {
        package: String,
        searched: SearchedPaths,
    },

    #[error(transparent)]
    #[diagnostic(code(commitfmt::locate_io))]
    FileSystem(#[from] FileSystemError),
}

/// Manifest paths probed before giving up, in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchedPaths(pub Vec<PathBuf>);

impl fmt::Display for SearchedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "  (no search locations)");
        }
        for (idx, path) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", path.display())?;
        }
        Ok(())
    }
}

impl From<Vec<PathBuf>> for SearchedPaths {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

/// Failure of binary path resolution.
#[derive(Error, Diagnostic, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Locate(#[from] LocateError),

    #[error("Unsupported platform: {os}-{arch}")]
    #[diagnostic(
        code(commitfmt::unsupported_platform),
        help("Run `commitfmt-locate targets` to list published platforms")
    )]
    UnsupportedPlatform { os: String, arch: String },
}

impl ResolveError {
    /// Returns true when the platform package is simply not installed.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Locate(LocateError::PackageNotFound { .. })
        )
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(commitfmt_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(commitfmt_config::toml_deserialize),
        help("Check your locate.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Utils(#[from] UtilsError),
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        Self::Utils(UtilsError::Path(err))
    }
}

impl From<FileSystemError> for ConfigError {
    fn from(err: FileSystemError) -> Self {
        Self::Utils(UtilsError::FileSystem(err))
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
