use std::path::PathBuf;

use thiserror::Error;

/// Describes the potential error conditions that might arise from tinygit `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("configuration file missing: {0}")]
    MissingConfig(PathBuf),

    #[error("malformed configuration file {path} at line {line}")]
    MalformedConfig { path: PathBuf, line: usize },

    #[error("core.repositoryformatversion is not set")]
    MissingFormatVersion,

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this error means the target location does not
    /// hold a usable repository (no `.git` directory, or no readable config).
    pub fn is_invalid_repository(&self) -> bool {
        matches!(
            self,
            Error::NotARepository(_) | Error::MissingConfig(_) | Error::MalformedConfig { .. }
        )
    }

    /// Returns `true` if the repository's format version marker is
    /// missing or names a format this implementation doesn't understand.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            Error::MissingFormatVersion | Error::UnsupportedFormatVersion(_)
        )
    }
}

/// A specialized `Result` type for tinygit `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
