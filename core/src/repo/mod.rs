//! Represents an abstract git repository.
//!
//! ## Design Goals
//!
//! Tinygit intends to allow repositories to be stored in multiple different mechanisms.
//! The built-in implementation keeps everything in a local `.git` directory
//! (see the `tinygit_on_disk` crate), but the rules that decide whether a
//! repository is one we understand live here so any storage mechanism shares them.

mod error;
pub use error::{Error, Result};

use crate::config::Config;

/// Name of the metadata directory inside a working tree.
pub const GIT_DIR_NAME: &str = ".git";

/// Branch that `HEAD` points to in a freshly created repository.
pub const DEFAULT_BRANCH: &str = "master";

/// The only value of `core.repositoryformatversion` we accept.
pub const SUPPORTED_FORMAT_VERSION: u32 = 0;

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing a git repo.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture.
///
/// The provided methods represent checks common to every repo, regardless of
/// its storage mechanism.
pub trait Repo {
    /// Return the configuration loaded for this repo.
    fn config(&self) -> &Config;

    /// Read and validate `core.repositoryformatversion`.
    ///
    /// Fails with `Error::MissingFormatVersion` if the key is absent and with
    /// `Error::UnsupportedFormatVersion` if it is not an integer or is any
    /// integer other than `SUPPORTED_FORMAT_VERSION`.
    fn format_version(&self) -> Result<u32> {
        let raw = self
            .config()
            .get("core", "repositoryformatversion")
            .ok_or(Error::MissingFormatVersion)?;

        // Any spelling of the integer zero counts, including `+0` and `-0`.
        match raw.parse::<i64>() {
            Ok(version) if version == i64::from(SUPPORTED_FORMAT_VERSION) => {
                Ok(SUPPORTED_FORMAT_VERSION)
            }
            _ => Err(Error::UnsupportedFormatVersion(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InMemory {
        config: Config,
    }

    impl Repo for InMemory {
        fn config(&self) -> &Config {
            &self.config
        }
    }

    fn repo_with(text: &str) -> InMemory {
        InMemory {
            config: text.parse().unwrap(),
        }
    }

    #[test]
    fn version_zero() {
        let r = repo_with("[core]\n\trepositoryformatversion = 0\n");
        assert_eq!(r.format_version().unwrap(), 0);
    }

    #[test]
    fn version_missing() {
        let r = repo_with("[core]\n\tbare = false\n");
        let err = r.format_version().unwrap_err();
        if let Error::MissingFormatVersion = err {
            // expected
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn version_one() {
        let r = repo_with("[core]\n\trepositoryformatversion = 1\n");
        let err = r.format_version().unwrap_err();
        if let Error::UnsupportedFormatVersion(v) = err {
            assert_eq!(v, "1");
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn version_not_a_number() {
        let r = repo_with("[core]\n\trepositoryformatversion = zero\n");
        assert!(r.format_version().unwrap_err().is_unsupported_format());

        let r = repo_with("[core]\n\trepositoryformatversion = 0.0\n");
        assert!(r.format_version().unwrap_err().is_unsupported_format());
    }

    #[test]
    fn version_signed_zero() {
        let r = repo_with("[core]\n\trepositoryformatversion = -0\n");
        assert_eq!(r.format_version().unwrap(), 0);

        let r = repo_with("[core]\n\trepositoryformatversion = +0\n");
        assert_eq!(r.format_version().unwrap(), 0);

        let r = repo_with("[core]\n\trepositoryformatversion = -1\n");
        let err = r.format_version().unwrap_err();
        if let Error::UnsupportedFormatVersion(v) = err {
            assert_eq!(v, "-1");
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    #[test]
    fn version_in_wrong_section() {
        let r = repo_with("[extensions]\n\trepositoryformatversion = 0\n");
        assert!(r.format_version().unwrap_err().is_unsupported_format());
    }
}
