//! Translation from `.git`-relative path segments to real file system paths.

use std::fs;
use std::path::{Path, PathBuf};

use tinygit_core::repo::{Error, Result};

use tracing::debug;

use super::OnDisk;

impl OnDisk {
    /// Compute a path under this repo's `.git` directory.
    ///
    /// This is pure path arithmetic; the file system is not consulted.
    pub fn path<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut path = self.git_dir.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Compute a directory path under `.git`, optionally creating it.
    ///
    /// Returns `Ok(None)` if the directory doesn't exist and `ensure` is false;
    /// in that case nothing on disk changes. With `ensure` set, the directory
    /// and any missing ancestors are created.
    ///
    /// Fails with `Error::NotADirectory` if something other than a directory
    /// already occupies the path.
    pub fn dir<I, S>(&self, segments: I, ensure: bool) -> Result<Option<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let path = self.path(segments);

        // `symlink_metadata` so a dangling link still counts as occupying the path.
        if fs::symlink_metadata(&path).is_ok() {
            if path.is_dir() {
                Ok(Some(path))
            } else {
                Err(Error::NotADirectory(path))
            }
        } else if ensure {
            debug!(path = %path.display(), "creating directory");
            fs::create_dir_all(&path)?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Compute a file path under `.git`, optionally creating the directories
    /// that contain it. The file itself is never created.
    ///
    /// Returns `Ok(None)` if the containing directory doesn't exist and
    /// `ensure` is false. Otherwise returns the file path whether or not a file
    /// exists there yet.
    pub fn file<I, S>(&self, segments: I, ensure: bool) -> Result<Option<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut segments: Vec<S> = segments.into_iter().collect();
        let leaf = segments.pop();

        let dir = self.dir(&segments, ensure)?;

        Ok(dir.map(|dir| match leaf {
            Some(leaf) => dir.join(leaf),
            None => dir,
        }))
    }
}
