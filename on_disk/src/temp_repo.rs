use std::{fs, path::Path};

use crate::OnDisk;

/// A `TempRepo` creates a temporary, empty repo using
/// `OnDisk::init`. Tests use it when they need a valid
/// repository to start from.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    repo: OnDisk,
}

impl TempRepo {
    // Create a new repo in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let repo = OnDisk::init(tempdir.path()).unwrap();

        TempRepo {
            tempdir,
            repo,
        }
    }

    // Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.repo.work_dir()
    }

    // Return the repo as it was opened right after creation.
    pub fn repo(&self) -> &OnDisk {
        &self.repo
    }

    // Replace the contents of `.git/config`.
    pub fn write_config(&self, config_txt: &str) -> &TempRepo {
        fs::write(self.repo.path(&["config"]), config_txt).unwrap();
        self
    }
}

impl Default for TempRepo {
    fn default() -> Self {
        TempRepo::new()
    }
}
