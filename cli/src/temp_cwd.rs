use std::{
    env,
    path::{Path, PathBuf},
};

// Switches the process's current directory for the lifetime of the value,
// restoring the previous one on drop.
//
// The current directory is shared by every thread in the test binary,
// so tests that use this must be marked `#[serial]`.
pub(crate) struct TempCwd {
    restore_to: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let restore_to = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { restore_to }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.restore_to).unwrap();
    }
}
