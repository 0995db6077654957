use std::{env, path::Path};

use tinygit_core::repo::{Error, Result};
use tinygit_on_disk::OnDisk;

// Discover a git repo starting from the given path.
//
// Looks for a `.git` directory in `path` and then in each of its
// ancestors, stopping at the first one found. A `.git` that is present
// but can't be opened (missing config, unsupported format, and so on)
// stops the search with that error rather than being skipped.
//
// Returns `Error::NotARepository` with the original path if no
// ancestor holds a repository.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDisk> {
    let path = path.as_ref();
    let start = match path.canonicalize() {
        Ok(start) => start,
        Err(_) => env::current_dir()?.join(path),
    };

    for candidate in start.ancestors() {
        match OnDisk::open(candidate) {
            Ok(repo) => return Ok(repo),
            Err(Error::NotARepository(_)) => continue,
            Err(err) => return Err(err),
        }
    }

    Err(Error::NotARepository(path.to_path_buf()))
}

// Discover a git repo starting from the current working directory.
pub fn from_current_dir() -> Result<OnDisk> {
    let path = env::current_dir()?;
    from_path(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use serial_test::serial;

    use tinygit_on_disk::TempRepo;

    use crate::temp_cwd::TempCwd;

    #[test]
    fn simple_case() {
        let tr = TempRepo::new();
        let path = tr.path();
        let repo = from_path(path).unwrap();
        assert_eq!(repo.work_dir(), path.canonicalize().unwrap());
    }

    #[test]
    fn nested_dir() {
        let tr = TempRepo::new();
        let nested = tr.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let repo = from_path(&nested).unwrap();
        assert_eq!(repo.work_dir(), tr.path().canonicalize().unwrap());
    }

    #[test]
    fn nested_dir_doesnt_exist() {
        let tr = TempRepo::new();
        let missing = tr.path().canonicalize().unwrap().join("not/yet");

        let repo = from_path(&missing).unwrap();
        assert_eq!(repo.git_dir(), tr.path().canonicalize().unwrap().join(".git"));
    }

    #[test]
    fn work_dir_doesnt_exist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut path = temp_dir.path().to_path_buf();
        path.push("nope");

        let err = from_path(&path).unwrap_err();
        if let Error::NotARepository(err_path) = err {
            assert_eq!(err_path, path);
        } else {
            panic!("Unexpected error response: {:?}", err);
        }
    }

    #[test]
    fn git_dir_doesnt_exist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path();

        let err = from_path(&path).unwrap_err();
        if let Error::NotARepository(err_path) = err {
            assert_eq!(err_path, path);
        } else {
            panic!("Unexpected error response: {:?}", err);
        }
    }

    #[test]
    #[serial]
    fn relative_missing_path_inside_repo() {
        let tr = TempRepo::new();
        let top = tr.path().canonicalize().unwrap();

        let repo = {
            let _cwd = TempCwd::new(&top);
            from_path("not/yet").unwrap()
        };

        assert_eq!(repo.work_dir(), top);
        assert!(repo.work_dir().is_absolute());
    }

    #[test]
    #[serial]
    fn relative_missing_path_outside_repo() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = {
            let _cwd = TempCwd::new(temp_dir.path());
            from_path("nope").unwrap_err()
        };

        if let Error::NotARepository(err_path) = err {
            assert_eq!(err_path, Path::new("nope"));
        } else {
            panic!("Unexpected error response: {:?}", err);
        }
    }

    #[test]
    fn broken_repo_stops_search() {
        let tr = TempRepo::new();
        let inner = tr.path().join("inner");
        fs::create_dir_all(inner.join(".git")).unwrap();

        let err = from_path(&inner).unwrap_err();
        if let Error::MissingConfig(_) = err {
            // expected
        } else {
            panic!("Unexpected error response: {:?}", err);
        }
    }
}
