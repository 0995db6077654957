use std::fs;
use std::path::{Path, PathBuf};

use tinygit_core::config::{Config, ParseError};
use tinygit_core::repo::{Error, Repo, Result, DEFAULT_BRANCH, GIT_DIR_NAME};

use tracing::{info, instrument};

mod paths;

const DESCRIPTION: &str = "Unnamed repository; edit this file 'description' to name the repository.\n";

// Directories created by `init`, relative to the `.git` directory.
const SKELETON: &[&[&str]] = &[
    &["branches"],
    &["objects"],
    &["refs", "tags"],
    &["refs", "heads"],
];

const NO_SEGMENTS: [&str; 0] = [];

/// Implementation of `tinygit_core::repo::Repo` that stores content on the local file system.
///
/// An `OnDisk` value is only a description of a location: it holds the
/// working directory, the `.git` directory derived from it, and the
/// configuration read from `.git/config`. It keeps no files open and can be
/// dropped or re-created from the same path at any time.
#[derive(Clone, Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
    config: Config,
}

impl OnDisk {
    /// Describe the repository whose working directory is `work_dir`.
    ///
    /// Does not touch the file system, so nothing is validated and the config
    /// is empty. Use `open` to load an existing repository or `init` to create one.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        let work_dir = work_dir.as_ref().to_path_buf();
        let git_dir = work_dir.join(GIT_DIR_NAME);

        OnDisk {
            work_dir,
            git_dir,
            config: Config::new(),
        }
    }

    /// Open an existing on-disk git repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory
    /// containing a `config` file should exist at this path, and that config must
    /// declare a supported `core.repositoryformatversion`. Use the `init` function
    /// to create an empty on-disk repository if necessary.
    #[instrument(skip(work_dir), level = "debug")]
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let mut repo = OnDisk::new(work_dir);

        if repo.dir(&NO_SEGMENTS, false)?.is_none() {
            return Err(Error::NotARepository(repo.work_dir));
        }

        let config_path = repo.path(&["config"]);
        if !config_path.is_file() {
            return Err(Error::MissingConfig(config_path));
        }

        let config_txt = fs::read_to_string(&config_path)?;
        repo.config = config_txt
            .parse::<Config>()
            .map_err(|err: ParseError| Error::MalformedConfig {
                path: config_path,
                line: err.line(),
            })?;

        repo.format_version()?;

        info!(git_dir = %repo.git_dir.display(), "opened repository");
        Ok(repo)
    }

    /// Creates a new, empty git repository on the local file system.
    ///
    /// `work_dir` is created (with any missing ancestors) if it doesn't exist.
    /// An existing, empty `.git` directory is reused; a non-empty one is never
    /// overwritten.
    ///
    /// If a step fails partway through, whatever was already created is left
    /// in place.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    #[instrument(skip(work_dir), level = "debug")]
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let repo = OnDisk::new(work_dir);

        if fs::symlink_metadata(&repo.work_dir).is_ok() {
            if !repo.work_dir.is_dir() {
                return Err(Error::NotADirectory(repo.work_dir));
            }

            if let Some(git_dir) = repo.dir(&NO_SEGMENTS, false)? {
                if fs::read_dir(&git_dir)?.next().is_some() {
                    return Err(Error::AlreadyInitialized(git_dir));
                }
            }
        } else {
            fs::create_dir_all(&repo.work_dir)?;
        }

        for segments in SKELETON {
            repo.dir(*segments, true)?;
        }

        create_description(&repo)?;
        create_head(&repo)?;
        create_config(&repo)?;

        info!(git_dir = %repo.git_dir.display(), "initialized empty repository");

        // Read back what we wrote so a new repo passes the same checks as `open`.
        OnDisk::open(&repo.work_dir)
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }
}

impl Repo for OnDisk {
    fn config(&self) -> &Config {
        &self.config
    }
}

fn create_description(repo: &OnDisk) -> Result<()> {
    fs::write(repo.path(&["description"]), DESCRIPTION).map_err(|e| e.into())
}

fn create_head(repo: &OnDisk) -> Result<()> {
    let head_txt = format!("ref: refs/heads/{}\n", DEFAULT_BRANCH);
    fs::write(repo.path(&["HEAD"]), head_txt).map_err(|e| e.into())
}

fn create_config(repo: &OnDisk) -> Result<()> {
    let config_txt = Config::for_new_repo().to_string();
    fs::write(repo.path(&["config"]), config_txt).map_err(|e| e.into())
}
