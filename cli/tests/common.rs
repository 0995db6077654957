use std::{fs, path::Path};

use assert_cmd::Command;

pub fn tinygit() -> Command {
    Command::cargo_bin("tinygit").unwrap()
}

// Build the tree `tinygit init` is expected to produce inside `path`.
#[allow(dead_code)]
pub fn write_expected_repo(path: &Path) {
    let git_dir = path.join(".git");

    for dir in &["branches", "objects", "refs/heads", "refs/tags"] {
        fs::create_dir_all(git_dir.join(dir)).unwrap();
    }

    fs::write(
        git_dir.join("config"),
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n",
    )
    .unwrap();

    fs::write(
        git_dir.join("description"),
        "Unnamed repository; edit this file 'description' to name the repository.\n",
    )
    .unwrap();

    fs::write(git_dir.join("HEAD"), "ref: refs/heads/master\n").unwrap();
}
