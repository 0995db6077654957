use std::io::Write;

use super::{App, Command, Result};

use crate::find_repo;

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};

pub(crate) fn command() -> Command {
    Command {
        name: "rev-parse",
        subcommand,
        run,
    }
}

fn subcommand() -> clap::App<'static, 'static> {
    SubCommand::with_name("rev-parse")
        .about("Show paths of the repository containing the current directory")
        .arg(
            Arg::with_name("git-dir")
                .long("git-dir")
                .help("Show the path to the .git directory"),
        )
        .arg(
            Arg::with_name("show-toplevel")
                .long("show-toplevel")
                .help("Show the top-level working directory"),
        )
        .group(
            ArgGroup::with_name("query")
                .args(&["git-dir", "show-toplevel"])
                .required(true),
        )
}

fn run(app: &mut App, matches: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_current_dir()?;

    let path = if matches.is_present("git-dir") {
        repo.git_dir()
    } else {
        repo.work_dir()
    };

    writeln!(app, "{}", path.display())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;

    use crate::{temp_cwd::TempCwd, App};

    use tinygit_on_disk::TempRepo;

    #[test]
    #[serial]
    fn git_dir_from_nested_dir() {
        let tr = TempRepo::new();
        let nested = tr.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        let stdout = {
            let _cwd = TempCwd::new(&nested);
            App::run_with_args(vec!["rev-parse", "--git-dir"]).unwrap()
        };

        let top = tr.path().canonicalize().unwrap();
        let expected = format!("{}\n", top.join(".git").display());
        assert_eq!(stdout, expected.as_bytes());
    }

    #[test]
    #[serial]
    fn show_toplevel() {
        let tr = TempRepo::new();

        let stdout = {
            let _cwd = TempCwd::new(tr.path());
            App::run_with_args(vec!["rev-parse", "--show-toplevel"]).unwrap()
        };

        let top = tr.path().canonicalize().unwrap();
        assert_eq!(stdout, format!("{}\n", top.display()).as_bytes());
    }

    #[test]
    #[serial]
    fn error_outside_repo() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = {
            let _cwd = TempCwd::new(temp_dir.path());
            App::run_with_args(vec!["rev-parse", "--git-dir"]).unwrap_err()
        };

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("not a git repository"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    fn error_no_query() {
        let err = App::run_with_args(vec!["rev-parse"]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("required arguments were not provided"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
