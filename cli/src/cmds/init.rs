use std::{io::Write, path::Path};

use super::{App, Command, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit_on_disk::OnDisk;

pub(crate) fn command() -> Command {
    Command {
        name: "init",
        subcommand,
        run,
    }
}

fn subcommand() -> clap::App<'static, 'static> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("directory")
                .default_value(".")
                .help("Where to create the repository"),
        )
}

fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let dir = init_matches.value_of("directory").unwrap_or(".");

    let path = Path::new(dir);
    OnDisk::init(path)?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        path.display()
    )?;

    Ok(())
}
