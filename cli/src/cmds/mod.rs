use clap::ArgMatches;

use crate::{App, Result};

mod init;
mod rev_parse;

/// One subcommand: how to describe it to clap and how to run it.
pub(crate) struct Command {
    pub name: &'static str,
    pub subcommand: fn() -> clap::App<'static, 'static>,
    pub run: fn(&mut App, &ArgMatches) -> Result<()>,
}

/// The set of subcommands the binary understands.
///
/// The registry is built once in `main` (or by a test) and handed to both
/// the clap app builder and `dispatch`, so the two can't disagree.
pub(crate) struct Registry {
    commands: Vec<Command>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry { commands: vec![] }
    }

    pub fn builtin() -> Registry {
        Registry::new()
            .register(init::command())
            .register(rev_parse::command())
    }

    pub fn register(mut self, command: Command) -> Registry {
        self.commands.push(command);
        self
    }

    pub fn add_subcommands(&self, app: clap::App<'static, 'static>) -> clap::App<'static, 'static> {
        self.commands
            .iter()
            .fold(app, |app, command| app.subcommand((command.subcommand)()))
    }

    pub fn dispatch(&self, app: &mut App) -> Result<()> {
        let matches = app.arg_matches.clone();
        // ^^ Ugh. Need an independent copy of matches so we can still pass
        // the App struct through to subcommand imps.

        if let (name, Some(m)) = matches.subcommand() {
            if let Some(command) = self.commands.iter().find(|c| c.name == name) {
                return (command.run)(app, m);
            }
        }

        // unreachable: Should have exited out with appropriate help or
        // error message if no registered subcommand was given.
        unreachable!()
    }
}
