#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

use tracing::Level;

mod app;
pub(crate) use app::App;

mod cmds;
mod find_repo;
#[cfg(test)]
mod temp_cwd;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
fn main() {
    // Keep main small; everything past argument parsing and logging setup
    // is reachable from tests through `App::run_with_args`.

    let registry = cmds::Registry::builtin();
    let arg_matches = app::clap_app(&registry).get_matches();

    init_tracing(arg_matches.is_present("verbose"));

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches,
        stdout: &mut stdout,
    };

    let r = app.run(&registry);

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
