use std::io::Write;

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds::Registry, Result};

use clap::{crate_version, AppSettings, Arg, ArgMatches};

pub(crate) fn clap_app(registry: &Registry) -> clap::App<'static, 'static> {
    let app = clap::App::new("tinygit")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log progress to stderr"),
        );

    registry.add_subcommands(app)
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self, registry: &Registry) -> Result<()> {
        registry.dispatch(self)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("tinygit"));

        let registry = Registry::builtin();
        let mut stdout = Vec::new();

        App {
            arg_matches: clap_app(&registry).get_matches_from_safe(args)?,
            stdout: &mut stdout,
        }
        .run(&registry)?;

        Ok(stdout)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
