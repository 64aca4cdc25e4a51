// satmul_app_helper
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! A small framework for command line applications made of subcommands.
//!
//! Each subcommand implements [`Command`]; the [`AppHelper`] builds the `clap` application,
//! sets up the logger and dispatches the execution to the selected subcommand.

use anyhow::{anyhow, Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use std::ffi::OsString;
use std::str::FromStr;

pub use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
pub use log::{debug, error, info, trace, warn, Level, LevelFilter};

/// A subcommand of an application.
pub trait Command<'a> {
    /// The name of the subcommand, as typed on the command line.
    fn name(&self) -> &str;

    /// The `clap` description of the subcommand and its arguments.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the subcommand.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

const LOGGING_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// The entry point of applications made of [`Command`]s.
pub struct AppHelper<'a> {
    app_name: &'a str,
    version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> AppHelper<'a> {
    pub fn new(app_name: &'a str, version: &'a str, authors: &'a str, about: &'a str) -> Self {
        AppHelper {
            app_name,
            version,
            authors,
            about,
            commands: vec![],
        }
    }

    /// Registers a subcommand.
    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    fn build_cli(&self) -> App<'a, 'a> {
        App::new(self.app_name)
            .version(self.version)
            .author(self.authors)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .global_setting(AppSettings::VersionlessSubcommands)
            .arg(
                Arg::with_name(ARG_LOGGING_LEVEL)
                    .long("logging-level")
                    .takes_value(true)
                    .possible_values(LOGGING_LEVELS)
                    .default_value("info")
                    .global(true)
                    .help("sets the minimal level of the log messages"),
            )
            .subcommands(self.commands.iter().map(|c| c.clap_subcommand()))
    }

    /// Parses the command line, initializes the logger and executes the selected subcommand.
    ///
    /// Errors are logged and make the process exit with status 1.
    pub fn launch_app(&self) {
        let arg_matches = self.build_cli().get_matches();
        if let Err(e) = init_logger(logging_level(&arg_matches)) {
            eprintln!("{:?}", e);
            std::process::exit(1);
        }
        info!("{} {}", self.app_name, self.version);
        if let Err(e) = self.execute_matches(&arg_matches) {
            e.chain().for_each(|c| error!("{}", c));
            std::process::exit(1);
        }
    }

    /// Parses the given arguments and executes the selected subcommand, without touching the logger.
    ///
    /// The first argument is the name of the program.
    pub fn run_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let arg_matches = self
            .build_cli()
            .get_matches_from_safe(args)
            .map_err(|e| anyhow!("{}", e.message))?;
        self.execute_matches(&arg_matches)
    }

    fn execute_matches(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let (name, sub_matches) = arg_matches.subcommand();
        let command = self
            .commands
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| anyhow!("no such command: {}", name))?;
        let empty = ArgMatches::default();
        command
            .execute(sub_matches.unwrap_or(&empty))
            .with_context(|| format!(r#"while executing command "{}""#, name))
    }
}

fn logging_level(arg_matches: &ArgMatches<'_>) -> LevelFilter {
    let from_sub = arg_matches
        .subcommand()
        .1
        .and_then(|m| m.value_of(ARG_LOGGING_LEVEL));
    from_sub
        .or_else(|| arg_matches.value_of(ARG_LOGGING_LEVEL))
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::Info)
}

fn init_logger(level: LevelFilter) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("while initializing the logger")
}
