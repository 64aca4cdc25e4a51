// factor2sat
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

mod encode_command;
pub(crate) use encode_command::EncodeCommand;

mod factor_command;
pub(crate) use factor_command::FactorCommand;

mod solve_command;
pub(crate) use solve_command::SolveCommand;

use anyhow::{anyhow, Context, Result};
use satmul_app_helper::{info, Arg, ArgMatches};
use satmul_logic::FactoringOptions;
use std::str::FromStr;
use std::{fs, fs::File, io::Write, path::PathBuf};

const ARG_INPUT: &str = "INPUT";
const ARG_OUTPUT: &str = "OUTPUT";
const ARG_TARGET: &str = "TARGET";
const ARG_WIDTH: &str = "WIDTH";
const ARG_SCHOOLBOOK: &str = "SCHOOLBOOK";

pub(crate) fn arg_input<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_INPUT)
        .long("input")
        .short("i")
        .takes_value(true)
        .help("sets the DIMACS input file")
        .required(true)
}

pub(crate) fn input_path<'a>(arg_matches: &'a ArgMatches<'_>) -> Result<&'a str> {
    required_value(arg_matches, ARG_INPUT)
}

pub(crate) fn create_input(file_path: &str) -> Result<File> {
    info!("reading input file {}", canonicalize(file_path));
    File::open(file_path).with_context(|| format!(r#"while opening file "{}""#, file_path))
}

pub(crate) fn arg_output<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_OUTPUT)
        .long("output")
        .short("o")
        .takes_value(true)
        .help("sets the DIMACS output file")
}

pub(crate) fn create_output(arg_matches: &ArgMatches<'_>) -> Result<Box<dyn Write>> {
    Ok(match arg_matches.value_of(ARG_OUTPUT) {
        Some(o) => {
            let r = Box::new(
                File::create(o).with_context(|| format!(r#"while creating file "{}""#, o))?,
            );
            info!("setting output file to {}", canonicalize(o));
            r
        }
        None => {
            info!("setting output to STDOUT");
            Box::new(std::io::stdout())
        }
    })
}

pub(crate) fn arg_target<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_TARGET)
        .long("target")
        .short("t")
        .takes_value(true)
        .help("sets the integer to factorize")
}

pub(crate) fn read_target(arg_matches: &ArgMatches<'_>) -> Result<u64> {
    parse_integer("target", required_value(arg_matches, ARG_TARGET)?)
}

pub(crate) fn arg_width<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_WIDTH)
        .long("width")
        .short("w")
        .takes_value(true)
        .help("sets the width of the factors (a power of two; derived from the target if absent)")
}

pub(crate) fn arg_schoolbook<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_SCHOOLBOOK)
        .long("schoolbook")
        .help("uses the shift-and-add multiplier instead of the Karatsuba one")
}

pub(crate) fn read_factoring_options(arg_matches: &ArgMatches<'_>) -> Result<FactoringOptions> {
    let factor_width = match arg_matches.value_of(ARG_WIDTH) {
        Some(w) => Some(parse_integer("width", w)?),
        None => None,
    };
    Ok(FactoringOptions {
        karatsuba: !arg_matches.is_present(ARG_SCHOOLBOOK),
        factor_width,
    })
}

pub(crate) fn parse_integer<T>(what: &str, value: &str) -> Result<T>
where
    T: FromStr,
{
    value
        .parse::<T>()
        .map_err(|_| anyhow!(r#"invalid {} "{}": expected a non-negative integer"#, what, value))
}

fn required_value<'a>(arg_matches: &'a ArgMatches<'_>, name: &str) -> Result<&'a str> {
    arg_matches
        .value_of(name)
        .ok_or_else(|| anyhow!("missing value for {}", name))
}

pub(crate) fn canonicalize(file_path: &str) -> String {
    match fs::canonicalize(&PathBuf::from(file_path)) {
        Ok(p) => format!("{}", p.display()),
        Err(_) => file_path.to_string(),
    }
}
