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

use anyhow::{anyhow, Context, Result};
use satmul_app_helper::{info, App, AppSettings, Arg, ArgMatches, Command, SubCommand};
use satmul_logic::{DimacsWriter, FactoringProblem};
use std::io::Write;

pub(crate) struct EncodeCommand;

const CMD_NAME: &str = "encode";

const ARG_FACTORS: &str = "FACTORS";

impl EncodeCommand {
    pub fn new() -> Self {
        EncodeCommand
    }

    fn build_problem(&self, arg_matches: &ArgMatches<'_>) -> Result<FactoringProblem> {
        let options = super::read_factoring_options(arg_matches)?;
        let problem = match arg_matches.values_of(ARG_FACTORS) {
            Some(values) => {
                let factors = values
                    .map(|v| super::parse_integer::<u64>("factor", v))
                    .collect::<Result<Vec<u64>>>()?;
                match factors.as_slice() {
                    [p, q] => FactoringProblem::from_factors(*p, *q, options)?,
                    _ => return Err(anyhow!("expected exactly two factors")),
                }
            }
            None => FactoringProblem::new(super::read_target(arg_matches)?, options)?,
        };
        Ok(problem)
    }

    fn execute_internal(&self, mut problem: FactoringProblem, writer: &mut dyn Write) -> Result<()> {
        let clauses = problem
            .encode()
            .with_context(|| format!("while encoding the factorization of {}", problem.target()))?;
        info!(
            "writing {} variable(s) and {} clause(s)",
            problem.n_vars(),
            clauses.len()
        );
        let mut dimacs_writer = DimacsWriter::new();
        problem
            .description()
            .iter()
            .for_each(|line| dimacs_writer.add_comment(line));
        dimacs_writer.write(problem.n_vars(), &clauses, writer)
    }
}

impl<'a> Command<'a> for EncodeCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Encodes the factorization of an integer into a DIMACS CNF instance.")
            .setting(AppSettings::DisableVersion)
            .arg(
                super::arg_target()
                    .required_unless(ARG_FACTORS)
                    .conflicts_with(ARG_FACTORS),
            )
            .arg(
                Arg::with_name(ARG_FACTORS)
                    .long("factors")
                    .short("f")
                    .takes_value(true)
                    .number_of_values(2)
                    .value_names(&["P", "Q"])
                    .help("sets the integer to factorize as the product of two integers"),
            )
            .arg(super::arg_width())
            .arg(super::arg_schoolbook())
            .arg(super::arg_output())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let problem = self.build_problem(arg_matches)?;
        self.execute_internal(problem, super::create_output(arg_matches)?.as_mut())
    }
}
