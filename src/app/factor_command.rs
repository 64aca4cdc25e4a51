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

use anyhow::Result;
use satmul_app_helper::{info, App, AppSettings, ArgMatches, Command, SubCommand};
use satmul_logic::{default_sat_solver, FactoringOptions, FactoringProblem};
use std::io::Write;

pub(crate) struct FactorCommand;

const CMD_NAME: &str = "factor";

impl FactorCommand {
    pub fn new() -> Self {
        FactorCommand
    }

    fn execute_internal(
        &self,
        target: u64,
        options: FactoringOptions,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let mut problem = FactoringProblem::new(target, options)?;
        let mut solver = default_sat_solver();
        match problem.solve(solver.as_mut())? {
            Some((p, q)) => {
                info!("found a factorization of {}", target);
                writeln!(writer, "{} = {} * {}", target, p, q)?;
            }
            None => {
                info!("no factorization of {} was found", target);
                writeln!(
                    writer,
                    "{} has no factorization p * q with p >= q > 1 and {}-bit factors",
                    target,
                    problem.factor_width()
                )?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> Command<'a> for FactorCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Factorizes an integer with the CaDiCaL SAT solver.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_target().required(true))
            .arg(super::arg_width())
            .arg(super::arg_schoolbook())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let target = super::read_target(arg_matches)?;
        let options = super::read_factoring_options(arg_matches)?;
        self.execute_internal(target, options, &mut std::io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(target: u64, options: FactoringOptions) -> Result<String> {
        let mut output = Vec::new();
        FactorCommand::new().execute_internal(target, options, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_composite() {
        assert_eq!(
            "15 = 5 * 3\n",
            factor(15, FactoringOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_prime() {
        assert_eq!(
            "13 has no factorization p * q with p >= q > 1 and 4-bit factors\n",
            factor(13, FactoringOptions::default()).unwrap()
        );
    }

    #[test]
    fn test_schoolbook_with_width() {
        let options = FactoringOptions {
            karatsuba: false,
            factor_width: Some(8),
        };
        assert_eq!("35 = 7 * 5\n", factor(35, options).unwrap());
    }

    #[test]
    fn test_options_from_command_line() {
        let arg_matches = FactorCommand::new()
            .clap_subcommand()
            .get_matches_from_safe(vec![CMD_NAME, "-t", "21", "--schoolbook", "-w", "8"])
            .unwrap();
        assert_eq!(21, crate::app::read_target(&arg_matches).unwrap());
        assert_eq!(
            FactoringOptions {
                karatsuba: false,
                factor_width: Some(8),
            },
            crate::app::read_factoring_options(&arg_matches).unwrap()
        );
    }

    #[test]
    fn test_target_too_wide() {
        let options = FactoringOptions {
            karatsuba: true,
            factor_width: Some(2),
        };
        assert_eq!(
            "target 100 does not fit in the product of two 2-bit factors",
            factor(100, options).unwrap_err().to_string()
        );
    }
}
