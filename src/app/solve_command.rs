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
use satmul_logic::{default_sat_solver, ConsistencyCheckResult, DimacsReader, DimacsWriter};
use std::io::{Read, Write};

pub(crate) struct SolveCommand;

const CMD_NAME: &str = "solve";

impl SolveCommand {
    pub fn new() -> Self {
        SolveCommand
    }

    pub(crate) fn execute_internal(&self, input: &mut dyn Read, writer: &mut dyn Write) -> Result<()> {
        let instance = DimacsReader::default().read(input)?;
        info!(
            "instance has {} variable(s) and {} clause(s)",
            instance.n_vars(),
            instance.clauses().len()
        );
        let mut solver = default_sat_solver();
        instance
            .clauses()
            .iter()
            .for_each(|clause| solver.add_clause(clause));
        match solver.check_consistency()? {
            ConsistencyCheckResult::Sat(model) => {
                info!("the instance is satisfiable");
                writeln!(writer, "s SATISFIABLE")?;
                DimacsWriter::new().write_model(&model, writer)
            }
            ConsistencyCheckResult::Unsat => {
                info!("the instance is unsatisfiable");
                writeln!(writer, "s UNSATISFIABLE")?;
                writer.flush()?;
                Ok(())
            }
        }
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Solves a DIMACS CNF instance with the CaDiCaL SAT solver.")
            .setting(AppSettings::DisableVersion)
            .arg(super::arg_input())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mut input = super::create_input(super::input_path(arg_matches)?)?;
        self.execute_internal(&mut input, &mut std::io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn solve_file(content: &str) -> Result<String> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let mut input = super::super::create_input(&format!("{}", file.path().display()))?;
        let mut output = Vec::new();
        SolveCommand::new().execute_internal(&mut input, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_sat() {
        assert_eq!(
            "s SATISFIABLE\nv 1 -2 0\n",
            solve_file("p cnf 2 2\n1 0\n-2 0\n").unwrap()
        );
    }

    #[test]
    fn test_unsat() {
        assert_eq!(
            "s UNSATISFIABLE\n",
            solve_file("p cnf 1 2\n1 0\n-1 0\n").unwrap()
        );
    }

    #[test]
    fn test_malformed_input() {
        let error = solve_file("p cnf 1 1\n2 0\n").unwrap_err();
        let chain = error.chain().map(|e| e.to_string()).collect::<Vec<String>>();
        assert_eq!(
            vec![
                "while reading line 1",
                "literal 2 refers to an undeclared variable (the problem has 1)"
            ],
            chain
        );
    }

    #[test]
    fn test_missing_file() {
        let error = super::super::create_input("no/such/file.cnf").unwrap_err();
        assert_eq!(
            r#"while opening file "no/such/file.cnf""#,
            error.to_string()
        );
    }
}
