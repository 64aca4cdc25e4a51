// satmul_logic
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

use satmul_logic::{
    CadicalSatSolver, ConsistencyCheckResult, DimacsReader, DimacsWriter, FactoringOptions,
    FactoringProblem, Model, SatSolver,
};
use std::fs::File;
use tempfile::NamedTempFile;

fn write_problem(target: u64) -> (FactoringProblem, NamedTempFile) {
    let mut problem = FactoringProblem::new(target, FactoringOptions::default()).unwrap();
    let clauses = problem.encode().unwrap();
    let mut writer = DimacsWriter::new();
    problem
        .description()
        .iter()
        .for_each(|line| writer.add_comment(line));
    let file = NamedTempFile::new().unwrap();
    writer
        .write(problem.n_vars(), &clauses, &mut file.reopen().unwrap())
        .unwrap();
    (problem, file)
}

fn solve_file(file: &NamedTempFile) -> ConsistencyCheckResult {
    let mut input = File::open(file.path()).unwrap();
    let instance = DimacsReader::default().read(&mut input).unwrap();
    let mut solver = CadicalSatSolver::new();
    instance
        .clauses()
        .iter()
        .for_each(|clause| solver.add_clause(clause));
    solver.check_consistency().unwrap()
}

#[test]
fn test_factor_through_file() {
    let (problem, file) = write_problem(21);
    let model: Model = match solve_file(&file) {
        ConsistencyCheckResult::Sat(model) => model,
        _ => panic!(), // kcov-ignore
    };
    assert_eq!((7, 3), problem.decode(&model).unwrap());
}

#[test]
fn test_prime_through_file() {
    let (_, file) = write_problem(23);
    assert_eq!(ConsistencyCheckResult::Unsat, solve_file(&file));
}

#[test]
fn test_header_counts() {
    let (problem, file) = write_problem(15);
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert!(content.starts_with("c factorization of 15 = p * q with p >= q > 1\n"));
    let instance = DimacsReader::default()
        .read(&mut content.as_bytes())
        .unwrap();
    assert_eq!(problem.n_vars(), instance.n_vars());
}
