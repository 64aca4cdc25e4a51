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

use super::sat_solver::MAYBE_TIMEOUT_MSG;
use crate::{ConsistencyCheckResult, Literal, Model, SatSolver};
use anyhow::{anyhow, Context, Result};
use cadical::{Callbacks, Solver};

struct CadicalCallbacks;

impl Callbacks for CadicalCallbacks {}

/// The CaDiCaL SAT solver.
///
/// CaDiCaL is an efficient SAT solver written in C++.
/// It won first place in the SAT track of the SAT Race 2019 and second overall place.
pub struct CadicalSatSolver {
    solver: Solver<CadicalCallbacks>,
}

impl CadicalSatSolver {
    /// Builds a new instance of the CaDiCaL SAT solver.
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
        }
    }
}

impl Default for CadicalSatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CadicalSatSolver {
    fn add_clause(&mut self, clause: &[Literal]) {
        self.solver.add_clause(clause.iter().map(Literal::to_dimacs))
    }

    fn n_vars(&self) -> usize {
        self.solver.max_variable() as usize
    }

    fn check_consistency_with(
        &mut self,
        assumptions: &[Literal],
    ) -> Result<ConsistencyCheckResult> {
        let cadical_assumptions = assumptions.iter().map(Literal::to_dimacs);
        match self.solver.solve_with(cadical_assumptions) {
            Some(true) => Ok(ConsistencyCheckResult::Sat(build_model(&self.solver))),
            Some(false) => Ok(ConsistencyCheckResult::Unsat),
            // kcov-ignore-start
            None => Err(anyhow!(MAYBE_TIMEOUT_MSG))
                .context("while checking consistency with the CaDiCaL SAT solver"),
            // kcov-ignore-end
        }
    }
}

fn build_model<T>(solver: &Solver<T>) -> Model
where
    T: Callbacks,
{
    Model::new(
        (1..=solver.max_variable())
            .map(|i| {
                let literal = Literal::new((i as usize).into(), true);
                match solver.value(i) {
                    Some(true) => literal,
                    Some(false) | None => literal.negate(),
                }
            })
            .collect(),
    )
}
