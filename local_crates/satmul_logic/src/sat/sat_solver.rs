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

use crate::{CadicalSatSolver, ClauseSet, Literal, VarId};
use anyhow::Result;

/// The error message included in errors thrown because of a SAT solver invocation resulting in an error.
pub const MAYBE_TIMEOUT_MSG: &str = "the SAT solver did not reply (maybe a timeout was reached ?)";

/// A model returned by a SAT solver: one literal per variable, sorted by variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model(Vec<Literal>);

impl Model {
    /// Builds a model from a vector of literals.
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        Model(literals)
    }

    /// Returns the value of a variable in this model, if it has one.
    pub fn value_of(&self, var: VarId) -> Option<bool> {
        self.0
            .binary_search_by_key(&var, Literal::var_id)
            .ok()
            .map(|i| self.0[i].polarity())
    }

    /// Returns the literals of the model.
    pub fn as_literals(&self) -> &[Literal] {
        &self.0
    }
}

/// An enum used to handle the return of a consistency check algorithm.
#[derive(Debug, Eq, PartialEq)]
pub enum ConsistencyCheckResult {
    /// A model was found
    Sat(Model),
    /// Unsatisfiability was proved
    Unsat,
}

/// A `SatSolver` is used to look for models in sets of clauses.
///
/// # Examples
///
/// ```
/// use satmul_logic::{default_sat_solver, ConsistencyCheckResult, Literal, SatSolver};
///
/// let mut solver = default_sat_solver();
/// solver.add_clause(&[Literal::from((1, false)), Literal::from((2, true))]);
/// solver.add_clause(&[Literal::from((1, true)), Literal::from((2, false))]);
/// match solver.check_consistency().unwrap() {
///     ConsistencyCheckResult::Sat(model) => println!("{:?} is a model", model),
///     ConsistencyCheckResult::Unsat => println!("no model"),
/// }
/// ```
pub trait SatSolver {
    /// Adds a clause, given by its literals, to the problem considered by the solver.
    fn add_clause(&mut self, clause: &[Literal]);

    /// Adds all the clauses of a [`ClauseSet`].
    fn add_clause_set(&mut self, clauses: &ClauseSet) {
        clauses
            .iter()
            .for_each(|c| self.add_clause(c.as_literals()));
    }

    /// Returns the number of variables taken into consideration by the solver.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{default_sat_solver, Literal, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// assert_eq!(0, solver.n_vars());
    /// solver.add_clause(&[Literal::from((1, false)), Literal::from((2, true))]);
    /// assert_eq!(2, solver.n_vars());
    /// ```
    fn n_vars(&self) -> usize;

    /// Checks if the underlying problem has a model.
    ///
    /// If a model is found, it is returned through the [`ConsistencyCheckResult`] object.
    /// A SAT solver may not manage to decide the satisfiability of the formula (e.g. if a timeout is reached);
    /// in this case, an error is returned, and its message is [`MAYBE_TIMEOUT_MSG`].
    fn check_consistency(&mut self) -> Result<ConsistencyCheckResult> {
        self.check_consistency_with(&[])
    }

    /// Checks if the underlying problem, conditioned by a set of literals, has a model.
    ///
    /// The problem itself is not altered by this function.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{default_sat_solver, ConsistencyCheckResult, Literal, SatSolver};
    ///
    /// let mut solver = default_sat_solver();
    /// solver.add_clause(&[Literal::from((1, false)), Literal::from((2, false))]);
    /// solver.add_clause(&[Literal::from((1, true)), Literal::from((2, true))]);
    /// assert!(matches!(
    ///     solver.check_consistency_with(&[(1, true).into()]).unwrap(),
    ///     ConsistencyCheckResult::Sat(_)
    /// ));
    /// assert!(matches!(
    ///     solver.check_consistency_with(&[(1, true).into(), (2, true).into()]).unwrap(),
    ///     ConsistencyCheckResult::Unsat
    /// ));
    /// ```
    fn check_consistency_with(&mut self, assumptions: &[Literal])
        -> Result<ConsistencyCheckResult>;
}

/// Returns the default SAT solver.
///
/// The default SAT solver is currently the [`CadicalSatSolver`].
pub fn default_sat_solver() -> Box<dyn SatSolver> {
    Box::new(CadicalSatSolver::new())
}
