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

use crate::{
    bits_required, power_of_two, BitVector, ClauseSet, ConsistencyCheckResult, EncodingError,
    EncodingResult, Formula, Model, Registry, SatSolver, TseitinEncoder, VarId,
};
use anyhow::Result;
use log::info;

/// The options used to build a [`FactoringProblem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactoringOptions {
    /// Use the Karatsuba multiplier (`true`) or the shift-and-add one (`false`).
    pub karatsuba: bool,
    /// The width of the factors; if `None`, the smallest suitable power of two is used.
    pub factor_width: Option<usize>,
}

impl Default for FactoringOptions {
    fn default() -> Self {
        FactoringOptions {
            karatsuba: true,
            factor_width: None,
        }
    }
}

/// The problem of finding two non-trivial factors of an integer.
///
/// The factors `p` and `q` are encoded by the free variables of the problem:
/// `p` by the variables `1..=w`, `q` by the variables `w+1..=2w`, least significant bits first,
/// where `w` is the factor width.
/// The constraints state that `p * q` is the target, that `p` and `q` are non-negative
/// two's complement integers greater than 1, and that `p >= q`.
///
/// # Examples
///
/// ```
/// use satmul_logic::{CadicalSatSolver, FactoringOptions, FactoringProblem};
///
/// let mut problem = FactoringProblem::new(15, FactoringOptions::default()).unwrap();
/// assert_eq!(4, problem.factor_width());
/// let mut solver = CadicalSatSolver::new();
/// assert_eq!(Some((5, 3)), problem.solve(&mut solver).unwrap());
/// ```
pub struct FactoringProblem {
    target: u64,
    factor_width: usize,
    registry: Registry,
    p: BitVector,
    q: BitVector,
    constraint: Formula,
}

impl FactoringProblem {
    /// Builds the factoring problem of an integer.
    ///
    /// Unless the options set it, the factor width is the smallest power of two
    /// able to hold `target / 2` with an additional sign bit.
    pub fn new(target: u64, options: FactoringOptions) -> EncodingResult<Self> {
        let width = options
            .factor_width
            .unwrap_or_else(|| power_of_two(bits_required(target / 2) + 1));
        FactoringProblem::build(target, width, options.karatsuba)
    }

    /// Builds the factoring problem of the product of two integers.
    ///
    /// Unless the options set it, the factor width is the smallest power of two
    /// able to hold both factors with an additional sign bit.
    pub fn from_factors(p: u64, q: u64, options: FactoringOptions) -> EncodingResult<Self> {
        let target = p
            .checked_mul(q)
            .ok_or(EncodingError::ProductOverflow { p, q })?;
        let width = options.factor_width.unwrap_or_else(|| {
            power_of_two(std::cmp::max(bits_required(p), bits_required(q)) + 1)
        });
        FactoringProblem::build(target, width, options.karatsuba)
    }

    fn build(target: u64, width: usize, karatsuba: bool) -> EncodingResult<Self> {
        if !width.is_power_of_two() {
            return Err(EncodingError::NotPowerOfTwo { width });
        }
        if bits_required(target) > 2 * width {
            return Err(EncodingError::TargetTooWide {
                target,
                factor_width: width,
            });
        }
        info!(
            "building the factoring problem of {} with {}-bit factors ({} multiplier)",
            target,
            width,
            if karatsuba { "Karatsuba" } else { "shift-and-add" }
        );
        let mut registry = Registry::new(2 * width);
        let p = BitVector::from_vars((1..=width).map(VarId::from));
        let q = BitVector::from_vars((width + 1..=2 * width).map(VarId::from));
        let product = p.product_with(&q, &mut registry, karatsuba)?;
        let difference = p.sum_with(&q.negation(&mut registry), &mut registry)?;
        let constraint = Formula::and(vec![
            product.equals_value(target),
            !p.bits()[width - 1].clone(),
            !q.bits()[width - 1].clone(),
            p.right_shifted(1).is_nonzero(&mut registry),
            q.right_shifted(1).is_nonzero(&mut registry),
            !difference.bits()[width - 1].clone(),
        ]);
        info!(
            "the circuits involve {} gate(s) over {} free variable(s)",
            registry.n_gates(),
            registry.n_free_vars()
        );
        Ok(FactoringProblem {
            target,
            factor_width: width,
            registry,
            p,
            q,
            constraint,
        })
    }

    /// Returns the integer to factorize.
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Returns the width of the factors.
    pub fn factor_width(&self) -> usize {
        self.factor_width
    }

    /// Returns the integer encoding the first factor.
    pub fn p(&self) -> &BitVector {
        &self.p
    }

    /// Returns the integer encoding the second factor.
    pub fn q(&self) -> &BitVector {
        &self.q
    }

    /// Returns the constraint to satisfy.
    pub fn constraint(&self) -> &Formula {
        &self.constraint
    }

    /// Returns the registry holding the variables of the problem.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a mutable reference to the registry holding the variables of the problem.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Returns the number of variables allocated so far.
    pub fn n_vars(&self) -> usize {
        self.registry.n_vars()
    }

    /// Returns a textual description of the problem, suitable for DIMACS comments.
    pub fn description(&self) -> Vec<String> {
        let w = self.factor_width;
        vec![
            format!("factorization of {} = p * q with p >= q > 1", self.target),
            format!("p: variables 1 to {} (least significant bit first)", w),
            format!("q: variables {} to {} (least significant bit first)", w + 1, 2 * w),
        ]
    }

    /// Encodes the problem into clauses.
    ///
    /// An [`UnsatisfiableTarget`](EncodingError::UnsatisfiableTarget) error is returned
    /// if the constraints are trivially inconsistent.
    pub fn encode(&mut self) -> EncodingResult<ClauseSet> {
        let clauses = TseitinEncoder::encode(&mut self.registry, &self.constraint)?;
        info!(
            "encoded into {} clause(s) over {} variable(s)",
            clauses.len(),
            self.registry.n_vars()
        );
        Ok(clauses)
    }

    /// Returns the factors `(p, q)` encoded by a model.
    pub fn decode(&self, model: &Model) -> EncodingResult<(u64, u64)> {
        Ok((self.p.decode(model)?, self.q.decode(model)?))
    }

    /// Encodes the problem, adds the clauses to the solver and looks for a model.
    ///
    /// Returns the factors `(p, q)` if some exist, or `None` if there are none.
    pub fn solve(&mut self, solver: &mut dyn SatSolver) -> Result<Option<(u64, u64)>> {
        let clauses = match self.encode() {
            Ok(clauses) => clauses,
            Err(EncodingError::UnsatisfiableTarget) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        solver.add_clause_set(&clauses);
        match solver.check_consistency()? {
            ConsistencyCheckResult::Sat(model) => Ok(Some(self.decode(&model)?)),
            ConsistencyCheckResult::Unsat => Ok(None),
        }
    }
}
