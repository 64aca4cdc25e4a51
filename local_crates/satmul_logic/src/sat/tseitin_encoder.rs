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
    ClauseSet, EncodingError, EncodingResult, Formula, Literal, Negation, Registry,
    Simplification, VarId,
};
use log::{debug, warn};
use rustc_hash::FxHashSet;

/// The maximal number of operands of a gate expanded into equivalence clauses.
pub const MAX_EXPANDED_ARITY: usize = 24;

/// A structure used to translate [`Formula`]s into equisatisfiable sets of clauses.
///
/// The literals standing for sub-formulas (the gates allocated by the [`Registry`])
/// are used as Tseitin variables: each gate reached by the encoding is expanded once
/// into the clauses of the equivalence between its literal and the formula it stands for.
///
/// An assignment of the free variables satisfies the encoded formula
/// iff it can be extended to the gate variables so that all the clauses are satisfied.
///
/// # Examples
///
/// ```
/// use satmul_logic::{Formula, Literal, Registry, TseitinEncoder};
///
/// let mut registry = Registry::new(2);
/// let x1 = Formula::from(Literal::from((1, true)));
/// let x2 = Formula::from(Literal::from((2, true)));
/// let clauses = TseitinEncoder::encode(&mut registry, &Formula::xor(x1, x2)).unwrap();
/// // one gate for each conjunction of the exclusive or
/// assert_eq!(4, registry.n_vars());
/// // the top-level disjunction, then 4 equivalence clauses per gate
/// assert_eq!(9, clauses.len());
/// ```
pub struct TseitinEncoder<'a> {
    registry: &'a mut Registry,
    expanded: FxHashSet<VarId>,
    pending: Vec<Literal>,
    clauses: ClauseSet,
}

impl<'a> TseitinEncoder<'a> {
    /// Creates an encoder which adds its gates to the provided registry.
    pub fn new(registry: &'a mut Registry) -> Self {
        TseitinEncoder {
            registry,
            expanded: FxHashSet::default(),
            pending: Vec::new(),
            clauses: ClauseSet::default(),
        }
    }

    /// Encodes a single formula.
    ///
    /// See [`add_formula`](Self::add_formula) for the possible errors.
    pub fn encode(registry: &mut Registry, formula: &Formula) -> EncodingResult<ClauseSet> {
        let mut encoder = TseitinEncoder::new(registry);
        encoder.add_formula(formula)?;
        Ok(encoder.into_clause_set())
    }

    /// Adds the clauses required to enforce a formula.
    ///
    /// Gates already expanded by this encoder are not expanded again.
    ///
    /// An error is returned if the formula simplifies to `false`,
    /// if a gate literal has no definition for itself nor its negation,
    /// or if a gate has more than [`MAX_EXPANDED_ARITY`] operands.
    pub fn add_formula(&mut self, formula: &Formula) -> EncodingResult<()> {
        match formula.simplify(self.registry) {
            Formula::Constant(true) => {
                warn!("the formula to encode simplifies to true; no clause is added");
            }
            Formula::Constant(false) => return Err(EncodingError::UnsatisfiableTarget),
            Formula::Lit(l) => {
                self.require(l);
                self.clauses.insert(vec![l]);
            }
            Formula::And(operands) => {
                for l in literals_of(&operands) {
                    self.require(l);
                    self.clauses.insert(vec![l]);
                }
            }
            Formula::Or(operands) => {
                let lits = literals_of(&operands);
                lits.iter().for_each(|l| self.require(*l));
                self.clauses.insert(lits);
            }
            Formula::Not(_) => unreachable!(),
        }
        self.expand_pending()
    }

    /// Returns the clauses produced so far.
    pub fn clause_set(&self) -> &ClauseSet {
        &self.clauses
    }

    /// Consumes the encoder, returning the clauses it produced.
    pub fn into_clause_set(self) -> ClauseSet {
        self.clauses
    }

    fn is_atom(&self, literal: Literal) -> bool {
        let var = literal.var_id();
        self.registry.is_free(var) || self.expanded.contains(&var)
    }

    // Gates are marked as expanded when they are scheduled.
    fn require(&mut self, literal: Literal) {
        if !self.is_atom(literal) {
            self.expanded.insert(literal.var_id());
            self.pending.push(literal);
        }
    }

    fn expand_pending(&mut self) -> EncodingResult<()> {
        while let Some(gate) = self.pending.pop() {
            match self.expansion_for(gate)? {
                Formula::And(operands) => self.add_and_equivalence(gate, &literals_of(&operands))?,
                Formula::Or(operands) => self.add_or_equivalence(gate, &literals_of(&operands))?,
                Formula::Lit(l) => {
                    debug!("adding equivalence {} <=> {}", gate, l);
                    self.require(l);
                    self.clauses.insert(vec![gate.negate(), l]);
                    self.clauses.insert(vec![gate, l.negate()]);
                }
                Formula::Constant(b) => {
                    debug!("adding equivalence {} <=> {}", gate, b);
                    self.clauses
                        .insert(vec![if b { gate } else { gate.negate() }]);
                }
                Formula::Not(_) => unreachable!(),
            }
        }
        Ok(())
    }

    // Returns the simplified formula a gate literal stands for,
    // deriving it from the definition of the opposite literal if needed.
    fn expansion_for(&mut self, gate: Literal) -> EncodingResult<Formula> {
        if let Some(definition) = self.registry.definition(gate).cloned() {
            return Ok(match definition.as_literal_junction() {
                Some(_) => definition,
                None => definition.simplify(self.registry),
            });
        }
        match self.registry.definition(gate.negate()).cloned() {
            Some(definition) => {
                let derived = definition.negate(self.registry);
                self.registry.record_definition(gate, derived.clone());
                Ok(derived)
            }
            None => Err(EncodingError::UndefinedLiteral { literal: gate }),
        }
    }

    fn add_and_equivalence(&mut self, gate: Literal, operands: &[Literal]) -> EncodingResult<()> {
        debug!("adding AND equivalence {} <=> {}", gate, junction_display("and", operands));
        let mut clause = operands.iter().map(Literal::negate).collect::<Vec<Literal>>();
        clause.push(gate);
        self.add_dependencies(&clause);
        self.add_implication_clauses(gate.negate(), operands, true)
    }

    fn add_or_equivalence(&mut self, gate: Literal, operands: &[Literal]) -> EncodingResult<()> {
        debug!("adding OR equivalence {} <=> {}", gate, junction_display("or", operands));
        let mut clause = operands.to_vec();
        clause.push(gate.negate());
        self.add_dependencies(&clause);
        self.add_implication_clauses(gate, operands, false)
    }

    fn add_dependencies(&mut self, clause: &[Literal]) {
        clause.iter().for_each(|l| self.require(*l));
        self.clauses.insert(clause.to_vec());
    }

    // Adds one clause per non-empty subset of the operands:
    // the clause contains the head literal, the operands of the subset with the polarity `kept`
    // and the other operands with the opposite polarity.
    // For conjunctions these clauses state that the gate implies all its operands,
    // for disjunctions that the gate is implied by each operand.
    fn add_implication_clauses(
        &mut self,
        head: Literal,
        operands: &[Literal],
        kept: bool,
    ) -> EncodingResult<()> {
        let n = operands.len();
        if n > MAX_EXPANDED_ARITY {
            return Err(EncodingError::GateTooWide {
                literal: if kept { head.negate() } else { head },
                arity: n,
                max: MAX_EXPANDED_ARITY,
            });
        }
        if n > 2 {
            warn!(
                "expanding a gate with {} operands into {} clauses",
                n,
                (1usize << n) - 1
            );
        }
        for subset in 1..(1usize << n) {
            let mut clause = Vec::with_capacity(n + 1);
            clause.push(head);
            for (i, op) in operands.iter().enumerate() {
                let in_subset = subset & (1 << i) != 0;
                clause.push(if in_subset == kept { *op } else { op.negate() });
            }
            self.clauses.insert(clause);
        }
        Ok(())
    }
}

fn literals_of(operands: &[Formula]) -> Vec<Literal> {
    operands.iter().filter_map(Formula::as_literal).collect()
}

fn junction_display(name: &str, operands: &[Literal]) -> String {
    let strs = operands.iter().map(|l| l.to_string()).collect::<Vec<String>>();
    format!("{}({})", name, strs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Evaluation;

    fn lit(i: i32) -> Formula {
        Formula::Lit(Literal::from_dimacs(i).unwrap())
    }

    fn clause_strs(clauses: &ClauseSet) -> Vec<Vec<i32>> {
        clauses.iter().map(|c| c.to_dimacs()).collect()
    }

    // Checks, for each assignment of the free variables, that the formula holds
    // iff some assignment of the gate variables satisfies the clauses.
    fn assert_equisatisfiable(n_free: usize, formula: Formula) {
        let mut registry = Registry::new(n_free);
        let clauses = TseitinEncoder::encode(&mut registry, &formula).unwrap();
        let n_vars = registry.n_vars();
        assert!(n_vars - n_free <= 16, "too many gates for a brute force check");
        for free_values in 0..(1usize << n_free) {
            registry.clear_values();
            for i in 0..n_free {
                registry.assign((i + 1).into(), free_values & (1 << i) != 0);
            }
            let expected = formula.evaluate(&mut registry).unwrap();
            let actual = (0..(1usize << (n_vars - n_free))).any(|gate_values| {
                clauses.is_satisfied_by(|v| {
                    let index = usize::from(v) - 1;
                    if index < n_free {
                        free_values & (1 << index) != 0
                    } else {
                        gate_values & (1 << (index - n_free)) != 0
                    }
                })
            });
            assert_eq!(
                expected, actual,
                "wrong encoding of {} for assignment {:b}",
                formula, free_values
            );
        }
    }

    #[test]
    fn test_and_of_literals() {
        let mut registry = Registry::new(2);
        let clauses =
            TseitinEncoder::encode(&mut registry, &Formula::and(vec![lit(1), lit(-2)])).unwrap();
        assert_eq!(vec![vec![1], vec![-2]], clause_strs(&clauses));
        assert_eq!(2, registry.n_vars());
    }

    #[test]
    fn test_or_of_literals() {
        let mut registry = Registry::new(3);
        let clauses =
            TseitinEncoder::encode(&mut registry, &Formula::or(vec![lit(3), lit(-1), lit(2)]))
                .unwrap();
        assert_eq!(vec![vec![-1, 2, 3]], clause_strs(&clauses));
    }

    #[test]
    fn test_single_literal() {
        let mut registry = Registry::new(1);
        let clauses = TseitinEncoder::encode(&mut registry, &lit(-1)).unwrap();
        assert_eq!(vec![vec![-1]], clause_strs(&clauses));
    }

    #[test]
    fn test_gate_literal() {
        let mut registry = Registry::new(2);
        let g = Formula::and(vec![lit(1), lit(2)]).simplify_to_literal(&mut registry);
        let clauses = TseitinEncoder::encode(&mut registry, &g).unwrap();
        assert_eq!(
            vec![
                vec![3],
                vec![-1, -2, 3],
                vec![1, -2, -3],
                vec![-1, 2, -3],
                vec![1, 2, -3]
            ],
            clause_strs(&clauses)
        );
    }

    #[test]
    fn test_true_target() {
        let mut registry = Registry::new(1);
        let clauses =
            TseitinEncoder::encode(&mut registry, &Formula::or(vec![lit(1), lit(-1)])).unwrap();
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_false_target() {
        let mut registry = Registry::new(1);
        assert_eq!(
            EncodingError::UnsatisfiableTarget,
            TseitinEncoder::encode(&mut registry, &Formula::and(vec![lit(1), lit(-1)]))
                .unwrap_err()
        );
    }

    #[test]
    fn test_undefined_literal() {
        let mut registry = Registry::new(1);
        assert_eq!(
            EncodingError::UndefinedLiteral {
                literal: Literal::from((5, true))
            },
            TseitinEncoder::encode(&mut registry, &lit(5)).unwrap_err()
        );
    }

    #[test]
    fn test_gate_expanded_once() {
        let mut registry = Registry::new(3);
        let g = Formula::or(vec![lit(1), lit(2)]).simplify_to_literal(&mut registry);
        let f = Formula::and(vec![
            Formula::or(vec![g.clone(), lit(3)]),
            Formula::or(vec![!g, lit(-3)]),
        ]);
        let mut encoder = TseitinEncoder::new(&mut registry);
        encoder.add_formula(&f).unwrap();
        let n_clauses = encoder.clause_set().len();
        encoder.add_formula(&f).unwrap();
        assert_eq!(n_clauses, encoder.clause_set().len());
        let clauses = encoder.into_clause_set();
        let equiv_clauses = clauses
            .iter()
            .filter(|c| c.as_literals().iter().any(|l| usize::from(l.var_id()) == 4))
            .filter(|c| c.as_literals().len() == 3 || c.as_literals().len() == 2)
            .filter(|c| {
                c.as_literals()
                    .iter()
                    .all(|l| usize::from(l.var_id()) == 4 || usize::from(l.var_id()) <= 2)
            })
            .count();
        assert_eq!(4, equiv_clauses);
    }

    #[test]
    fn test_gate_too_wide() {
        let n = MAX_EXPANDED_ARITY + 1;
        let mut registry = Registry::new(n);
        let g = registry.intern(Formula::or(
            (1..=n).map(|i| Formula::Lit((i, true).into())).collect(),
        ));
        assert!(matches!(
            TseitinEncoder::encode(&mut registry, &Formula::Lit(g)).unwrap_err(),
            EncodingError::GateTooWide { arity, .. } if arity == n
        ));
    }

    #[test]
    fn test_equisatisfiable_xor() {
        assert_equisatisfiable(2, Formula::xor(lit(1), lit(2)));
        assert_equisatisfiable(2, !Formula::xor(lit(1), lit(-2)));
    }

    #[test]
    fn test_equisatisfiable_majority() {
        assert_equisatisfiable(3, Formula::majority(lit(1), lit(2), lit(3)));
        assert_equisatisfiable(3, Formula::majority(lit(-1), lit(2), lit(-3)));
    }

    #[test]
    fn test_equisatisfiable_equiv() {
        assert_equisatisfiable(
            3,
            Formula::equiv(Formula::and(vec![lit(1), lit(2)]), lit(3)),
        );
    }

    #[test]
    fn test_equisatisfiable_xor3() {
        assert_equisatisfiable(
            3,
            Formula::xor_all(vec![lit(1), lit(2), lit(3)]).unwrap(),
        );
    }

    #[test]
    fn test_equisatisfiable_wide_gates() {
        assert_equisatisfiable(
            4,
            Formula::or(vec![
                Formula::and(vec![lit(1), lit(2), lit(-3)]),
                Formula::and(vec![lit(-1), lit(4)]),
            ]),
        );
        assert_equisatisfiable(
            5,
            Formula::and(vec![
                lit(5),
                Formula::or(vec![lit(1), lit(2), lit(3), lit(4)]),
            ]),
        );
        assert_equisatisfiable(
            4,
            !Formula::and(vec![
                Formula::or(vec![lit(1), lit(2), lit(3)]),
                Formula::or(vec![lit(-4), lit(-1)]),
            ]),
        );
    }

    #[test]
    fn test_equisatisfiable_negative_gate() {
        let mut registry = Registry::new(2);
        let g = registry.intern(!Formula::and(vec![lit(1), lit(2)]));
        let clauses =
            TseitinEncoder::encode(&mut registry, &Formula::Lit(g.negate())).unwrap();
        assert!(clauses.is_satisfied_by(|v| usize::from(v) <= 3));
        assert!(!clauses.is_satisfied_by(|v| usize::from(v) != 1));
        assert!(!clauses.is_satisfied_by(|v| usize::from(v) == 3));
    }
}
