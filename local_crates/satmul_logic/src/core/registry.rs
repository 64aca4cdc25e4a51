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

use crate::{Formula, Literal, VarId};
use rustc_hash::FxHashMap;

/// The context of an encoding session.
///
/// A registry allocates the variables, and remembers which literal stands for which sub-formula (the gates).
/// The first `n_free_vars` variables are the free variables of the problem, the others are gate variables.
/// Sub-formulas are hash-consed: interning twice the same formula returns the same literal.
///
/// The registry also holds the values assigned to the free variables and the evaluation cache
/// used by [`Evaluation`](crate::Evaluation).
///
/// # Examples
///
/// ```
/// use satmul_logic::{Formula, Literal, Registry};
///
/// let mut registry = Registry::new(2);
/// let f = Formula::and(vec![Literal::from((1, true)).into(), Literal::from((2, true)).into()]);
/// let g = registry.intern(f.clone());
/// assert_eq!(3, usize::from(g.var_id()));
/// assert_eq!(g, registry.intern(f));
/// assert_eq!(3, registry.n_vars());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    n_vars: usize,
    n_free_vars: usize,
    gates: FxHashMap<Formula, Literal>,
    definitions: FxHashMap<Literal, Formula>,
    values: FxHashMap<Literal, bool>,
}

impl Registry {
    /// Creates a registry and allocates its free variables, numbered from 1 to `n_free_vars`.
    pub fn new(n_free_vars: usize) -> Self {
        let mut registry = Registry::default();
        for _ in 0..n_free_vars {
            registry.allocate_free();
        }
        registry
    }

    fn allocate_free(&mut self) -> Literal {
        let var = self.new_var();
        self.n_free_vars += 1;
        Literal::new(var, true)
    }

    fn new_var(&mut self) -> VarId {
        self.n_vars += 1;
        VarId::from(self.n_vars)
    }

    /// Returns the number of variables allocated so far, free and gate ones.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the number of free variables.
    pub fn n_free_vars(&self) -> usize {
        self.n_free_vars
    }

    /// Returns the number of formulas interned so far.
    pub fn n_gates(&self) -> usize {
        self.n_vars - self.n_free_vars
    }

    /// Iterates over the free variables, in increasing order.
    pub fn free_vars(&self) -> impl Iterator<Item = VarId> {
        (1..=self.n_free_vars).map(VarId::from)
    }

    /// Returns `true` iff the variable is one of the free variables.
    pub fn is_free(&self, var: VarId) -> bool {
        let index = usize::from(var);
        index >= 1 && index <= self.n_free_vars
    }

    /// Returns the literal which stands for a formula, allocating a new variable if needed.
    ///
    /// If the formula is a negation, the negative literal of a new variable is associated with it;
    /// otherwise the positive literal is.
    /// When the negation of the formula can be expressed without new variables
    /// (see [`Formula::dual`]), the opposite literal is registered for it,
    /// so that interning a formula and its negation share a single variable.
    ///
    /// Literals are returned unchanged.
    /// The formula should be simplified beforehand (see [`Simplification`](crate::Simplification)),
    /// since identity is checked on the structure of the formula.
    pub fn intern(&mut self, formula: Formula) -> Literal {
        if let Formula::Lit(l) = formula {
            return l;
        }
        if let Some(l) = self.lookup(&formula) {
            return l;
        }
        let var = self.new_var();
        let (owner, other) = if formula.is_negation() {
            (Literal::new(var, false), Literal::new(var, true))
        } else {
            (Literal::new(var, true), Literal::new(var, false))
        };
        if let Some(dual) = formula.dual() {
            self.gates.entry(dual).or_insert(other);
        }
        self.gates.insert(formula.clone(), owner);
        self.definitions.insert(owner, formula);
        owner
    }

    /// Returns the literal associated with a formula, if any.
    ///
    /// The negation of a formula with a literal is associated with the opposite literal.
    pub fn lookup(&self, formula: &Formula) -> Option<Literal> {
        match formula {
            Formula::Lit(l) => Some(*l),
            f => self.gates.get(f).copied().or_else(|| match f {
                Formula::Not(g) => self.lookup(g).map(|l| l.negate()),
                _ => None,
            }),
        }
    }

    /// Returns the formula a literal stands for, if it has been recorded.
    ///
    /// At most one of the two literals of a gate variable has a recorded definition at creation time;
    /// the definition of the other one may be recorded later by the CNF encoder.
    pub fn definition(&self, literal: Literal) -> Option<&Formula> {
        self.definitions.get(&literal)
    }

    pub(crate) fn record_definition(&mut self, literal: Literal, formula: Formula) {
        self.definitions.entry(literal).or_insert(formula);
    }

    /// Sets the value of a free variable for later evaluations.
    pub fn assign(&mut self, var: VarId, value: bool) {
        self.values.insert(Literal::new(var, true), value);
    }

    /// Forgets all the assigned values and the evaluation cache.
    ///
    /// Variables and gates are kept.
    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    pub(crate) fn cached_value(&self, literal: Literal) -> Option<bool> {
        self.values.get(&literal).copied()
    }

    pub(crate) fn cache_value(&mut self, literal: Literal, value: bool) {
        self.values.insert(literal, value);
    }
}
