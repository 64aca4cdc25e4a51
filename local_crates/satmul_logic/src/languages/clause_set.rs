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

use crate::{Literal, VarId};
use rustc_hash::FxHashSet;

/// A clause, that is a disjunction of literals.
///
/// Literals are sorted and distinct; a clause is never empty nor tautological.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Clause(Vec<Literal>);

impl Clause {
    /// Builds a clause from a vector of literals.
    ///
    /// Repeated literals are kept once.
    /// Returns `None` if the vector is empty or contains a literal and its negation.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Clause, Literal};
    ///
    /// let clause = Clause::new(vec![Literal::from((2, true)), Literal::from((1, false))]).unwrap();
    /// assert_eq!(vec![-1, 2], clause.to_dimacs());
    /// assert!(Clause::new(vec![Literal::from((1, true)), Literal::from((1, false))]).is_none());
    /// ```
    pub fn new(mut literals: Vec<Literal>) -> Option<Self> {
        literals.sort_unstable();
        literals.dedup();
        if literals.is_empty() || literals.windows(2).any(|w| w[0].is_negation_of(&w[1])) {
            None
        } else {
            Some(Clause(literals))
        }
    }

    /// Returns the literals of the clause.
    pub fn as_literals(&self) -> &[Literal] {
        &self.0
    }

    /// Returns the literals of the clause in the DIMACS representation.
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.0.iter().map(Literal::to_dimacs).collect()
    }

    /// Returns the highest variable identifier of the clause.
    pub fn max_var(&self) -> VarId {
        self.0
            .iter()
            .map(Literal::var_id)
            .max()
            .unwrap_or_else(|| VarId::from(0))
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs = self
            .0
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<String>>();
        write!(f, "or({})", strs.join(", "))
    }
}

/// A set of clauses, in insertion order.
///
/// Tautologies and empty clauses are silently discarded;
/// a clause made of the same literals as a previously inserted one is not inserted twice.
///
/// # Examples
///
/// ```
/// use satmul_logic::{ClauseSet, Literal};
///
/// let mut clauses = ClauseSet::default();
/// assert!(clauses.insert(vec![Literal::from((1, true)), Literal::from((2, false))]));
/// assert!(!clauses.insert(vec![Literal::from((2, false)), Literal::from((1, true))]));
/// assert!(!clauses.insert(vec![Literal::from((1, true)), Literal::from((1, false))]));
/// assert_eq!(1, clauses.len());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    keys: FxHashSet<Clause>,
}

impl ClauseSet {
    /// Inserts a clause given as a vector of literals.
    ///
    /// Returns `true` iff the clause was added to the set.
    pub fn insert(&mut self, literals: Vec<Literal>) -> bool {
        match Clause::new(literals) {
            Some(clause) => self.insert_clause(clause),
            None => false,
        }
    }

    /// Inserts a clause, returning `true` iff it was not already in the set.
    pub fn insert_clause(&mut self, clause: Clause) -> bool {
        if self.keys.contains(&clause) {
            return false;
        }
        self.keys.insert(clause.clone());
        self.clauses.push(clause);
        true
    }

    /// Returns the clauses, in the order they were inserted.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates over the clauses, in the order they were inserted.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Returns the number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` iff the set contains no clause.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the number of variables involved, that is the highest variable identifier (or 0).
    pub fn n_vars(&self) -> usize {
        self.clauses
            .iter()
            .map(|c| usize::from(c.max_var()))
            .max()
            .unwrap_or(0)
    }

    /// Checks whether an assignment satisfies all the clauses.
    ///
    /// The assignment is given as a function from variables to values.
    pub fn is_satisfied_by<F>(&self, value_of: F) -> bool
    where
        F: Fn(VarId) -> bool,
    {
        self.clauses.iter().all(|c| {
            c.as_literals()
                .iter()
                .any(|l| value_of(l.var_id()) == l.polarity())
        })
    }
}

impl std::fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strs = self
            .clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>();
        write!(f, "and({})", strs.join(", "))
    }
}
