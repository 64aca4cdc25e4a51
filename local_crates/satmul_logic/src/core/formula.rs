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

use crate::{EncodingError, EncodingResult, Literal};

/// A propositional formula.
///
/// Formulas are immutable values.
/// Two formulas are considered identical when they are structurally equal,
/// which is also when their [`Display`](std::fmt::Display) representations are equal;
/// this is the identity used to cache gates in a [`Registry`](crate::Registry).
///
/// Exclusive or, majority, implication and equivalence have no variant of their own:
/// they are built by the dedicated constructors out of 2-operand conjunctions, disjunctions and negations.
///
/// # Examples
///
/// ```
/// use satmul_logic::{Formula, Literal};
///
/// let x1 = Formula::from(Literal::from((1, true)));
/// let x2 = Formula::from(Literal::from((2, false)));
/// let f = Formula::and(vec![x1.clone(), !x2.clone()]);
/// assert_eq!("and(1, not(-2))", format!("{}", f));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A Boolean constant.
    Constant(bool),
    /// A literal.
    Lit(Literal),
    /// A conjunction of any number of operands.
    And(Vec<Formula>),
    /// A disjunction of any number of operands.
    Or(Vec<Formula>),
    /// A negation.
    Not(Box<Formula>),
}

impl Formula {
    /// Builds a conjunction.
    pub fn and(operands: Vec<Formula>) -> Self {
        Formula::And(operands)
    }

    /// Builds a disjunction.
    pub fn or(operands: Vec<Formula>) -> Self {
        Formula::Or(operands)
    }

    /// Builds the exclusive or of two formulas, as `or(and(not(a), b), and(a, not(b)))`.
    pub fn xor(a: Formula, b: Formula) -> Self {
        Formula::or(vec![
            Formula::and(vec![!a.clone(), b.clone()]),
            Formula::and(vec![a, !b]),
        ])
    }

    /// Builds the exclusive or of at least two formulas.
    ///
    /// The operation is right-nested: `xor(a, b, c)` is `xor(a, xor(b, c))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Formula, Literal};
    ///
    /// let lits = (1..=3).map(|i| Literal::from((i, true)).into()).collect::<Vec<Formula>>();
    /// assert!(Formula::xor_all(lits).is_ok());
    /// assert!(Formula::xor_all(vec![Formula::Constant(true)]).is_err());
    /// ```
    pub fn xor_all(mut operands: Vec<Formula>) -> EncodingResult<Self> {
        if operands.len() < 2 {
            return Err(EncodingError::InvalidArity {
                connective: "xor",
                expected: 2,
                actual: operands.len(),
            });
        }
        let mut acc = operands.pop().unwrap_or(Formula::Constant(false));
        while let Some(op) = operands.pop() {
            acc = Formula::xor(op, acc);
        }
        Ok(acc)
    }

    /// Builds the majority of three formulas, as `or(and(a, b), and(c, xor(a, b)))`.
    pub fn majority(a: Formula, b: Formula, c: Formula) -> Self {
        Formula::or(vec![
            Formula::and(vec![a.clone(), b.clone()]),
            Formula::and(vec![c, Formula::xor(a, b)]),
        ])
    }

    /// Builds the implication `a -> b`, as `or(not(a), b)`.
    pub fn implies(a: Formula, b: Formula) -> Self {
        Formula::or(vec![!a, b])
    }

    /// Builds the equivalence `a <-> b`, as `and(a -> b, b -> a)`.
    pub fn equiv(a: Formula, b: Formula) -> Self {
        Formula::and(vec![
            Formula::implies(a.clone(), b.clone()),
            Formula::implies(b, a),
        ])
    }

    /// Returns `true` iff this formula is a negation, i.e. a `Not` node or a negative literal.
    pub fn is_negation(&self) -> bool {
        match self {
            Formula::Not(_) => true,
            Formula::Lit(l) => !l.polarity(),
            _ => false,
        }
    }

    /// Returns `true` iff this formula is a literal or a constant.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Constant(_) | Formula::Lit(_))
    }

    /// Returns the literal this formula is made of, if it is a literal.
    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Formula::Lit(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the kind of junction (`true` for a conjunction) and its operands
    /// if this formula is a conjunction or a disjunction of literals only.
    pub(crate) fn as_literal_junction(&self) -> Option<(bool, Vec<Literal>)> {
        let (conjunctive, operands) = match self {
            Formula::And(ops) => (true, ops),
            Formula::Or(ops) => (false, ops),
            _ => return None,
        };
        operands
            .iter()
            .map(Formula::as_literal)
            .collect::<Option<Vec<Literal>>>()
            .map(|lits| (conjunctive, lits))
    }

    /// Returns a formula which is equivalent to the negation of this one,
    /// if it can be written without allocating new variables.
    ///
    /// This is the case for `not(f)` (whose dual is `f`), for literals and constants,
    /// and for conjunctions and disjunctions of literals (De Morgan's laws).
    pub(crate) fn dual(&self) -> Option<Formula> {
        match self {
            Formula::Constant(b) => Some(Formula::Constant(!b)),
            Formula::Lit(l) => Some(Formula::Lit(l.negate())),
            Formula::Not(f) => Some(f.as_ref().clone()),
            Formula::And(_) | Formula::Or(_) => {
                self.as_literal_junction().map(|(conjunctive, lits)| {
                    let negated = lits.iter().map(|l| Formula::Lit(l.negate())).collect();
                    if conjunctive {
                        Formula::Or(negated)
                    } else {
                        Formula::And(negated)
                    }
                })
            }
        }
    }
}

impl std::ops::Not for Formula {
    type Output = Formula;

    fn not(self) -> Formula {
        Formula::Not(Box::new(self))
    }
}

impl From<Literal> for Formula {
    fn from(l: Literal) -> Self {
        Formula::Lit(l)
    }
}

impl From<bool> for Formula {
    fn from(b: bool) -> Self {
        Formula::Constant(b)
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_operands(
            f: &mut std::fmt::Formatter<'_>,
            name: &str,
            operands: &[Formula],
        ) -> std::fmt::Result {
            write!(f, "{}(", name)?;
            for (i, op) in operands.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", op)?;
            }
            write!(f, ")")
        }
        match self {
            Formula::Constant(b) => write!(f, "{}", b),
            Formula::Lit(l) => write!(f, "{}", l),
            Formula::And(ops) => write_operands(f, "and", ops),
            Formula::Or(ops) => write_operands(f, "or", ops),
            Formula::Not(op) => write!(f, "not({})", op),
        }
    }
}
