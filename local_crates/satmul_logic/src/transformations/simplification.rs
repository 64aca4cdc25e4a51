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

use crate::{Formula, Literal, Negation, Registry};

/// A [`Formula`] that can be reduced to a normalized, equivalent formula.
///
/// A simplified formula is either a constant, a literal, or a conjunction (resp. disjunction)
/// of at least two distinct literals.
/// Compound operands are replaced by the literals that stand for them, allocated by the [`Registry`].
pub trait Simplification {
    /// Returns the simplified form of this formula.
    ///
    /// Nested conjunctions (resp. disjunctions) are flattened,
    /// neutral constants are dropped, absorbing constants short-circuit the result,
    /// repeated literals are kept once and complementary literals produce the absorbing constant.
    /// Negations are pushed inside using De Morgan's laws.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Formula, Literal, Registry, Simplification};
    ///
    /// let mut registry = Registry::new(2);
    /// let x1 = Formula::from(Literal::from((1, true)));
    /// let x2 = Formula::from(Literal::from((2, true)));
    /// let f = Formula::and(vec![x1.clone(), Formula::and(vec![x2, Formula::Constant(true)]), x1]);
    /// assert_eq!("and(1, 2)", format!("{}", f.simplify(&mut registry)));
    /// ```
    fn simplify(&self, registry: &mut Registry) -> Formula;

    /// Simplifies this formula to a single literal or constant.
    ///
    /// If the simplified formula is compound, the literal standing for it is returned.
    /// Formulas which are identical once simplified are associated with the same literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Formula, Literal, Registry, Simplification};
    ///
    /// let mut registry = Registry::new(2);
    /// let x1 = Formula::from(Literal::from((1, true)));
    /// let x2 = Formula::from(Literal::from((2, true)));
    /// let f = Formula::or(vec![x1.clone(), x2.clone()]).simplify_to_literal(&mut registry);
    /// let g = Formula::or(vec![Formula::or(vec![x1]), x2]).simplify_to_literal(&mut registry);
    /// assert_eq!(f, g);
    /// assert_eq!("3", format!("{}", f));
    /// ```
    fn simplify_to_literal(&self, registry: &mut Registry) -> Formula;
}

impl Simplification for Formula {
    fn simplify(&self, registry: &mut Registry) -> Formula {
        match self {
            Formula::Constant(_) | Formula::Lit(_) => self.clone(),
            Formula::And(operands) => simplify_junction(operands, true, registry),
            Formula::Or(operands) => simplify_junction(operands, false, registry),
            Formula::Not(operand) => operand.negate(registry),
        }
    }

    fn simplify_to_literal(&self, registry: &mut Registry) -> Formula {
        match self.simplify(registry) {
            f @ Formula::And(_) | f @ Formula::Or(_) => Formula::Lit(registry.intern(f)),
            f => f,
        }
    }
}

fn simplify_junction(operands: &[Formula], conjunctive: bool, registry: &mut Registry) -> Formula {
    let mut literals = Vec::with_capacity(operands.len());
    if collect_literals(operands, conjunctive, registry, &mut literals) {
        return Formula::Constant(!conjunctive);
    }
    match literals.len() {
        0 => Formula::Constant(conjunctive),
        1 => Formula::Lit(literals[0]),
        _ => {
            let operands = literals.into_iter().map(Formula::Lit).collect();
            if conjunctive {
                Formula::And(operands)
            } else {
                Formula::Or(operands)
            }
        }
    }
}

// Returns true when the junction reduces to its absorbing constant.
fn collect_literals(
    operands: &[Formula],
    conjunctive: bool,
    registry: &mut Registry,
    literals: &mut Vec<Literal>,
) -> bool {
    for operand in operands {
        let reduced = match operand {
            Formula::And(children) if conjunctive => {
                if collect_literals(children, conjunctive, registry, literals) {
                    return true;
                }
                continue;
            }
            Formula::Or(children) if !conjunctive => {
                if collect_literals(children, conjunctive, registry, literals) {
                    return true;
                }
                continue;
            }
            _ => operand.simplify_to_literal(registry),
        };
        match reduced {
            Formula::Constant(b) if b == conjunctive => {}
            Formula::Constant(_) => return true,
            Formula::Lit(l) => {
                if literals.iter().any(|other| other.is_negation_of(&l)) {
                    return true;
                }
                if !literals.contains(&l) {
                    literals.push(l);
                }
            }
            _ => unreachable!(),
        }
    }
    false
}
