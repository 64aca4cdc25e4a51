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

use crate::{Formula, Registry, Simplification};

/// A [`Formula`] that can be negated into a simplified [`Formula`].
pub trait Negation {
    /// Returns the simplified negation of this formula.
    ///
    /// Constants and literals are flipped, double negations are removed,
    /// conjunctions become disjunctions of the negated operands and vice versa.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Formula, Literal, Negation, Registry};
    ///
    /// let mut registry = Registry::new(2);
    /// let x1 = Formula::from(Literal::from((1, true)));
    /// let x2 = Formula::from(Literal::from((2, false)));
    /// let f = Formula::and(vec![x1, x2]);
    /// assert_eq!("or(-1, 2)", format!("{}", f.negate(&mut registry)));
    /// ```
    fn negate(&self, registry: &mut Registry) -> Formula;
}

impl Negation for Formula {
    fn negate(&self, registry: &mut Registry) -> Formula {
        match self {
            Formula::Constant(b) => Formula::Constant(!b),
            Formula::Lit(l) => Formula::Lit(l.negate()),
            Formula::Not(operand) => operand.simplify(registry),
            Formula::And(operands) => {
                Formula::Or(negated_operands(operands, registry)).simplify(registry)
            }
            Formula::Or(operands) => {
                Formula::And(negated_operands(operands, registry)).simplify(registry)
            }
        }
    }
}

fn negated_operands(operands: &[Formula], registry: &mut Registry) -> Vec<Formula> {
    operands
        .iter()
        .map(|op| (!op.clone()).simplify_to_literal(registry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Literal;

    fn lit(i: i32) -> Formula {
        Formula::Lit(Literal::from_dimacs(i).unwrap())
    }

    #[test]
    fn test_negate_atoms() {
        let mut registry = Registry::new(1);
        assert_eq!(lit(-1), lit(1).negate(&mut registry));
        assert_eq!(
            Formula::Constant(false),
            Formula::Constant(true).negate(&mut registry)
        );
    }

    #[test]
    fn test_double_negation() {
        let mut registry = Registry::new(2);
        let f = Formula::or(vec![lit(1), lit(2)]);
        assert_eq!(f, (!f.clone()).negate(&mut registry));
    }

    #[test]
    fn test_de_morgan() {
        let mut registry = Registry::new(3);
        let f = Formula::or(vec![lit(1), Formula::and(vec![lit(2), lit(3)])]);
        let negated = f.negate(&mut registry);
        assert_eq!(Formula::and(vec![lit(-1), lit(4)]), negated);
        assert_eq!(
            Some(Literal::from((4, true))),
            registry.lookup(&Formula::or(vec![lit(-2), lit(-3)]))
        );
        assert_eq!(
            Some(Literal::from((4, false))),
            registry.lookup(&Formula::and(vec![lit(2), lit(3)]))
        );
    }

    #[test]
    fn test_negation_shares_gate() {
        let mut registry = Registry::new(2);
        let f = Formula::and(vec![lit(1), lit(2)]);
        let g = f.simplify_to_literal(&mut registry);
        let not_g = (!f).simplify_to_literal(&mut registry);
        assert_eq!(lit(3), g);
        assert_eq!(lit(-3), not_g);
    }
}
