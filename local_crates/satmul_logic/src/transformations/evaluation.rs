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

use crate::{EncodingError, EncodingResult, Formula, Literal, Registry};

/// A [`Formula`] that can be evaluated under the values assigned in a [`Registry`].
pub trait Evaluation {
    /// Computes the truth value of this formula.
    ///
    /// Every free variable reached by the evaluation must have been assigned with [`Registry::assign`].
    /// Gate literals are evaluated through the formulas they stand for,
    /// and their values are cached in the registry until [`Registry::clear_values`] is called.
    /// Only literal values are cached: a compound formula is evaluated again from its operands
    /// on each call, which stays cheap since its gate operands hit the cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{Evaluation, Formula, Literal, Registry, Simplification};
    ///
    /// let mut registry = Registry::new(2);
    /// let x1 = Formula::from(Literal::from((1, true)));
    /// let x2 = Formula::from(Literal::from((2, true)));
    /// let g = Formula::xor(x1, x2).simplify_to_literal(&mut registry);
    /// registry.assign(1.into(), true);
    /// registry.assign(2.into(), false);
    /// assert!(g.evaluate(&mut registry).unwrap());
    /// ```
    fn evaluate(&self, registry: &mut Registry) -> EncodingResult<bool>;
}

impl Evaluation for Formula {
    fn evaluate(&self, registry: &mut Registry) -> EncodingResult<bool> {
        match self {
            Formula::Constant(b) => Ok(*b),
            Formula::Lit(l) => evaluate_literal(*l, registry),
            Formula::And(operands) => {
                for op in operands {
                    if !op.evaluate(registry)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Formula::Or(operands) => {
                for op in operands {
                    if op.evaluate(registry)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Formula::Not(operand) => Ok(!operand.evaluate(registry)?),
        }
    }
}

fn evaluate_literal(literal: Literal, registry: &mut Registry) -> EncodingResult<bool> {
    if let Some(value) = registry.cached_value(literal) {
        return Ok(value);
    }
    let value = if let Some(definition) = registry.definition(literal).cloned() {
        definition.evaluate(registry)?
    } else if let Some(value) = registry.cached_value(literal.negate()) {
        !value
    } else if let Some(definition) = registry.definition(literal.negate()).cloned() {
        !definition.evaluate(registry)?
    } else {
        return Err(EncodingError::UnassignedVariable {
            var: literal.var_id(),
        });
    };
    registry.cache_value(literal, value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Simplification;

    fn lit(i: i32) -> Formula {
        Formula::Lit(Literal::from_dimacs(i).unwrap())
    }

    fn assign_all(registry: &mut Registry, values: usize, n: usize) {
        registry.clear_values();
        for i in 0..n {
            registry.assign((i + 1).into(), values & (1 << i) != 0);
        }
    }

    #[test]
    fn test_truth_tables() {
        let mut registry = Registry::new(3);
        let xor = Formula::xor(lit(1), lit(2));
        let maj = Formula::majority(lit(1), lit(2), lit(3));
        let imp = Formula::implies(lit(1), lit(2));
        let eqv = Formula::equiv(lit(1), lit(2));
        let xor3 = Formula::xor_all(vec![lit(1), lit(2), lit(3)]).unwrap();
        for values in 0..8 {
            assign_all(&mut registry, values, 3);
            let (a, b, c) = (values & 1 != 0, values & 2 != 0, values & 4 != 0);
            assert_eq!(a ^ b, xor.evaluate(&mut registry).unwrap());
            assert_eq!(
                (a && b) || (a && c) || (b && c),
                maj.evaluate(&mut registry).unwrap()
            );
            assert_eq!(!a || b, imp.evaluate(&mut registry).unwrap());
            assert_eq!(a == b, eqv.evaluate(&mut registry).unwrap());
            assert_eq!(a ^ b ^ c, xor3.evaluate(&mut registry).unwrap());
        }
    }

    #[test]
    fn test_simplification_preserves_semantics() {
        let mut registry = Registry::new(3);
        let formulas = vec![
            Formula::xor_all(vec![lit(1), lit(-2), lit(3)]).unwrap(),
            Formula::majority(lit(-1), lit(2), Formula::xor(lit(3), lit(1))),
            !Formula::equiv(lit(1), Formula::or(vec![lit(2), lit(-3)])),
            Formula::and(vec![lit(1), Formula::and(vec![lit(2), Formula::Constant(true)])]),
        ];
        let simplified = formulas
            .iter()
            .map(|f| f.simplify_to_literal(&mut registry))
            .collect::<Vec<Formula>>();
        for values in 0..8 {
            assign_all(&mut registry, values, 3);
            for (f, s) in formulas.iter().zip(simplified.iter()) {
                assert_eq!(
                    f.evaluate(&mut registry).unwrap(),
                    s.evaluate(&mut registry).unwrap(),
                    "{} and {} differ",
                    f,
                    s
                );
            }
        }
    }

    #[test]
    fn test_negative_gate_literal() {
        let mut registry = Registry::new(2);
        let g = registry.intern(!Formula::or(vec![lit(1), lit(2)]));
        assign_all(&mut registry, 0, 2);
        assert!(Formula::Lit(g).evaluate(&mut registry).unwrap());
        assert!(!Formula::Lit(g.negate()).evaluate(&mut registry).unwrap());
    }

    #[test]
    fn test_unassigned() {
        let mut registry = Registry::new(2);
        let g = Formula::and(vec![lit(1), lit(2)]).simplify_to_literal(&mut registry);
        registry.assign(1.into(), true);
        assert_eq!(
            EncodingError::UnassignedVariable { var: 2.into() },
            g.evaluate(&mut registry).unwrap_err()
        );
        registry.assign(2.into(), true);
        assert!(g.evaluate(&mut registry).unwrap());
    }

    #[test]
    fn test_short_circuit() {
        let mut registry = Registry::new(2);
        registry.assign(1.into(), false);
        assert!(!Formula::and(vec![lit(1), lit(2)])
            .evaluate(&mut registry)
            .unwrap());
    }
}
