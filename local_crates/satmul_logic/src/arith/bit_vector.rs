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
    EncodingError, EncodingResult, Evaluation, Formula, Literal, Model, Registry, Simplification,
    VarId,
};

/// A fixed-width integer whose bits are literals or constants.
///
/// Bit 0 is the least significant one.
/// Depending on the operation, the bits are read as an unsigned integer or as a two's complement one;
/// all the operations work modulo `2^width`, the carries out of the highest bit being dropped.
///
/// The operations build the circuits computing their result bits,
/// allocating the gates in the provided [`Registry`].
///
/// # Examples
///
/// ```
/// use satmul_logic::{BitVector, Evaluation, Registry};
///
/// let mut registry = Registry::new(4);
/// let a = BitVector::from_vars(registry.free_vars().take(2));
/// let b = BitVector::from_vars(registry.free_vars().skip(2));
/// let product = a.product_with(&b, &mut registry, true).unwrap();
/// assert_eq!(4, product.width());
/// // a = 3, b = 2
/// registry.assign(1.into(), true);
/// registry.assign(2.into(), true);
/// registry.assign(3.into(), false);
/// registry.assign(4.into(), true);
/// assert_eq!(6, product.evaluate(&mut registry).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    bits: Vec<Formula>,
}

impl BitVector {
    /// Builds an integer from its bits.
    ///
    /// The bits built by the arithmetic operations are literals or constants;
    /// [`decode`](Self::decode) only accepts such bits.
    pub fn new(bits: Vec<Formula>) -> Self {
        BitVector { bits }
    }

    /// Builds an integer whose bits are the given literals.
    pub fn from_literals(literals: &[Literal]) -> Self {
        BitVector::new(literals.iter().map(|l| Formula::Lit(*l)).collect())
    }

    /// Builds an integer whose bits are the positive literals of the given variables.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        BitVector::new(
            vars.into_iter()
                .map(|v| Formula::Lit(Literal::new(v, true)))
                .collect(),
        )
    }

    /// Builds a constant integer of the given width.
    ///
    /// The bits of `value` above the width are ignored.
    pub fn constant(value: u64, width: usize) -> Self {
        BitVector::new(
            (0..width)
                .map(|i| Formula::Constant(i < 64 && (value >> i) & 1 == 1))
                .collect(),
        )
    }

    /// Returns the number of bits of the integer.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns the bits, least significant first.
    pub fn bits(&self) -> &[Formula] {
        &self.bits
    }

    /// Returns the two's complement opposite of this integer, modulo `2^width`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{BitVector, Evaluation, Registry};
    ///
    /// let mut registry = Registry::new(0);
    /// let three = BitVector::constant(3, 4);
    /// assert_eq!(13, three.negation(&mut registry).evaluate(&mut registry).unwrap());
    /// ```
    pub fn negation(&self, registry: &mut Registry) -> BitVector {
        let n = self.width();
        if n == 0 {
            return self.clone();
        }
        let inverse = self.bits.iter().map(inverse).collect::<Vec<Formula>>();
        let mut result = Vec::with_capacity(n);
        result.push(self.bits[0].clone());
        let mut carry = inverse[0].clone();
        for (i, inv) in inverse.iter().enumerate().skip(1) {
            result.push(Formula::xor(inv.clone(), carry.clone()).simplify_to_literal(registry));
            if i < n - 1 {
                carry = Formula::and(vec![inv.clone(), carry]).simplify_to_literal(registry);
            }
        }
        BitVector::new(result)
    }

    /// Returns the sum of two integers of the same width, modulo `2^width`.
    ///
    /// An error is returned if the widths differ.
    pub fn sum_with(&self, other: &BitVector, registry: &mut Registry) -> EncodingResult<BitVector> {
        check_widths("add", self, other)?;
        let n = self.width();
        if n == 0 {
            return Ok(self.clone());
        }
        let (a, b) = (&self.bits, &other.bits);
        let mut result = Vec::with_capacity(n);
        result.push(Formula::xor(a[0].clone(), b[0].clone()).simplify_to_literal(registry));
        let mut carry = Formula::and(vec![a[0].clone(), b[0].clone()]).simplify_to_literal(registry);
        for i in 1..n {
            result.push(
                Formula::xor(a[i].clone(), Formula::xor(b[i].clone(), carry.clone()))
                    .simplify_to_literal(registry),
            );
            if i < n - 1 {
                carry = Formula::majority(a[i].clone(), b[i].clone(), carry)
                    .simplify_to_literal(registry);
            }
        }
        Ok(BitVector::new(result))
    }

    /// Returns the bitwise conjunction of two integers of the same width.
    ///
    /// An error is returned if the widths differ.
    pub fn and_with(&self, other: &BitVector, registry: &mut Registry) -> EncodingResult<BitVector> {
        check_widths("compute the bitwise and of", self, other)?;
        Ok(BitVector::new(
            self.bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| Formula::and(vec![a.clone(), b.clone()]).simplify_to_literal(registry))
                .collect(),
        ))
    }

    /// Returns this integer multiplied by `2^k`, with `k` more bits.
    pub fn left_shifted(&self, k: usize) -> BitVector {
        let mut bits = vec![Formula::Constant(false); k];
        bits.extend(self.bits.iter().cloned());
        BitVector::new(bits)
    }

    /// Returns this integer without its `k` lowest bits.
    pub fn right_shifted(&self, k: usize) -> BitVector {
        BitVector::new(self.bits.iter().skip(k).cloned().collect())
    }

    /// Returns this integer truncated or padded with `false` bits to the given width.
    pub fn clipped(&self, width: usize) -> BitVector {
        let mut bits = self
            .bits
            .iter()
            .take(width)
            .cloned()
            .collect::<Vec<Formula>>();
        bits.resize(width, Formula::Constant(false));
        BitVector::new(bits)
    }

    /// Returns this integer with additional high bits.
    pub fn extended(&self, high_bits: &[Formula]) -> BitVector {
        let mut bits = self.bits.clone();
        bits.extend_from_slice(high_bits);
        BitVector::new(bits)
    }

    /// Returns the unsigned product of two integers of the same width `n`, on `2n` bits.
    ///
    /// When `optimize` is `true`, the Karatsuba method is used:
    /// it requires three half-width products instead of four, at the cost of some additions.
    /// Otherwise the product is the sum of the shifted partial products.
    ///
    /// An error is returned if the widths differ or are not a power of two.
    pub fn product_with(
        &self,
        other: &BitVector,
        registry: &mut Registry,
        optimize: bool,
    ) -> EncodingResult<BitVector> {
        check_widths("multiply", self, other)?;
        if !self.width().is_power_of_two() {
            return Err(EncodingError::NotPowerOfTwo {
                width: self.width(),
            });
        }
        if optimize {
            self.karatsuba_product(other, registry)
        } else {
            self.schoolbook_product(other, registry)
        }
    }

    // With u = u0 + u1.2^h and v = v0 + v1.2^h, the middle term u0.v1 + u1.v0
    // is computed as u0.v0 + u1.v1 + (u1 - u0).(v0 - v1).
    // The signed differences are multiplied as unsigned h-bit integers,
    // then corrected by their signs modulo 2^n, then sign-extended to n + h bits.
    fn karatsuba_product(
        &self,
        other: &BitVector,
        registry: &mut Registry,
    ) -> EncodingResult<BitVector> {
        let n = self.width();
        if n == 1 {
            let low = Formula::and(vec![self.bits[0].clone(), other.bits[0].clone()])
                .simplify_to_literal(registry);
            return Ok(BitVector::new(vec![low, Formula::Constant(false)]));
        }
        let half = n / 2;
        let zero = [Formula::Constant(false)];
        let (u0, u1) = (self.clipped(half), self.right_shifted(half));
        let (v0, v1) = (other.clipped(half), other.right_shifted(half));
        let u1_minus_u0 = u1
            .extended(&zero)
            .sum_with(&u0.extended(&zero).negation(registry), registry)?;
        let v0_minus_v1 = v0
            .extended(&zero)
            .sum_with(&v1.extended(&zero).negation(registry), registry)?;
        let sign1 = u1_minus_u0.bits[half].clone();
        let sign2 = v0_minus_v1.bits[half].clone();
        let u1_minus_u0 = u1_minus_u0.clipped(half);
        let v0_minus_v1 = v0_minus_v1.clipped(half);
        let signs_differ = Formula::xor(sign1.clone(), sign2.clone()).simplify_to_literal(registry);
        let nonzero1 = u1_minus_u0.is_nonzero(registry);
        let nonzero2 = v0_minus_v1.is_nonzero(registry);
        let negative_middle = conjunction_chain(vec![signs_differ, nonzero1, nonzero2], registry);
        let u0v0 = u0.karatsuba_product(&v0, registry)?;
        let u1v1 = u1.karatsuba_product(&v1, registry)?;
        let mut middle = u1_minus_u0.karatsuba_product(&v0_minus_v1, registry)?;
        let correction = u1_minus_u0
            .negation(registry)
            .and_with(&BitVector::new(vec![sign2; half]), registry)?
            .left_shifted(half);
        middle = middle.sum_with(&correction, registry)?;
        let correction = v0_minus_v1
            .negation(registry)
            .and_with(&BitVector::new(vec![sign1; half]), registry)?
            .left_shifted(half);
        middle = middle.sum_with(&correction, registry)?;
        let middle = middle
            .clipped(n)
            .extended(&vec![negative_middle; half])
            .sum_with(&u0v0.clipped(n + half), registry)?
            .sum_with(&u1v1.clipped(n + half), registry)?;
        u0v0.extended(&u1v1.bits)
            .sum_with(&middle.left_shifted(half), registry)
    }

    fn schoolbook_product(
        &self,
        other: &BitVector,
        registry: &mut Registry,
    ) -> EncodingResult<BitVector> {
        let n = self.width();
        let mut result = BitVector::constant(0, 2 * n);
        for (i, bit) in self.bits.iter().enumerate() {
            let row = other.and_with(&BitVector::new(vec![bit.clone(); n]), registry)?;
            result = result.sum_with(&row.left_shifted(i).clipped(2 * n), registry)?;
        }
        Ok(result)
    }

    /// Returns a literal (or a constant) which is true iff this integer is not zero.
    ///
    /// The underlying circuit is a chain of 2-operand disjunctions.
    pub fn is_nonzero(&self, registry: &mut Registry) -> Formula {
        self.bits
            .iter()
            .fold(Formula::Constant(false), |acc, bit| {
                Formula::or(vec![acc, bit.clone()]).simplify_to_literal(registry)
            })
    }

    /// Returns a formula which is true iff this integer is equal to the given value.
    ///
    /// The formula is `false` if the value does not fit in the width of the integer.
    pub fn equals_value(&self, value: u64) -> Formula {
        if self.width() < 64 && value >> self.width() != 0 {
            return Formula::Constant(false);
        }
        Formula::and(
            self.bits
                .iter()
                .enumerate()
                .map(|(i, bit)| {
                    if i < 64 && (value >> i) & 1 == 1 {
                        bit.clone()
                    } else {
                        inverse(bit)
                    }
                })
                .collect(),
        )
    }

    /// Computes the unsigned value of this integer under the values assigned in the registry.
    ///
    /// An error is returned if the integer has more than 64 bits,
    /// or if the evaluation of a bit fails (see [`Evaluation`]).
    pub fn evaluate(&self, registry: &mut Registry) -> EncodingResult<u64> {
        self.fold_bits(|_, bit| bit.evaluate(registry))
    }

    /// Computes the unsigned value of this integer in a model.
    ///
    /// Variables with no value in the model are considered false.
    /// An error is returned if the integer has more than 64 bits,
    /// or if a bit is neither a literal nor a constant.
    pub fn decode(&self, model: &Model) -> EncodingResult<u64> {
        self.fold_bits(|position, bit| match bit {
            Formula::Lit(l) => Ok(model.value_of(l.var_id()).unwrap_or(false) == l.polarity()),
            Formula::Constant(b) => Ok(*b),
            _ => Err(EncodingError::CompoundBit { position }),
        })
    }

    fn fold_bits<F>(&self, mut bit_value: F) -> EncodingResult<u64>
    where
        F: FnMut(usize, &Formula) -> EncodingResult<bool>,
    {
        if self.width() > 64 {
            return Err(EncodingError::IntegerTooWide {
                width: self.width(),
            });
        }
        let mut value = 0;
        for (i, bit) in self.bits.iter().enumerate() {
            if bit_value(i, bit)? {
                value |= 1 << i;
            }
        }
        Ok(value)
    }
}

fn check_widths(operation: &'static str, a: &BitVector, b: &BitVector) -> EncodingResult<()> {
    if a.width() == b.width() {
        Ok(())
    } else {
        Err(EncodingError::WidthMismatch {
            operation,
            left: a.width(),
            right: b.width(),
        })
    }
}

fn inverse(bit: &Formula) -> Formula {
    match bit {
        Formula::Lit(l) => Formula::Lit(l.negate()),
        Formula::Constant(b) => Formula::Constant(!b),
        f => !f.clone(),
    }
}

fn conjunction_chain(operands: Vec<Formula>, registry: &mut Registry) -> Formula {
    operands
        .into_iter()
        .fold(Formula::Constant(true), |acc, op| {
            Formula::and(vec![acc, op]).simplify_to_literal(registry)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operands(width: usize) -> (Registry, BitVector, BitVector) {
        let registry = Registry::new(2 * width);
        let a = BitVector::from_vars((1..=width).map(VarId::from));
        let b = BitVector::from_vars((width + 1..=2 * width).map(VarId::from));
        (registry, a, b)
    }

    fn assign(registry: &mut Registry, width: usize, x: u64, y: u64) {
        registry.clear_values();
        for i in 0..width {
            registry.assign((i + 1).into(), (x >> i) & 1 == 1);
            registry.assign((width + i + 1).into(), (y >> i) & 1 == 1);
        }
    }

    fn mask(width: usize) -> u64 {
        (1 << width) - 1
    }

    #[test]
    fn test_sum_exhaustive() {
        for width in 1..=4 {
            let (mut registry, a, b) = operands(width);
            let sum = a.sum_with(&b, &mut registry).unwrap();
            assert_eq!(width, sum.width());
            for x in 0..(1 << width) {
                for y in 0..(1 << width) {
                    assign(&mut registry, width, x, y);
                    assert_eq!(
                        (x + y) & mask(width),
                        sum.evaluate(&mut registry).unwrap(),
                        "{} + {} on {} bits",
                        x,
                        y,
                        width
                    );
                }
            }
        }
    }

    #[test]
    fn test_negation_exhaustive() {
        for width in 1..=4 {
            let (mut registry, a, _) = operands(width);
            let neg = a.negation(&mut registry);
            for x in 0..(1 << width) {
                assign(&mut registry, width, x, 0);
                assert_eq!(
                    x.wrapping_neg() & mask(width),
                    neg.evaluate(&mut registry).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_difference_sign() {
        let width = 4;
        let (mut registry, a, b) = operands(width);
        let diff = a.sum_with(&b.negation(&mut registry), &mut registry).unwrap();
        for x in 0..8 {
            for y in 0..8 {
                assign(&mut registry, width, x, y);
                assert_eq!(
                    x < y,
                    diff.bits()[width - 1].evaluate(&mut registry).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_and_with() {
        let (mut registry, a, b) = operands(3);
        let and = a.and_with(&b, &mut registry).unwrap();
        for x in 0..8 {
            for y in 0..8 {
                assign(&mut registry, 3, x, y);
                assert_eq!(x & y, and.evaluate(&mut registry).unwrap());
            }
        }
    }

    fn check_product_exhaustive(width: usize, optimize: bool) {
        let (mut registry, a, b) = operands(width);
        let product = a.product_with(&b, &mut registry, optimize).unwrap();
        assert_eq!(2 * width, product.width());
        for x in 0..(1 << width) {
            for y in 0..(1 << width) {
                assign(&mut registry, width, x, y);
                assert_eq!(
                    x * y,
                    product.evaluate(&mut registry).unwrap(),
                    "{} * {} on {} bits",
                    x,
                    y,
                    width
                );
            }
        }
    }

    #[test]
    fn test_karatsuba_exhaustive() {
        check_product_exhaustive(1, true);
        check_product_exhaustive(2, true);
        check_product_exhaustive(4, true);
    }

    #[test]
    fn test_schoolbook_exhaustive() {
        check_product_exhaustive(1, false);
        check_product_exhaustive(2, false);
        check_product_exhaustive(4, false);
    }

    #[test]
    fn test_karatsuba_8_bits_sampled() {
        let (mut registry, a, b) = operands(8);
        let product = a.product_with(&b, &mut registry, true).unwrap();
        for x in (0..256).step_by(7).chain(vec![1, 128, 255]) {
            for y in (0..256).step_by(11).chain(vec![1, 127, 255]) {
                assign(&mut registry, 8, x, y);
                assert_eq!(x * y, product.evaluate(&mut registry).unwrap());
            }
        }
    }

    #[test]
    #[ignore]
    fn test_karatsuba_exhaustive_8_bits() {
        check_product_exhaustive(8, true);
    }

    #[test]
    fn test_product_with_constants() {
        let mut registry = Registry::new(0);
        let a = BitVector::constant(13, 4);
        let b = BitVector::constant(11, 4);
        let product = a.product_with(&b, &mut registry, true).unwrap();
        assert!(product.bits().iter().all(|b| matches!(b, Formula::Constant(_))));
        assert_eq!(143, product.evaluate(&mut registry).unwrap());
        assert_eq!(0, registry.n_vars());
    }

    #[test]
    fn test_product_errors() {
        let mut registry = Registry::new(0);
        assert_eq!(
            EncodingError::WidthMismatch {
                operation: "multiply",
                left: 2,
                right: 4
            },
            BitVector::constant(1, 2)
                .product_with(&BitVector::constant(1, 4), &mut registry, true)
                .unwrap_err()
        );
        assert_eq!(
            EncodingError::NotPowerOfTwo { width: 3 },
            BitVector::constant(1, 3)
                .product_with(&BitVector::constant(1, 3), &mut registry, false)
                .unwrap_err()
        );
        assert_eq!(
            EncodingError::WidthMismatch {
                operation: "add",
                left: 3,
                right: 2
            },
            BitVector::constant(1, 3)
                .sum_with(&BitVector::constant(1, 2), &mut registry)
                .unwrap_err()
        );
    }

    #[test]
    fn test_shifts() {
        let a = BitVector::constant(0b1011, 4);
        let mut registry = Registry::new(0);
        assert_eq!(
            0b101100,
            a.left_shifted(2).evaluate(&mut registry).unwrap()
        );
        assert_eq!(6, a.left_shifted(2).width());
        assert_eq!(0b10, a.right_shifted(2).evaluate(&mut registry).unwrap());
        assert_eq!(2, a.right_shifted(2).width());
        assert_eq!(0, a.right_shifted(5).width());
    }

    #[test]
    fn test_clipped_and_extended() {
        let a = BitVector::constant(0b1011, 4);
        let mut registry = Registry::new(0);
        assert_eq!(0b011, a.clipped(3).evaluate(&mut registry).unwrap());
        assert_eq!(6, a.clipped(6).width());
        assert_eq!(0b1011, a.clipped(6).evaluate(&mut registry).unwrap());
        let extended = a.extended(&[Formula::Constant(true), Formula::Constant(false)]);
        assert_eq!(0b011011, extended.evaluate(&mut registry).unwrap());
    }

    #[test]
    fn test_is_nonzero() {
        let (mut registry, a, _) = operands(3);
        let nonzero = a.is_nonzero(&mut registry);
        for x in 0..8 {
            assign(&mut registry, 3, x, 0);
            assert_eq!(x != 0, nonzero.evaluate(&mut registry).unwrap());
        }
        assert_eq!(
            Formula::Constant(false),
            BitVector::constant(0, 4).is_nonzero(&mut registry)
        );
    }

    #[test]
    fn test_equals_value() {
        let (mut registry, a, _) = operands(3);
        let equals_five = a.equals_value(5);
        for x in 0..8 {
            assign(&mut registry, 3, x, 0);
            assert_eq!(x == 5, equals_five.evaluate(&mut registry).unwrap());
        }
        assert_eq!(Formula::Constant(false), a.equals_value(8));
    }

    #[test]
    fn test_decode() {
        let a = BitVector::from_literals(&[
            Literal::from((1, true)),
            Literal::from((2, false)),
        ])
        .extended(&[Formula::Constant(true)]);
        let model = Model::new(vec![Literal::from((1, true)), Literal::from((2, true))]);
        assert_eq!(0b101, a.decode(&model).unwrap());
    }

    #[test]
    fn test_decode_compound_bit() {
        let compound = Formula::and(vec![
            Formula::Lit(Literal::from((1, true))),
            Formula::Lit(Literal::from((2, true))),
        ]);
        let a = BitVector::new(vec![Formula::Constant(true), compound]);
        let model = Model::new(vec![Literal::from((1, true)), Literal::from((2, true))]);
        assert_eq!(
            EncodingError::CompoundBit { position: 1 },
            a.decode(&model).unwrap_err()
        );
        let mut registry = Registry::new(2);
        registry.assign(1.into(), true);
        registry.assign(2.into(), true);
        assert_eq!(3, a.evaluate(&mut registry).unwrap());
    }

    #[test]
    fn test_too_wide() {
        let mut registry = Registry::new(0);
        assert_eq!(
            EncodingError::IntegerTooWide { width: 65 },
            BitVector::constant(0, 65)
                .evaluate(&mut registry)
                .unwrap_err()
        );
    }
}
