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
use thiserror::Error;

/// The errors raised while building formulas, circuits and CNF encodings.
///
/// None of them leaves the [`Registry`](crate::Registry) in an inconsistent state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A gate literal was reached while neither it nor its negation stands for a formula.
    #[error("literal {literal} is neither a free variable nor the literal of a known sub-formula")]
    UndefinedLiteral { literal: Literal },

    /// Two integers of different widths were combined.
    #[error("cannot {operation} integers of different widths ({left} and {right} bits)")]
    WidthMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },

    /// A multiplication was requested on a width that is not a power of two.
    #[error("multiplication requires a power-of-two width, got {width} bit(s)")]
    NotPowerOfTwo { width: usize },

    /// The formula to encode simplified to the constant `false`.
    #[error("the target formula simplifies to false")]
    UnsatisfiableTarget,

    /// A free variable was reached during an evaluation but has no assigned value.
    #[error("variable {var} has no assigned value")]
    UnassignedVariable { var: VarId },

    /// A connective was given an unsupported number of operands.
    #[error("{connective} requires at least {expected} operands, got {actual}")]
    InvalidArity {
        connective: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A gate has too many operands to be expanded by subset enumeration.
    #[error("gate {literal} has {arity} operands, more than the {max} supported by the equivalence expansion")]
    GateTooWide {
        literal: Literal,
        arity: usize,
        max: usize,
    },

    /// An integer is too wide to be decoded into a machine integer.
    #[error("cannot decode a {width}-bit integer into 64 bits")]
    IntegerTooWide { width: usize },

    /// An integer bit is a compound formula where a literal or a constant is expected.
    #[error("bit {position} is neither a literal nor a constant")]
    CompoundBit { position: usize },

    /// A target integer does not fit in the product of the requested factor width.
    #[error("target {target} does not fit in the product of two {factor_width}-bit factors")]
    TargetTooWide { target: u64, factor_width: usize },

    /// The product of two given factors overflows.
    #[error("the product of {p} and {q} does not fit in 64 bits")]
    ProductOverflow { p: u64, q: u64 },
}

/// A shortcut for results whose error type is [`EncodingError`].
pub type EncodingResult<T> = std::result::Result<T, EncodingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            "literal -3 is neither a free variable nor the literal of a known sub-formula",
            format!(
                "{}",
                EncodingError::UndefinedLiteral {
                    literal: Literal::from((3, false))
                }
            )
        );
        assert_eq!(
            "cannot add integers of different widths (2 and 3 bits)",
            format!(
                "{}",
                EncodingError::WidthMismatch {
                    operation: "add",
                    left: 2,
                    right: 3
                }
            )
        );
        assert_eq!(
            "bit 2 is neither a literal nor a constant",
            format!("{}", EncodingError::CompoundBit { position: 2 })
        );
        assert_eq!(
            "variable 4 has no assigned value",
            format!(
                "{}",
                EncodingError::UnassignedVariable { var: 4.into() }
            )
        );
    }

    #[test]
    fn test_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            let result: EncodingResult<()> = Err(EncodingError::UnsatisfiableTarget);
            result?;
            Ok(()) // kcov-ignore
        }
        let err = fails().unwrap_err();
        assert_eq!(
            Some(&EncodingError::UnsatisfiableTarget),
            err.downcast_ref::<EncodingError>()
        );
    }
}
