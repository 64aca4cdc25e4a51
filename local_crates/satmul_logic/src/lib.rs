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

//! CNF encodings of integer arithmetic circuits.
//!
//! Formulas are built over the free variables of a [`Registry`], which also names the gates
//! (the non-atomic subformulas) with fresh variables.
//! The [`TseitinEncoder`] turns formulas into equisatisfiable sets of clauses,
//! and [`BitVector`] provides two's complement integers made of formulas,
//! with addition, negation and Karatsuba multiplication.
//! The [`FactoringProblem`] puts everything together to reduce the factorization
//! of an integer to a SAT problem.

mod arith;
mod core;
mod errors;
mod io;
mod languages;
mod problems;
mod sat;
mod transformations;

pub use crate::core::Formula;
pub use crate::core::Literal;
pub use crate::core::Registry;
pub use crate::core::VarId;

pub use arith::bits_required;
pub use arith::power_of_two;
pub use arith::BitVector;

pub use errors::EncodingError;
pub use errors::EncodingResult;

pub use io::DimacsInstance;
pub use io::DimacsReader;
pub use io::DimacsWriter;

pub use languages::Clause;
pub use languages::ClauseSet;

pub use problems::FactoringOptions;
pub use problems::FactoringProblem;

pub use sat::default_sat_solver;
pub use sat::CadicalSatSolver;
pub use sat::ConsistencyCheckResult;
pub use sat::Model;
pub use sat::SatSolver;
pub use sat::TseitinEncoder;
pub use sat::MAX_EXPANDED_ARITY;
pub use sat::MAYBE_TIMEOUT_MSG;

pub use transformations::Evaluation;
pub use transformations::Negation;
pub use transformations::Simplification;
