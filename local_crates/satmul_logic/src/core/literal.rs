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

/// A variable identifier.
///
/// Identifiers start at 1, as in the DIMACS format.
/// It can be obtained from and converted into `usize`.
///
/// # Examples
///
/// ```
/// use satmul_logic::VarId;
///
/// assert_eq!(1, usize::from(VarId::from(1)))
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(usize);

impl From<usize> for VarId {
    fn from(u: usize) -> Self {
        VarId(u)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// Any allocated variable provides both its literals:
/// the positive one (polarity `true`) and the negative one (polarity `false`).
///
/// # Order
///
/// A total order is imposed on literals:
/// * if variable identifiers are not equal, the same order applies to the literals;
/// * if variable identifiers are equal and polarity are different, the polarity (`bool`) order applies;
/// * if variable identifiers and polarity are equals, the two literals are equal.
///
/// # Examples
///
/// ```
/// use satmul_logic::{VarId, Literal};
///
/// let v = VarId::from(1);
/// let l = Literal::new(v, true);
/// let not_l = Literal::new(v, false);
/// assert_eq!(not_l, l.negate());
/// assert_eq!(-1, not_l.to_dimacs());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Builds a literal from its DIMACS representation.
    ///
    /// Returns `None` for `0`, which is not a literal but a clause terminator.
    ///
    /// # Examples
    ///
    /// ```
    /// use satmul_logic::{VarId, Literal};
    ///
    /// assert_eq!(Some(Literal::new(VarId::from(3), false)), Literal::from_dimacs(-3));
    /// assert_eq!(None, Literal::from_dimacs(0));
    /// ```
    pub fn from_dimacs(value: i32) -> Option<Self> {
        match value {
            0 => None,
            v if v > 0 => Some(Literal(VarId(v as usize), true)),
            v => Some(Literal(VarId(v.unsigned_abs() as usize), false)),
        }
    }

    /// Returns the DIMACS representation of the literal, that is its signed variable index.
    pub fn to_dimacs(&self) -> i32 {
        let index = self.0 .0 as i32;
        if self.1 {
            index
        } else {
            -index
        }
    }

    /// Returns the negation of the literal, as a new `Literal`.
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    /// Checks if a literal is the negation of this literal.
    pub fn is_negation_of(&self, other: &Literal) -> bool {
        self.0 == other.0 && self.1 != other.1
    }

    /// Returns the [`VarId`] of this literal.
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

impl From<(usize, bool)> for Literal {
    fn from(couple: (usize, bool)) -> Self {
        Literal::new(VarId::from(couple.0), couple.1)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
