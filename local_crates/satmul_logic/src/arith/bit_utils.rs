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

/// Returns the number of bits needed to write an unsigned integer (at least 1).
///
/// # Examples
///
/// ```
/// use satmul_logic::bits_required;
///
/// assert_eq!(1, bits_required(0));
/// assert_eq!(1, bits_required(1));
/// assert_eq!(4, bits_required(15));
/// assert_eq!(5, bits_required(16));
/// ```
pub fn bits_required(n: u64) -> usize {
    std::cmp::max(1, (64 - n.leading_zeros()) as usize)
}

/// Returns the smallest power of two greater than or equal to `n` (at least 1).
///
/// # Examples
///
/// ```
/// use satmul_logic::power_of_two;
///
/// assert_eq!(1, power_of_two(0));
/// assert_eq!(4, power_of_two(3));
/// assert_eq!(8, power_of_two(8));
/// ```
pub fn power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}
