// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::iter::FromIterator;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::core::Square;

/// A set of squares, one bit per square index. Every move set the engine hands out is a SquareSet, and so is the
/// occupancy of each color on a `Board`.
///
/// Iteration yields squares in index order: row 0 left to right, then row 1, and so on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

const fn mask(square: Square) -> u64 {
    1u64 << square.0
}

impl SquareSet {
    pub const fn empty() -> SquareSet {
        SquareSet(0)
    }

    pub const fn contains(&self, square: Square) -> bool {
        self.0 & mask(square) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= mask(square);
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !mask(square);
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for SquareSet {
    type Output = SquareSet;

    fn bitor(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: SquareSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = SquareSet;

    fn bitand(self, rhs: SquareSet) -> SquareSet {
        SquareSet(self.0 & rhs.0)
    }
}

impl Not for SquareSet {
    type Output = SquareSet;

    fn not(self) -> SquareSet {
        SquareSet(!self.0)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter { bits: self.0 }
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(SquareSet::empty(), |mut set, sq| {
            set.insert(sq);
            set
        })
    }
}

/// Renders the set as a board diagram, `*` for members, with rank and file labels.
impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let mark = if self.contains(Square::of(row, col)) { '*' } else { '.' };
                write!(f, " {}", mark)?;
            }
            writeln!(f)?;
        }

        write!(f, "  ")?;
        for col in 0..8u8 {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        writeln!(f)
    }
}

/// Iterator over the members of a [`SquareSet`], lowest index first.
pub struct Iter {
    bits: u64,
}

impl Iterator for Iter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(Square(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::core::*;

    #[test]
    fn insert_remove() {
        let mut set = SquareSet::empty();
        assert!(set.is_empty());
        set.insert(D4);
        set.insert(D4);
        assert!(set.contains(D4));
        assert_eq!(1, set.len());
        set.remove(D4);
        assert!(!set.contains(D4));
        assert!(set.is_empty());
    }

    #[test]
    fn iterates_from_row_zero() {
        let set: SquareSet = vec![H1, A8, E4, E5].into_iter().collect();
        let squares: Vec<_> = set.into_iter().collect();
        assert_eq!(vec![A8, E5, E4, H1], squares);
        assert_eq!(4, set.into_iter().len());
    }

    #[test]
    fn operators() {
        let left: SquareSet = vec![A1, B2, C3].into_iter().collect();
        let right: SquareSet = vec![C3, D4].into_iter().collect();
        assert_eq!(4, (left | right).len());
        assert_eq!(vec![C3], (left & right).into_iter().collect::<Vec<_>>());
        assert_eq!(61, (!left).len());

        let mut acc = SquareSet::empty();
        acc |= right;
        assert_eq!(right, acc);
    }

    #[test]
    fn diagram() {
        let set: SquareSet = vec![A8, H1].into_iter().collect();
        let diagram = set.to_string();
        let lines: Vec<_> = diagram.lines().collect();
        assert_eq!(9, lines.len());
        assert_eq!("8  * . . . . . . .", lines[0]);
        assert_eq!("1  . . . . . . . *", lines[7]);
        assert_eq!("   a b c d e f g h", lines[8]);
    }
}
