// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::sync::LazyLock;

use crate::core::*;

/// The eight squares around a king.
const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The eight L-shaped knight jumps.
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Targets of a leaper from every square, ignoring occupancy. Offsets that leave the board are dropped here, so
/// movegen only has to filter by who stands on the target.
struct LeaperTable {
    table: [SquareSet; 64],
}

impl LeaperTable {
    pub fn new(offsets: &[(i32, i32)]) -> LeaperTable {
        let mut lt = LeaperTable {
            table: [SquareSet::empty(); 64],
        };

        for sq in squares() {
            lt.table[sq.0 as usize] = offsets
                .iter()
                .filter_map(|&(dr, dc)| sq.offset(dr, dc))
                .collect();
        }

        lt
    }

    pub fn attacks(&self, sq: Square) -> SquareSet {
        self.table[sq.0 as usize]
    }
}

struct PawnTable {
    table: [[SquareSet; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[SquareSet::empty(); 2]; 64],
        };

        for sq in squares() {
            for color in colors() {
                let (dr, _) = color.forward().as_vector();
                pt.table[sq.0 as usize][color as usize] = [sq.offset(dr, -1), sq.offset(dr, 1)]
                    .into_iter()
                    .flatten()
                    .collect();
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Square, color: Color) -> SquareSet {
        self.table[sq.0 as usize][color as usize]
    }
}

static KING_TABLE: LazyLock<LeaperTable> = LazyLock::new(|| LeaperTable::new(&KING_OFFSETS));
static KNIGHT_TABLE: LazyLock<LeaperTable> = LazyLock::new(|| LeaperTable::new(&KNIGHT_OFFSETS));
static PAWN_TABLE: LazyLock<PawnTable> = LazyLock::new(PawnTable::new);

/// The two forward diagonals of a pawn of the given color. These are only ever capture targets.
pub fn pawn_attacks(sq: Square, color: Color) -> SquareSet {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_TABLE.attacks(sq)
}

pub fn king_attacks(sq: Square) -> SquareSet {
    KING_TABLE.attacks(sq)
}

/// Walks from `sq` in direction `dir` up to the edge of the board, not including `sq` itself.
pub fn ray(sq: Square, dir: Direction) -> impl Iterator<Item = Square> {
    std::iter::successors(sq.towards(dir), move |&next| next.towards(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_center() {
        let expected: SquareSet = [
            Square::of(6, 5),
            Square::of(6, 3),
            Square::of(2, 5),
            Square::of(2, 3),
            Square::of(5, 6),
            Square::of(5, 2),
            Square::of(3, 6),
            Square::of(3, 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(expected, knight_attacks(Square::of(4, 4)));
    }

    #[test]
    fn knight_corner() {
        let attacks = knight_attacks(A8);
        assert_eq!(2, attacks.len());
        assert!(attacks.contains(B6));
        assert!(attacks.contains(C7));
    }

    #[test]
    fn king_edges() {
        assert_eq!(8, king_attacks(E4).len());
        assert_eq!(5, king_attacks(E1).len());
        assert_eq!(3, king_attacks(H8).len());
    }

    #[test]
    fn pawn_diagonals() {
        let white = pawn_attacks(E2, Color::White);
        assert!(white.contains(D3));
        assert!(white.contains(F3));
        assert_eq!(2, white.len());

        let black = pawn_attacks(A7, Color::Black);
        assert!(black.contains(B6));
        assert_eq!(1, black.len());
    }

    #[test]
    fn ray_stops_at_edge() {
        let squares: Vec<_> = ray(Square::of(4, 4), Direction::North).collect();
        assert_eq!(4, squares.len());
        assert_eq!(Some(&E8), squares.last());
        assert_eq!(0, ray(A8, Direction::NorthWest).count());
        assert_eq!(7, ray(A1, Direction::NorthEast).count());
    }
}
