// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{convert::TryFrom, fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("square index out of range: {0}")]
    OutOfRange(u8),
    #[error("invalid file: {0}")]
    InvalidFile(char),
    #[error("invalid rank: {0}")]
    InvalidRank(char),
    #[error("expected two characters, got {0:?}")]
    BadLength(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// Returns whether or not the given coordinates lie on the 8x8 board.
pub const fn in_bounds(row: i32, col: i32) -> bool {
    row >= 0 && row <= 7 && col >= 0 && col <= 7
}

/// A square on the chessboard, addressed by row and column.
///
/// Row 0 is Black's back rank and row 7 is White's back rank. Algebraic names
/// (`e2`, `h8`) are only a display convention: column 0 is the `a` file and
/// row 0 is the eighth rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub(in crate::core) u8);

impl Square {
    /// Creates a new Square at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 8 or more. Use `try_of` for coordinates that may be off the board.
    pub const fn of(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8, "square coordinates out of range");
        Square(row * 8 + col)
    }

    /// Creates a new Square from signed coordinates, if they are on the board.
    pub const fn try_of(row: i32, col: i32) -> Option<Square> {
        if in_bounds(row, col) {
            Some(Square::of(row as u8, col as u8))
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    /// Returns the square `dr` rows and `dc` columns away, or None if that walks off of the board.
    pub const fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        Square::try_of(self.row() as i32 + dr, self.col() as i32 + dc)
    }

    /// Returns the adjacent square in the given direction, if there is one.
    pub const fn towards(self, dir: Direction) -> Option<Square> {
        let (dr, dc) = dir.as_vector();
        self.offset(dr, dc)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 64 {
            return Err(SquareParseError::OutOfRange(value));
        }

        Ok(Square(value))
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<_> = s.chars().collect();
        if chars.len() != 2 {
            return Err(SquareParseError::BadLength(s.to_owned()));
        }

        let col = match chars[0] {
            c @ 'a'..='h' => c as u8 - b'a',
            c => return Err(SquareParseError::InvalidFile(c)),
        };
        let row = match chars[1] {
            c @ '1'..='8' => b'8' - c as u8,
            c => return Err(SquareParseError::InvalidRank(c)),
        };

        Ok(Square::of(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        write!(f, "{}{}", file, rank)
    }
}

pub const A8: Square = Square::of(0, 0);
pub const B8: Square = Square::of(0, 1);
pub const C8: Square = Square::of(0, 2);
pub const D8: Square = Square::of(0, 3);
pub const E8: Square = Square::of(0, 4);
pub const F8: Square = Square::of(0, 5);
pub const G8: Square = Square::of(0, 6);
pub const H8: Square = Square::of(0, 7);
pub const A7: Square = Square::of(1, 0);
pub const B7: Square = Square::of(1, 1);
pub const C7: Square = Square::of(1, 2);
pub const D7: Square = Square::of(1, 3);
pub const E7: Square = Square::of(1, 4);
pub const F7: Square = Square::of(1, 5);
pub const G7: Square = Square::of(1, 6);
pub const H7: Square = Square::of(1, 7);
pub const A6: Square = Square::of(2, 0);
pub const B6: Square = Square::of(2, 1);
pub const C6: Square = Square::of(2, 2);
pub const D6: Square = Square::of(2, 3);
pub const E6: Square = Square::of(2, 4);
pub const F6: Square = Square::of(2, 5);
pub const G6: Square = Square::of(2, 6);
pub const H6: Square = Square::of(2, 7);
pub const A5: Square = Square::of(3, 0);
pub const B5: Square = Square::of(3, 1);
pub const C5: Square = Square::of(3, 2);
pub const D5: Square = Square::of(3, 3);
pub const E5: Square = Square::of(3, 4);
pub const F5: Square = Square::of(3, 5);
pub const G5: Square = Square::of(3, 6);
pub const H5: Square = Square::of(3, 7);
pub const A4: Square = Square::of(4, 0);
pub const B4: Square = Square::of(4, 1);
pub const C4: Square = Square::of(4, 2);
pub const D4: Square = Square::of(4, 3);
pub const E4: Square = Square::of(4, 4);
pub const F4: Square = Square::of(4, 5);
pub const G4: Square = Square::of(4, 6);
pub const H4: Square = Square::of(4, 7);
pub const A3: Square = Square::of(5, 0);
pub const B3: Square = Square::of(5, 1);
pub const C3: Square = Square::of(5, 2);
pub const D3: Square = Square::of(5, 3);
pub const E3: Square = Square::of(5, 4);
pub const F3: Square = Square::of(5, 5);
pub const G3: Square = Square::of(5, 6);
pub const H3: Square = Square::of(5, 7);
pub const A2: Square = Square::of(6, 0);
pub const B2: Square = Square::of(6, 1);
pub const C2: Square = Square::of(6, 2);
pub const D2: Square = Square::of(6, 3);
pub const E2: Square = Square::of(6, 4);
pub const F2: Square = Square::of(6, 5);
pub const G2: Square = Square::of(6, 6);
pub const H2: Square = Square::of(6, 7);
pub const A1: Square = Square::of(7, 0);
pub const B1: Square = Square::of(7, 1);
pub const C1: Square = Square::of(7, 2);
pub const D1: Square = Square::of(7, 3);
pub const E1: Square = Square::of(7, 4);
pub const F1: Square = Square::of(7, 5);
pub const G1: Square = Square::of(7, 6);
pub const H1: Square = Square::of(7, 7);

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row this color's pawns start on.
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The direction this color's pawns advance in.
    pub const fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        write!(f, "{}", c)
    }
}

/// A piece on the board. Pieces keep their identity as they move; `has_moved` starts out false and is set the
/// first time the piece is moved. Only pawns consult it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece {
            color,
            kind,
            has_moved: false,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(PieceParseError::InvalidChar(value)),
        };

        let color = if value.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Ok(Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.kind.to_string();
        match self.color {
            Color::White => write!(f, "{}", c.to_ascii_uppercase()),
            Color::Black => write!(f, "{}", c),
        }
    }
}

/// Compass directions on the board, with North pointing towards row 0 (Black's side).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Returns the (row, column) step for this direction.
    pub const fn as_vector(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

pub const ORTHOGONAL: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

pub const DIAGONAL: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

macro_rules! type_iterator {
    ($name:ident, $type:ident, $max:expr) => {
        pub struct $name(u8, u8);

        impl Iterator for $name {
            type Item = $type;

            fn next(&mut self) -> Option<Self::Item> {
                if self.0 >= self.1 {
                    None
                } else {
                    let next = self.0;
                    self.0 += 1;
                    Some($type(next))
                }
            }
        }

        impl ::std::iter::DoubleEndedIterator for $name {
            fn next_back(&mut self) -> Option<Self::Item> {
                if self.1 <= self.0 {
                    None
                } else {
                    let next = self.1 - 1;
                    self.1 -= 1;
                    Some($type(next))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name(0, $max)
            }
        }
    };
}

type_iterator!(AllSquares, Square, 64);

pub fn squares() -> AllSquares {
    AllSquares::default()
}

pub fn colors() -> ::std::vec::IntoIter<Color> {
    vec![Color::White, Color::Black].into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_matches_board() {
        for row in -3..11 {
            for col in -3..11 {
                let expected = (0..=7).contains(&row) && (0..=7).contains(&col);
                assert_eq!(expected, in_bounds(row, col), "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn square_row_col() {
        let sq = Square::of(6, 3);
        assert_eq!(6, sq.row());
        assert_eq!(3, sq.col());
        assert_eq!(D2, sq);
    }

    #[test]
    #[should_panic(expected = "square coordinates out of range")]
    fn square_of_column_out_of_range() {
        let _ = Square::of(0, std::hint::black_box(9));
    }

    #[test]
    #[should_panic(expected = "square coordinates out of range")]
    fn square_of_row_out_of_range() {
        let _ = Square::of(std::hint::black_box(8), 0);
    }

    #[test]
    fn try_of_rejects_what_of_would_panic_on() {
        assert_eq!(None, Square::try_of(0, 9));
        assert_eq!(None, Square::try_of(8, 0));
        assert_eq!(Some(H1), Square::try_of(7, 7));
    }

    #[test]
    fn square_offset_off_board() {
        assert_eq!(None, A8.offset(-1, 0));
        assert_eq!(None, H1.offset(0, 1));
        assert_eq!(Some(B7), A8.offset(1, 1));
    }

    #[test]
    fn square_towards() {
        assert_eq!(Some(E3), E2.towards(Direction::North));
        assert_eq!(Some(E1), E2.towards(Direction::South));
        assert_eq!(None, A1.towards(Direction::SouthWest));
    }

    #[test]
    fn square_display_and_parse() {
        assert_eq!("e2", E2.to_string());
        assert_eq!("a8", A8.to_string());
        assert_eq!(Ok(H1), "h1".parse::<Square>());
        assert_eq!(
            Err(SquareParseError::InvalidFile('z')),
            "z1".parse::<Square>()
        );
        assert_eq!(
            Err(SquareParseError::InvalidRank('9')),
            "a9".parse::<Square>()
        );
        assert!(matches!(
            "e22".parse::<Square>(),
            Err(SquareParseError::BadLength(_))
        ));
    }

    #[test]
    fn square_try_from_u8() {
        assert_eq!(A8, Square::try_from(0).unwrap());
        assert_eq!(
            SquareParseError::OutOfRange(64),
            Square::try_from(64).unwrap_err()
        );
    }

    #[test]
    fn piece_chars() {
        let piece = Piece::try_from('N').unwrap();
        assert_eq!(Color::White, piece.color);
        assert_eq!(PieceKind::Knight, piece.kind);
        assert!(!piece.has_moved);
        assert_eq!("N", piece.to_string());

        let piece = Piece::try_from('k').unwrap();
        assert_eq!(Color::Black, piece.color);
        assert_eq!(PieceKind::King, piece.kind);
        assert_eq!("k", piece.to_string());

        assert_eq!(
            PieceParseError::InvalidChar('x'),
            Piece::try_from('x').unwrap_err()
        );
    }

    #[test]
    fn pawns_advance_opposite_ways() {
        assert_eq!(Color::White.forward().reverse(), Color::Black.forward());
        assert_eq!(Some(E3), E2.towards(Color::White.forward()));
        assert_eq!(Some(E6), E7.towards(Color::Black.forward()));
    }

    #[test]
    fn squares_iterator() {
        assert_eq!(64, squares().count());
        assert_eq!(Some(H1), squares().next_back());
    }
}
