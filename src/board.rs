// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use thiserror::Error;

use crate::core::{self, *};

/// The board: which piece, if any, stands on each of the 64 squares.
///
/// Each square holds at most one piece. The board does not police how many kings there are; the standard starting
/// position has one of each color and commits never create or destroy kings except by capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// The occupant of each square, indexed by `Square::as_u8`.
    squares: [Option<Piece>; 64],
    /// Squaresets for each color.
    sets_by_color: [SquareSet; 2],
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("square {0} is empty")]
    Empty(Square),
}

impl Board {
    pub fn new() -> Board {
        Board {
            squares: [None; 64],
            sets_by_color: [SquareSet::empty(); 2],
        }
    }

    /// Returns whether or not the given coordinates are on the board.
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        core::in_bounds(row, col)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_u8() as usize]
    }

    pub fn pieces(&self, color: Color) -> SquareSet {
        self.sets_by_color[color as usize]
    }

    pub fn occupied(&self) -> SquareSet {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    /// Iterates over every piece of the given color, along with the square it stands on.
    pub fn pieces_with_squares(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces(color)
            .into_iter()
            .filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces_with_squares(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.piece_at(square).is_some() {
            return Err(BoardError::Occupied(square));
        }

        self.squares[square.as_u8() as usize] = Some(piece);
        self.sets_by_color[piece.color as usize].insert(square);
        Ok(())
    }

    pub fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        let existing_piece = self
            .squares
            .get_mut(square.as_u8() as usize)
            .and_then(Option::take)
            .ok_or(BoardError::Empty(square))?;

        self.sets_by_color[existing_piece.color as usize].remove(square);
        Ok(existing_piece)
    }
}

//
// Piece placement parsing and generation.
//
// Boards are written using the piece-placement field of FEN: rows separated by slashes, starting from row 0 (the
// eighth rank), with digits for runs of empty squares. It's how every test in this crate sets up a position.
//

/// Possible errors that can arise when parsing a piece placement into a `Board`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PlacementParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected EOF while reading")]
    UnexpectedEnd,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("row does not sum to 8")]
    RowDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
}

impl Board {
    pub fn start_position() -> Board {
        let mut board = Board::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (color, back_row) in [(Color::Black, 0), (Color::White, 7)] {
            for (col, &kind) in back_rank.iter().enumerate() {
                board.squares[Square::of(back_row, col as u8).as_u8() as usize] =
                    Some(Piece::new(color, kind));
                board.squares[Square::of(color.pawn_row(), col as u8).as_u8() as usize] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }

        for sq in core::squares() {
            if let Some(piece) = board.piece_at(sq) {
                board.sets_by_color[piece.color as usize].insert(sq);
            }
        }

        board
    }

    /// Constructs a new board from the piece-placement field of a FEN string.
    ///
    /// Pawns found off of their starting row are marked as having moved.
    pub fn from_placement(placement: impl AsRef<str>) -> Result<Board, PlacementParseError> {
        let mut board = Board::new();
        let iter = &mut placement.as_ref().chars().peekable();
        for row in 0..8u8 {
            let mut col = 0;
            while col <= 7 {
                let c = *iter.peek().ok_or(PlacementParseError::UnexpectedEnd)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_ascii_digit() {
                    if !('1'..='8').contains(&c) {
                        return Err(PlacementParseError::InvalidDigit);
                    }

                    col += c as u8 - b'0';
                    if col > 8 {
                        return Err(PlacementParseError::RowDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let mut piece =
                    Piece::try_from(c).map_err(|_| PlacementParseError::UnknownPiece(c))?;
                if piece.kind == PieceKind::Pawn && row != piece.color.pawn_row() {
                    piece.has_moved = true;
                }

                let square = Square::of(row, col);
                board.squares[square.as_u8() as usize] = Some(piece);
                board.sets_by_color[piece.color as usize].insert(square);
                iter.next();
                col += 1;
            }

            if row != 7 {
                match iter.next() {
                    Some('/') => {}
                    Some(c) => return Err(PlacementParseError::UnexpectedChar(c)),
                    None => return Err(PlacementParseError::UnexpectedEnd),
                }
            }
        }

        if let Some(c) = iter.next() {
            return Err(PlacementParseError::UnexpectedChar(c));
        }

        Ok(board)
    }

    pub fn as_placement(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut empty_squares = 0;
            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::of(row, col)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.piece_at(Square::of(row, col)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for col in 0..8u8 {
            write!(f, " {} ", (b'a' + col) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
