// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

use crate::core::{Color, Move, Square};

/// Reasons a move attempt is turned down. These are ordinary outcomes of a player dragging a piece somewhere it
/// can't go; none of them leave the game changed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("it is {turn}'s turn, not {piece}'s")]
    WrongTurn { piece: Color, turn: Color },
    #[error("{0} is not a move that piece can make")]
    NotInMoveSet(Move),
    #[error("{0} leaves the king in check")]
    LeavesKingInCheck(Move),
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },
    #[error("there is no piece on {0}")]
    NoPieceAtSource(Square),
    #[error("no piece is selected")]
    NothingSelected,
}

impl MoveError {
    /// A short, stable name for this rejection, used in logs and by the text protocol.
    pub fn reason(&self) -> &'static str {
        match self {
            MoveError::WrongTurn { .. } => "wrong_turn",
            MoveError::NotInMoveSet(_) => "not_in_move_set",
            MoveError::LeavesKingInCheck(_) => "leaves_king_in_check",
            MoveError::OutOfBounds { .. } => "out_of_bounds",
            MoveError::NoPieceAtSource(_) => "no_piece_at_source",
            MoveError::NothingSelected => "nothing_selected",
        }
    }
}
