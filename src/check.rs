// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack and check detection, and filtering moves down to the ones that get a king out of check.
//!
//! A square counts as attacked by a color when it appears in the move set of any piece of that color, exactly as
//! `movegen::possible_moves` computes it.

use crate::board::Board;
use crate::core::*;
use crate::movegen;

/// Returns the squares of every piece of color `by` whose move set contains `target`.
pub fn squares_attacking(board: &Board, target: Square, by: Color) -> SquareSet {
    board
        .pieces(by)
        .into_iter()
        .filter(|&sq| movegen::possible_moves(board, sq).contains(target))
        .collect()
}

pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .into_iter()
        .any(|sq| movegen::possible_moves(board, sq).contains(target))
}

/// Returns whether the king of color `us` is attacked. A board without such a king is never in check.
pub fn is_in_check(board: &Board, us: Color) -> bool {
    if let Some(king) = board.king(us) {
        is_square_attacked(board, king, us.toggle())
    } else {
        false
    }
}

/// Applies `mov` to a scratch copy of the board and tests whether the mover's king is safe afterwards. The board
/// passed in is never modified, so no half-made move is ever visible to anyone else.
pub fn resolves_check(board: &Board, mov: Move) -> bool {
    let us = match board.piece_at(mov.source()) {
        Some(piece) => piece.color,
        None => return false,
    };

    let mut trial = *board;
    let piece = match trial.remove_piece(mov.source()) {
        Ok(piece) => piece,
        Err(_) => return false,
    };

    // empty unless the move is a capture
    trial.remove_piece(mov.destination()).ok();
    if trial.add_piece(mov.destination(), piece).is_err() {
        return false;
    }

    let safe = !is_in_check(&trial, us);
    tracing::trace!(%mov, safe, "check trial");
    safe
}

/// Returns every (piece, destination) pair of color `us` that leaves its king unattacked.
pub fn check_resolving_moves(board: &Board, us: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    movegen::generate_moves(board, us, &mut moves);
    moves.retain(|&mov| resolves_check(board, mov));
    moves
}

/// Returns the destinations of the piece on `sq` that leave its king unattacked.
pub fn check_resolving_destinations(board: &Board, sq: Square) -> SquareSet {
    movegen::possible_moves(board, sq)
        .into_iter()
        .filter(|&dest| resolves_check(board, Move::new(sq, dest)))
        .collect()
}

/// Color `us` is checkmated when it is in check and nothing it can do gets it out.
pub fn is_checkmate(board: &Board, us: Color) -> bool {
    is_in_check(board, us) && check_resolving_moves(board, us).is_empty()
}
