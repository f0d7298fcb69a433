// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. Everything here is pseudo-legal: a generated move never captures a friendly piece, but it may
//! leave the mover's own king attacked. The `check` module is responsible for king safety.
//!
//! Generation reads the board and never writes to it, including the pawn `has_moved` flag.

use crate::board::Board;
use crate::core::*;

/// Pawn moves: one square forward onto an empty square, two squares forward on the first move when both squares
/// are empty, and the forward diagonals only when an enemy piece stands there. Pawns never capture forward.
pub fn pawn_moves(board: &Board, sq: Square, pawn: Piece) -> SquareSet {
    let us = pawn.color;
    let their_pieces = board.pieces(us.toggle());
    let empty_squares = !board.occupied();
    let up = us.forward();

    let mut moves = SquareSet::empty();
    if let Some(single) = sq.towards(up).filter(|&s| empty_squares.contains(s)) {
        moves.insert(single);
        if !pawn.has_moved {
            if let Some(double) = single.towards(up).filter(|&s| empty_squares.contains(s)) {
                moves.insert(double);
            }
        }
    }

    moves | (pawn_attacks(sq, us) & their_pieces)
}

/// Leaper moves: every precomputed target that isn't occupied by one of our own pieces.
pub fn leaper_moves(board: &Board, targets: SquareSet, us: Color) -> SquareSet {
    targets & !board.pieces(us)
}

/// Slider moves along each of `dirs`. A ray stops before a friendly piece and stops on (capturing) an enemy piece.
pub fn slider_moves(board: &Board, sq: Square, us: Color, dirs: &[Direction]) -> SquareSet {
    let mut moves = SquareSet::empty();
    for &dir in dirs {
        for target in ray(sq, dir) {
            match board.piece_at(target) {
                Some(piece) if piece.color == us => break,
                Some(_) => {
                    moves.insert(target);
                    break;
                }
                None => moves.insert(target),
            }
        }
    }

    moves
}

/// Returns every square the piece on `sq` may move to, ignoring king safety. If `sq` is empty, so is the result.
pub fn possible_moves(board: &Board, sq: Square) -> SquareSet {
    let piece = match board.piece_at(sq) {
        Some(piece) => piece,
        None => return SquareSet::empty(),
    };

    let us = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, sq, piece),
        PieceKind::Knight => leaper_moves(board, knight_attacks(sq), us),
        PieceKind::King => leaper_moves(board, king_attacks(sq), us),
        PieceKind::Bishop => slider_moves(board, sq, us, &DIAGONAL),
        PieceKind::Rook => slider_moves(board, sq, us, &ORTHOGONAL),
        PieceKind::Queen => slider_moves(board, sq, us, &ALL_DIRECTIONS),
    }
}

/// Generates every pseudo-legal move for every piece of color `us`.
pub fn generate_moves(board: &Board, us: Color, moves: &mut Vec<Move>) {
    for source in board.pieces(us) {
        for dest in possible_moves(board, source) {
            moves.push(Move::new(source, dest));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{generate_moves, possible_moves};
    use crate::board::Board;
    use crate::core::*;

    fn moves_from(placement: &'static str, sq: Square) -> SquareSet {
        let board = Board::from_placement(placement).unwrap();
        possible_moves(&board, sq)
    }

    fn assert_moves_generated(placement: &'static str, sq: Square, expected: &[Square]) {
        let moves = moves_from(placement, sq);
        let expected: SquareSet = expected.iter().copied().collect();
        if moves != expected {
            println!("{}", Board::from_placement(placement).unwrap());
            println!("generated:\n{}", moves);
            println!("expected:\n{}", expected);
            panic!("move set mismatch for piece on {}", sq);
        }
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(moves_from("8/8/8/8/8/8/8/8", E4).is_empty());
    }

    #[test]
    fn generation_does_not_touch_board() {
        let board = Board::start_position();
        let before = board;
        let mut moves = Vec::new();
        generate_moves(&board, Color::White, &mut moves);
        assert_eq!(before, board);
        assert!(!board.piece_at(E2).unwrap().has_moved);
    }

    #[test]
    fn start_position_move_count() {
        let board = Board::start_position();
        let mut moves = Vec::new();
        generate_moves(&board, Color::White, &mut moves);
        // 16 pawn moves and 4 knight moves.
        assert_eq!(20, moves.len());
        let unique: HashSet<_> = moves.iter().collect();
        assert_eq!(20, unique.len());
        assert!(moves.contains(&Move::new(G1, F3)));
        assert!(moves.contains(&Move::new(E2, E4)));
    }

    mod pawns {
        use super::*;
        use crate::{config::Rules, error::MoveError, game::Game};

        #[test]
        fn white_pawn_first_move() {
            assert_moves_generated(
                "8/8/8/8/8/8/3P4/8",
                Square::of(6, 3),
                &[Square::of(5, 3), Square::of(4, 3)],
            );
        }

        #[test]
        fn white_pawn_capture_diagonal() {
            assert_moves_generated(
                "8/8/8/8/8/4p3/3P4/8",
                Square::of(6, 3),
                &[Square::of(5, 3), Square::of(4, 3), Square::of(5, 4)],
            );
        }

        #[test]
        fn black_pawn_first_move() {
            assert_moves_generated("8/4p3/8/8/8/8/8/8", E7, &[E6, E5]);
        }

        #[test]
        fn moved_pawn_single_step() {
            assert_moves_generated("8/8/8/8/4P3/8/8/8", E4, &[E5]);
        }

        #[test]
        fn no_diagonal_onto_friendly_or_empty() {
            assert_moves_generated("8/8/8/8/8/2N1N3/3P4/8", D2, &[D3, D4]);
        }

        #[test]
        fn no_forward_capture() {
            assert_moves_generated("8/8/8/8/8/3p4/3P4/8", D2, &[]);
        }

        #[test]
        fn double_step_blocked_on_destination() {
            assert_moves_generated("8/8/8/8/3p4/8/3P4/8", D2, &[D3]);
        }

        #[test]
        fn double_step_never_captures_forward() {
            let mut game = Game::from_fen("4k3/8/8/8/3p4/8/3P4/4K3 w", Rules::default()).unwrap();
            assert_eq!(
                Err(MoveError::NotInMoveSet(Move::new(D2, D4))),
                game.attempt_move(D2, D4)
            );
            assert_eq!(Color::Black, game.board().piece_at(D4).unwrap().color);

            // nor onto a friendly piece
            assert_moves_generated("8/8/8/8/3N4/8/3P4/8", D2, &[D3]);
        }

        #[test]
        fn black_pawn_captures_diagonally() {
            assert_moves_generated("8/4p3/3P1n2/8/8/8/8/8", E7, &[E6, E5, D6]);
        }

        #[test]
        fn black_pawn_double_step_blocked() {
            assert_moves_generated("8/4p3/8/4P3/8/8/8/8", E7, &[E6]);
            assert_moves_generated("8/4p3/4P3/8/8/8/8/8", E7, &[]);
        }

        #[test]
        fn pawn_on_last_row_has_no_forward_move() {
            assert_moves_generated("3P4/8/8/8/8/8/8/8", D8, &[]);
        }
    }

    mod leapers {
        use super::*;

        #[test]
        fn knight_center_empty_board() {
            assert_moves_generated(
                "8/8/8/8/4N3/8/8/8",
                Square::of(4, 4),
                &[
                    Square::of(6, 5),
                    Square::of(6, 3),
                    Square::of(2, 5),
                    Square::of(2, 3),
                    Square::of(5, 6),
                    Square::of(5, 2),
                    Square::of(3, 6),
                    Square::of(3, 2),
                ],
            );
        }

        #[test]
        fn knight_jumps_over_and_captures() {
            assert_moves_generated("8/8/8/8/8/8/PPPp4/RN1r4", B1, &[A3, C3, D2]);
        }

        #[test]
        fn knight_capture_enemy_not_friend() {
            assert_moves_generated("8/8/8/8/8/p1P5/8/1N6", B1, &[A3, D2]);
        }

        #[test]
        fn king_corner() {
            assert_moves_generated("8/8/8/8/8/8/8/K7", A1, &[A2, B2, B1]);
        }

        #[test]
        fn king_surrounded() {
            assert_moves_generated("8/8/8/3pPp2/3PKp2/3PPP2/8/8", E4, &[D5, F5, F4]);
        }
    }

    mod sliders {
        use super::*;

        #[test]
        fn bishop_smoke_test() {
            assert_moves_generated(
                "8/8/8/8/3B4/8/8/8",
                D4,
                &[E5, F6, G7, H8, E3, F2, G1, C3, B2, A1, C5, B6, A7],
            );
        }

        #[test]
        fn bishop_captures_stop_ray() {
            assert_moves_generated("8/8/8/2p1p3/3B4/2p1p3/8/8", D4, &[E5, E3, C5, C3]);
        }

        #[test]
        fn rook_blocked_by_friend_exclusive() {
            assert_moves_generated("8/8/8/8/8/8/P7/R1N5", A1, &[B1]);
        }

        #[test]
        fn rook_stops_at_first_enemy_inclusive() {
            assert_moves_generated(
                "r3k3/8/8/8/8/8/8/R7",
                A1,
                &[A2, A3, A4, A5, A6, A7, A8, B1, C1, D1, E1, F1, G1, H1],
            );
        }

        #[test]
        fn rook_never_passes_enemy() {
            let moves = moves_from("8/8/8/8/R1p1p3/8/8/8", A4);
            assert!(moves.contains(B4));
            assert!(moves.contains(C4));
            assert!(!moves.contains(D4));
            assert!(!moves.contains(E4));
        }

        #[test]
        fn queen_is_rook_and_bishop() {
            let board = Board::from_placement("8/1p6/8/3Q2P1/8/8/8/8").unwrap();
            let queen = possible_moves(&board, D5);
            let rook_board = Board::from_placement("8/1p6/8/3R2P1/8/8/8/8").unwrap();
            let bishop_board = Board::from_placement("8/1p6/8/3B2P1/8/8/8/8").unwrap();
            let expected = possible_moves(&rook_board, D5)
                | possible_moves(&bishop_board, D5);
            assert_eq!(expected, queen);
            assert!(queen.contains(B7));
            assert!(!queen.contains(A8));
            assert!(queen.contains(F5));
            assert!(!queen.contains(G5));
        }

        #[test]
        fn slider_rays_never_exceed_seven_squares() {
            let board = Board::from_placement("8/8/8/8/8/8/8/Q7").unwrap();
            let moves = possible_moves(&board, A1);
            assert_eq!(21, moves.len());
        }
    }
}
