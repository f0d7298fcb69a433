// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A game session: the board, whose turn it is, and the selection state of the drag-and-drop front end.
//!
//! Every move goes through `Game::attempt_move`, which runs the move through these gates in order:
//!
//!  1. The piece must belong to the side to move.
//!  2. If that side is in check (or always, under `KingSafety::Always`), the move must leave its king unattacked.
//!  3. The destination must be in the piece's move set.
//!
//! A move that passes is committed in one step: any captured piece is removed, the mover is relocated and marked
//! as moved, and the turn flips. A move that fails changes nothing.

use std::fmt;

use thiserror::Error;

use crate::{
    board::{Board, PlacementParseError},
    check,
    config::{GameConfig, KingSafety, Rules},
    core::*,
    error::MoveError,
    movegen,
    tracing::constants,
};

/// Where the player is in the select-then-drop cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting(Square),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate => write!(f, "checkmate"),
        }
    }
}

/// Possible errors that can arise when parsing a `"<placement> <w|b>"` position.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PositionParseError {
    #[error("invalid placement: {0}")]
    Placement(#[from] PlacementParseError),
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    rules: Rules,
    phase: Phase,
}

impl Game {
    /// Starts a game from the standard layout with White to move.
    pub fn new(rules: Rules) -> Game {
        Game::with_board(Board::start_position(), Color::White, rules)
    }

    pub fn with_board(board: Board, turn: Color, rules: Rules) -> Game {
        Game {
            board,
            turn,
            rules,
            phase: Phase::Idle,
        }
    }

    /// Starts a game from a position written as a piece placement followed by the side to move, e.g.
    /// `"4k3/8/8/8/8/8/8/R3K3 w"`. The side to move may be omitted, in which case White moves first.
    pub fn from_fen(fen: &str, rules: Rules) -> Result<Game, PositionParseError> {
        let mut fields = fen.split_whitespace();
        let board = Board::from_placement(fields.next().unwrap_or(""))?;
        let turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(PositionParseError::InvalidSideToMove),
        };

        let rest: Vec<_> = fields.collect();
        if !rest.is_empty() {
            return Err(PositionParseError::TrailingInput(rest.join(" ")));
        }

        Ok(Game::with_board(board, turn, rules))
    }

    pub fn from_config(config: &GameConfig) -> Result<Game, PositionParseError> {
        match config.start {
            Some(ref fen) => Game::from_fen(fen, config.rules),
            None => Ok(Game::new(config.rules)),
        }
    }

    pub fn as_fen(&self) -> String {
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };

        format!("{} {}", self.board.as_placement(), side)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The raw move set of the piece on `sq`, before any turn or king-safety gate.
    pub fn possible_moves(&self, sq: Square) -> SquareSet {
        movegen::possible_moves(&self.board, sq)
    }

    /// The destinations `attempt_move` would accept for the piece on `sq`. Empty if it isn't that piece's turn.
    pub fn legal_moves(&self, sq: Square) -> SquareSet {
        match self.board.piece_at(sq) {
            Some(piece) if piece.color == self.turn => {}
            _ => return SquareSet::empty(),
        }

        if self.king_safety_applies() {
            check::check_resolving_destinations(&self.board, sq)
        } else {
            self.possible_moves(sq)
        }
    }

    pub fn is_in_check(&self) -> bool {
        check::is_in_check(&self.board, self.turn)
    }

    pub fn status(&self) -> GameStatus {
        if !self.is_in_check() {
            GameStatus::InProgress
        } else if check::check_resolving_moves(&self.board, self.turn).is_empty() {
            GameStatus::Checkmate
        } else {
            GameStatus::Check
        }
    }

    fn king_safety_applies(&self) -> bool {
        match self.rules.king_safety {
            KingSafety::Always => true,
            KingSafety::WhenInCheck => self.is_in_check(),
        }
    }
}

//
// The select / drop cycle and move commits.
//

impl Game {
    /// Picks up the piece on `sq`, returning the squares it may be dropped on.
    pub fn select_piece(&mut self, sq: Square) -> Result<SquareSet, MoveError> {
        if self.board.piece_at(sq).is_none() {
            return Err(MoveError::NoPieceAtSource(sq));
        }

        self.phase = Phase::Selecting(sq);
        Ok(self.legal_moves(sq))
    }

    pub fn deselect(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Drops the selected piece on `dest`. The selection is released whether or not the move goes through.
    pub fn drop_selected(&mut self, dest: Square) -> Result<Move, MoveError> {
        let source = match self.phase {
            Phase::Selecting(source) => source,
            Phase::Idle => return Err(MoveError::NothingSelected),
        };

        self.phase = Phase::Idle;
        self.attempt_move(source, dest)
    }

    /// Like `attempt_move`, but takes raw coordinates as they come from a front end.
    pub fn attempt_move_at(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<Move, MoveError> {
        let square = |(row, col): (i32, i32)| {
            Square::try_of(row, col).ok_or(MoveError::OutOfBounds { row, col })
        };

        let source = square(from)?;
        let dest = square(to)?;
        self.attempt_move(source, dest)
    }

    /// Moves the piece on `source` to `dest` if the move passes every gate, and flips the turn.
    pub fn attempt_move(&mut self, source: Square, dest: Square) -> Result<Move, MoveError> {
        let mov = Move::new(source, dest);
        let _span =
            tracing::debug_span!(constants::ATTEMPT_MOVE, mov = %mov, turn = %self.turn).entered();

        let result = self.validate(mov).and_then(|()| self.commit(mov));
        match result {
            Ok(captured) => {
                match captured {
                    Some(piece) => tracing::debug!(
                        event = constants::MOVE_COMMITTED,
                        %mov,
                        captured = %piece,
                        "move committed"
                    ),
                    None => tracing::debug!(event = constants::MOVE_COMMITTED, %mov, "move committed"),
                }
                self.phase = Phase::Idle;
                match self.status() {
                    GameStatus::Check => {
                        tracing::debug!(event = constants::CHECK, side = %self.turn, "check")
                    }
                    GameStatus::Checkmate => {
                        tracing::info!(event = constants::CHECKMATE, side = %self.turn, "checkmate")
                    }
                    GameStatus::InProgress => {}
                }
                Ok(mov)
            }
            Err(err) => {
                tracing::debug!(
                    event = constants::MOVE_REJECTED,
                    %mov,
                    reason = err.reason(),
                    "move rejected"
                );
                Err(err)
            }
        }
    }

    fn validate(&self, mov: Move) -> Result<(), MoveError> {
        let piece = self
            .board
            .piece_at(mov.source())
            .ok_or(MoveError::NoPieceAtSource(mov.source()))?;

        if piece.color != self.turn {
            return Err(MoveError::WrongTurn {
                piece: piece.color,
                turn: self.turn,
            });
        }

        let move_set = self.possible_moves(mov.source());
        if self.king_safety_applies() {
            let resolving = check::check_resolving_destinations(&self.board, mov.source());
            if !resolving.contains(mov.destination()) {
                // Rejected by the king-safety gate; say why as precisely as we can.
                return Err(if move_set.contains(mov.destination()) {
                    MoveError::LeavesKingInCheck(mov)
                } else {
                    MoveError::NotInMoveSet(mov)
                });
            }
        }

        if !move_set.contains(mov.destination()) {
            return Err(MoveError::NotInMoveSet(mov));
        }

        Ok(())
    }

    /// Applies a validated move. The new board is built on the side and swapped in whole.
    fn commit(&mut self, mov: Move) -> Result<Option<Piece>, MoveError> {
        let mut next = self.board;
        let captured = next.remove_piece(mov.destination()).ok();
        let mut piece = next
            .remove_piece(mov.source())
            .map_err(|_| MoveError::NoPieceAtSource(mov.source()))?;
        piece.has_moved = true;
        next.add_piece(mov.destination(), piece)
            .map_err(|_| MoveError::NotInMoveSet(mov))?;

        self.board = next;
        self.turn = self.turn.toggle();
        Ok(captured)
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Rules::default())
    }
}
