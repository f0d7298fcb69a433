// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text protocol for driving a game, standing in for a drag-and-drop board.
//!
//! Commands:
//!
//! ```text
//! position startpos                  reset to the standard layout, White to move
//! position <placement> <w|b>         reset to the given position
//! select <sq>                        pick up a piece; replies with its legal destinations
//! drop <sq>                          drop the selected piece
//! move <from><to>                    select and drop in one step, e.g. "move e2e4"
//! moves <sq>                         legal destinations of a piece, without selecting it
//! board                              print the board
//! turn                               print the side to move
//! status                             print in_progress, check, or checkmate
//! quit
//! ```
//!
//! A committed move is answered with `ok <move>`, followed by `check` or `checkmate` if the move gave one. A move
//! that the game turns down is answered with `illegal <reason>`.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context};

use crate::{
    config::{GameConfig, Rules},
    core::{Move, Square, SquareSet},
    error::MoveError,
    game::{Game, GameStatus},
};

pub fn run(config: &GameConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(config, stdin.lock(), stdout.lock())
}

/// Reads commands from `reader` until it is exhausted or a `quit` command arrives, writing replies to `writer`.
/// A malformed command is reported on `writer` and does not end the session.
pub fn serve<R: BufRead, W: Write>(config: &GameConfig, reader: R, mut writer: W) -> anyhow::Result<()> {
    let mut session = Session {
        game: Game::from_config(config).context("invalid starting position")?,
        rules: config.rules,
    };

    for maybe_line in reader.lines() {
        let line = maybe_line?;
        let components: Vec<_> = line.split_whitespace().collect();
        let (&command, arguments) = components.split_first().unwrap_or((&"", &[]));
        let result = match (command, arguments) {
            ("", []) => continue,
            ("quit", []) => break,
            ("position", args) => session.handle_position(args),
            ("select", [sq]) => session.handle_select(sq, &mut writer),
            ("drop", [sq]) => session.handle_drop(sq, &mut writer),
            ("move", [mov]) => session.handle_move(mov, &mut writer),
            ("moves", [sq]) => session.handle_moves(sq, &mut writer),
            ("board", []) => write!(writer, "{}", session.game.board()).map_err(Into::into),
            ("turn", []) => writeln!(writer, "{}", session.game.current_turn()).map_err(Into::into),
            ("status", []) => writeln!(writer, "{}", session.game.status()).map_err(Into::into),
            _ => Err(anyhow!("unrecognized command: {} {:?}", command, arguments)),
        };

        if let Err(e) = result {
            tracing::debug!("command failed: {:#}", e);
            writeln!(writer, "error: {:#}", e)?;
        }

        writer.flush()?;
    }

    Ok(())
}

struct Session {
    game: Game,
    rules: Rules,
}

impl Session {
    fn handle_position(&mut self, args: &[&str]) -> anyhow::Result<()> {
        self.game = match args {
            ["startpos"] => Game::new(self.rules),
            [] => bail!("position expected"),
            _ => Game::from_fen(&args.join(" "), self.rules)?,
        };

        Ok(())
    }

    fn handle_select(&mut self, sq: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let sq = parse_square(sq)?;
        match self.game.select_piece(sq) {
            Ok(destinations) => write_squares(out, destinations),
            Err(err) => write_rejection(out, &err),
        }
    }

    fn handle_drop(&mut self, sq: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let sq = parse_square(sq)?;
        let result = self.game.drop_selected(sq);
        self.write_outcome(out, result)
    }

    fn handle_move(&mut self, mov: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let mov: Move = mov.parse().context("invalid move")?;
        let result = self.game.attempt_move(mov.source(), mov.destination());
        self.write_outcome(out, result)
    }

    fn handle_moves(&self, sq: &str, out: &mut impl Write) -> anyhow::Result<()> {
        let sq = parse_square(sq)?;
        write_squares(out, self.game.legal_moves(sq))
    }

    fn write_outcome(
        &self,
        out: &mut impl Write,
        result: Result<Move, MoveError>,
    ) -> anyhow::Result<()> {
        let mov = match result {
            Ok(mov) => mov,
            Err(err) => return write_rejection(out, &err),
        };

        writeln!(out, "ok {}", mov)?;
        match self.game.status() {
            GameStatus::InProgress => {}
            status => writeln!(out, "{}", status)?,
        }
        Ok(())
    }
}

fn parse_square(sq: &str) -> anyhow::Result<Square> {
    sq.parse()
        .with_context(|| format!("invalid square: {}", sq))
}

fn write_squares(out: &mut impl Write, squares: SquareSet) -> anyhow::Result<()> {
    write!(out, "moves")?;
    for sq in squares {
        write!(out, " {}", sq)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_rejection(out: &mut impl Write, err: &MoveError) -> anyhow::Result<()> {
    writeln!(out, "illegal {}", err.reason())?;
    Ok(())
}
