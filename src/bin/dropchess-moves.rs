// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::path::PathBuf;

use dropchess::{core::Square, Game, GameConfig};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Prints the squares the piece on a square may move to.
#[derive(Debug, StructOpt)]
struct Options {
    /// Position to analyze, as a piece placement followed by the side to move.
    #[structopt(name = "POSITION")]
    position: String,
    /// Square holding the piece to move, e.g. "e2".
    #[structopt(name = "SQUARE")]
    square: Square,
    /// JSON file with rule settings.
    #[structopt(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_env_filter(EnvFilter::from_env("DROPCHESS_LOG"))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Options::from_args();
    let rules = match args.config {
        Some(ref path) => GameConfig::from_file(path)?.rules,
        None => Default::default(),
    };

    let game = Game::from_fen(&args.position, rules)?;
    println!("{}", game.board());
    for sq in game.legal_moves(args.square) {
        println!("{}{}", args.square, sq);
    }

    Ok(())
}
