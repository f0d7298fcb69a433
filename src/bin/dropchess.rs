// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fs::File, io, path::PathBuf};

use anyhow::Context;
use dropchess::{protocol, tracing::game::GameEventLayer, GameConfig};
use structopt::StructOpt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Plays a game of chess over a line-oriented text protocol on stdin and stdout.
#[derive(Debug, StructOpt)]
struct Options {
    /// JSON file with rule settings and an optional starting position.
    #[structopt(long)]
    config: Option<PathBuf>,
    /// File to write a move event log to.
    #[structopt(long)]
    event_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Options::from_args();
    let event_layer = match args.event_log {
        Some(ref event_log) => {
            let file = File::create(event_log).context("failed to open event log")?;
            Some(GameEventLayer::new(file))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(EnvFilter::from_env("DROPCHESS_LOG")),
        )
        .with(event_layer)
        .init();

    let config = match args.config {
        Some(ref path) => GameConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };

    tracing::info!(rules = ?config.rules, "starting session");
    protocol::run(&config)
}
