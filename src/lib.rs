// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `dropchess` move engine, at your service!
//!
//! `dropchess` is the rules engine behind a drag-and-drop chess board. It knows where every piece may go, whether a
//! king is in check, which moves get it out, and whose turn it is. It does not render anything; the `protocol`
//! module and the `dropchess` binary drive a game from text commands instead.

pub mod board;
pub mod check;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod tracing;

pub use crate::board::Board;
pub use crate::config::{GameConfig, Rules};
pub use crate::error::MoveError;
pub use crate::game::{Game, GameStatus, Phase};
