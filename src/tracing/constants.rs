// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracing constants that are used elsewhere in dropchess.
//!
//! The code in `dropchess::tracing` operates by creating spans and messages with known string values, so that they
//! can be interpreted by `tracing` Layers that are operating upon them. This module collects them all in one place.

/// The name of a span representing one call to `Game::attempt_move`.
pub const ATTEMPT_MOVE: &str = "attempt_move";

/// A move passed every gate and was applied to the board.
pub const MOVE_COMMITTED: &str = "move committed";

/// A move was turned down. The board is unchanged.
pub const MOVE_REJECTED: &str = "move rejected";

/// A committed move left the opponent in check.
pub const CHECK: &str = "check";

/// A committed move left the opponent checkmated.
pub const CHECKMATE: &str = "checkmate";
