// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::*;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A move of whatever piece stands on `source` to `destination`.
///
/// Moves don't record what they capture; a move onto an occupied square captures the occupant when it is committed.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move is too short: {0:?}")]
    TooShort(String),
    #[error("invalid square in move: {0}")]
    InvalidSquare(#[from] SquareParseError),
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
        }
    }

    /// Returns the source square of this move.
    pub fn source(self) -> Square {
        self.source
    }

    /// Returns the destination square of this move.
    pub fn destination(self) -> Square {
        self.destination
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses a move written as two concatenated squares, like `e2e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_char_boundary(2) {
            return Err(MoveParseError::TooShort(s.to_owned()));
        }

        let source = s[0..2].parse()?;
        let destination = s[2..4].parse()?;
        Ok(Move::new(source, destination))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!("e2e4", Move::new(E2, E4).to_string());
        assert_eq!("a8h1", format!("{:?}", Move::new(A8, H1)));
    }

    #[test]
    fn parse() {
        let mov: Move = "g1f3".parse().unwrap();
        assert_eq!(G1, mov.source());
        assert_eq!(F3, mov.destination());
    }

    #[test]
    fn parse_bad_square() {
        assert_eq!(
            Err(MoveParseError::InvalidSquare(SquareParseError::InvalidRank(
                '0'
            ))),
            "e0e4".parse::<Move>()
        );
    }

    #[test]
    fn parse_too_short() {
        assert!(matches!(
            "e2e".parse::<Move>(),
            Err(MoveParseError::TooShort(_))
        ));
    }
}
