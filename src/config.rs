// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rule knobs for a game, and the JSON configuration file that carries them.
//!
//! A configuration file looks like this; every field is optional:
//!
//! ```json
//! {
//!     "rules": { "king_safety": "when_in_check" },
//!     "start": "4k3/8/8/8/8/8/8/R3K3 w"
//! }
//! ```

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// When a move must leave the mover's king unattacked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KingSafety {
    /// Only while the mover is in check: the move must resolve the check.
    WhenInCheck,
    /// On every move, so pinned pieces stay pinned and kings can't step into attack.
    Always,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub king_safety: KingSafety,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            king_safety: KingSafety::WhenInCheck,
        }
    }
}

/// Everything needed to start a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: Rules,
    /// Starting position as `"<placement> <w|b>"`. The standard layout with White to move if absent.
    pub start: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<GameConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
        let contents = fs::read_to_string(path)?;
        GameConfig::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(GameConfig::default(), config);
        assert_eq!(KingSafety::WhenInCheck, config.rules.king_safety);
        assert!(config.start.is_none());
    }

    #[test]
    fn full_config() {
        let config = GameConfig::from_json(
            r#"{
                "rules": { "king_safety": "always" },
                "start": "4k3/8/8/8/8/8/8/R3K3 b"
            }"#,
        )
        .unwrap();
        assert_eq!(KingSafety::Always, config.rules.king_safety);
        assert_eq!(Some("4k3/8/8/8/8/8/8/R3K3 b"), config.start.as_deref());
    }

    #[test]
    fn empty_rules_object() {
        let config = GameConfig::from_json(r#"{ "rules": {}, "start": null }"#).unwrap();
        assert_eq!(Rules::default(), config.rules);
        assert!(config.start.is_none());
    }

    #[test]
    fn unknown_rule_value() {
        let err = GameConfig::from_json(r#"{ "rules": { "king_safety": "sometimes" } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file() {
        let err = GameConfig::from_file("/nonexistent/dropchess.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
