use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::roster::Roster;

/// Where the game currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Roles dealt, pairings and copies not yet locked in.
    Setup,
    /// Secret actions are being collected.
    Night,
    /// Discussion and voting.
    Day,
    /// A winner has been declared.
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Night => write!(f, "night"),
            Self::Day => write!(f, "day"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// A value snapshot of the whole game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Every seated player, dead or alive.
    pub players: Roster,
    /// Current night number (0 before the first night).
    pub night: u32,
    /// Current day number (0 before the first day).
    pub day: u32,
    /// Current phase.
    pub phase: Phase,
    /// Set once any ending has been recorded.
    pub is_game_ended: bool,
    /// Ruleset for this game.
    pub config: GameConfig,
}

impl GameState {
    /// A fresh game in the setup phase.
    pub fn new(players: impl Into<Roster>, config: GameConfig) -> Self {
        Self {
            players: players.into(),
            night: 0,
            day: 0,
            phase: Phase::Setup,
            is_game_ended: false,
            config,
        }
    }
}
