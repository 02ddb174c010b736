//! Win-condition evaluation.
//!
//! Endings are checked in a fixed precedence and the first match wins:
//! lone hunter, wolf pack, infector, then the village. A matchmaker override
//! is applied as a second pass once any ending has been found.

use std::fmt;

use howl_core::character::{Character, Team};
use howl_core::player::{Player, PlayerId};
use howl_core::state::GameState;
use serde::{Deserialize, Serialize};

/// Why the game ended, or that it has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryReason {
    /// The serial killer is one of the last two alive.
    LoneHunter,
    /// The wolves match or outnumber everyone else.
    WolfPack,
    /// Every other survivor carries the plague.
    Infection,
    /// Both lovers survived to the end.
    Lovers,
    /// Every killer is dead.
    Village,
    /// Nobody has won yet.
    Ongoing,
}

impl fmt::Display for VictoryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoneHunter => write!(f, "The serial killer stands alone over the village."),
            Self::WolfPack => write!(f, "The wolves have overrun the village."),
            Self::Infection => write!(f, "The plague has claimed every survivor."),
            Self::Lovers => write!(f, "Love conquers all: both lovers live to see the end."),
            Self::Village => write!(f, "The village has rooted out every killer."),
            Self::Ongoing => write!(f, "The game continues."),
        }
    }
}

/// Outcome of a victory check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryResult {
    /// True if the game is over.
    pub has_winner: bool,
    /// Ids of the winning players.
    pub winners: Vec<PlayerId>,
    /// Winning faction, if any.
    pub winning_team: Option<Team>,
    /// What decided it.
    pub reason: VictoryReason,
}

impl VictoryResult {
    /// The game goes on.
    pub fn ongoing() -> Self {
        Self {
            has_winner: false,
            winners: Vec::new(),
            winning_team: None,
            reason: VictoryReason::Ongoing,
        }
    }

    fn win(reason: VictoryReason, team: Team, winners: Vec<PlayerId>) -> Self {
        Self {
            has_winner: true,
            winners,
            winning_team: Some(team),
            reason,
        }
    }
}

/// Decide whether the game is over and who won.
///
/// Pure: reads `state` only. The matchmaker check runs as a second pass: if
/// an ending was found (or `state.is_game_ended` is already set) and both
/// lovers are still alive, the lovers and the matchmaker take the win.
pub fn evaluate_victory(state: &GameState) -> VictoryResult {
    let result = first_ending(&state.players);
    if result.has_winner || state.is_game_ended {
        if let Some(lovers) = lovers_override(&state.players) {
            tracing::info!(reason = ?lovers.reason, "lovers override the ending");
            return lovers;
        }
    }
    if result.has_winner {
        tracing::info!(reason = ?result.reason, winners = result.winners.len(), "game over");
    }
    result
}

fn first_ending(players: &[Player]) -> VictoryResult {
    let alive: Vec<&Player> = players.iter().filter(|p| p.is_alive).collect();
    let living = |c: Character| alive.iter().find(|p| p.character == c);

    // 1. Lone hunter
    if alive.len() == 2 {
        if let Some(killer) = living(Character::SerialKiller) {
            return VictoryResult::win(VictoryReason::LoneHunter, Team::Evil, vec![killer.id]);
        }
    }

    // 2. Wolf pack
    let wolves = alive.iter().filter(|p| p.is_wolf()).count();
    if wolves > 0 && wolves >= alive.len() - wolves {
        let winners = alive
            .iter()
            .filter(|p| p.is_wolf() || p.character.is_wolf_ally())
            .map(|p| p.id)
            .collect();
        return VictoryResult::win(VictoryReason::WolfPack, Team::Evil, winners);
    }

    // 3. Infector
    if let Some(infector) = living(Character::Plaguebearer) {
        let all_infected = alive
            .iter()
            .filter(|p| p.id != infector.id)
            .all(|p| p.is_infected);
        if all_infected {
            return VictoryResult::win(VictoryReason::Infection, Team::Evil, vec![infector.id]);
        }
    }

    // 4. Village
    let killers_remain = alive.iter().any(|p| {
        p.is_wolf() || matches!(p.character, Character::SerialKiller | Character::Plaguebearer)
    });
    if !killers_remain {
        let winners = alive
            .iter()
            .filter(|p| p.team == Team::Good)
            .map(|p| p.id)
            .collect();
        return VictoryResult::win(VictoryReason::Village, Team::Good, winners);
    }

    VictoryResult::ongoing()
}

fn lovers_override(players: &[Player]) -> Option<VictoryResult> {
    let lovers: Vec<&Player> = players
        .iter()
        .filter(|p| p.is_alive && p.is_in_love())
        .collect();
    let [a, b] = lovers.as_slice() else {
        return None;
    };
    if a.love_partner != Some(b.id) || b.love_partner != Some(a.id) {
        return None;
    }
    let mut winners: Vec<PlayerId> = players
        .iter()
        .filter(|p| p.effective_character() == Character::Matchmaker)
        .map(|p| p.id)
        .collect();
    for id in [a.id, b.id] {
        if !winners.contains(&id) {
            winners.push(id);
        }
    }
    Some(VictoryResult::win(VictoryReason::Lovers, Team::Good, winners))
}
