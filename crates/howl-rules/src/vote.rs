//! Day vote tallying.

use std::collections::BTreeMap;
use std::fmt;

use howl_core::player::PlayerId;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One voter's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ballot {
    /// Vote to expel a player.
    For(PlayerId),
    /// Vote for no expulsion. Not counted for anyone.
    Abstain,
}

impl fmt::Display for Ballot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::For(id) => write!(f, "{id}"),
            Self::Abstain => write!(f, "abstain"),
        }
    }
}

/// Outcome of a vote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    /// The player chosen for expulsion, if any votes were cast.
    pub winner: Option<PlayerId>,
    /// True if two or more players shared the top count.
    pub tied: bool,
    /// Everyone sharing the top count when tied, sorted by id. Empty otherwise.
    pub tied_players: Vec<PlayerId>,
    /// Votes received per target.
    pub counts: BTreeMap<PlayerId, u32>,
}

/// Count ballots and pick the most-voted player.
///
/// Abstentions are dropped before counting. A tie is broken uniformly at
/// random with `rng`; the result still reports the full tied set.
pub fn tally_votes<R: Rng + ?Sized>(
    votes: &BTreeMap<PlayerId, Ballot>,
    rng: &mut R,
) -> VoteResult {
    let mut counts: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for ballot in votes.values() {
        if let Ballot::For(target) = ballot {
            *counts.entry(*target).or_default() += 1;
        }
    }

    let Some(&max) = counts.values().max() else {
        return VoteResult::default();
    };
    let top: Vec<PlayerId> = counts
        .iter()
        .filter(|&(_, &n)| n == max)
        .map(|(&id, _)| id)
        .collect();

    if let [only] = top.as_slice() {
        return VoteResult {
            winner: Some(*only),
            tied: false,
            tied_players: Vec::new(),
            counts,
        };
    }

    let pick = top[rng.random_range(0..top.len())];
    tracing::debug!(tied = top.len(), winner = %pick, "vote tie broken at random");
    VoteResult {
        winner: Some(pick),
        tied: true,
        tied_players: top,
        counts,
    }
}
