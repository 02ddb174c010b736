//! What a night produced: events, investigation results, and the summary
//! handed back to the orchestrator.

use std::collections::BTreeMap;
use std::fmt;

use howl_core::character::{Character, Team};
use howl_core::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

use crate::bonds::BondKind;

/// Why a player died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Killed by a night attack.
    Attacked,
    /// Poisoned.
    Poisoned,
    /// Hit by a last-stand shot.
    Shot,
    /// Named correctly by a bluff-kill.
    Unmasked,
    /// Guessed wrong on a bluff-kill.
    Backfire,
    /// Followed a partner through a bond.
    Bond(BondKind),
}

/// How an attacked player survived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rescue {
    /// Cured by a heal.
    Healed,
    /// Shielded by a protector.
    Protected,
}

/// Something that happened during resolution.
///
/// Public events become the narration in [`ActionResult::messages`]; the rest
/// are kept for the orchestrator only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NightEvent {
    /// A player died.
    Died {
        /// Who died.
        player: PlayerId,
        /// Their display name.
        name: String,
        /// Why.
        cause: DeathCause,
    },
    /// A talisman absorbed an attack and is gone.
    TalismanShattered {
        /// The bearer.
        player: PlayerId,
        /// Their display name.
        name: String,
    },
    /// A shot was fired at someone already dead.
    ShotWasted {
        /// The intended target.
        player: PlayerId,
        /// Their display name.
        name: String,
    },
    /// A player was silenced.
    Silenced {
        /// Who was silenced.
        player: PlayerId,
        /// Their display name.
        name: String,
    },
    /// An attacked player survived. Not narrated.
    Saved {
        /// Who survived.
        player: PlayerId,
        /// What saved them.
        by: Rescue,
    },
    /// A player was infected. Not narrated.
    Infected {
        /// Who was infected.
        player: PlayerId,
    },
    /// A blood bond was sealed. Not narrated.
    BondSealed {
        /// One partner.
        a: PlayerId,
        /// The other partner.
        b: PlayerId,
    },
}

impl NightEvent {
    /// Returns true if this event is announced to the table.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Died { .. }
                | Self::TalismanShattered { .. }
                | Self::ShotWasted { .. }
                | Self::Silenced { .. }
        )
    }
}

impl fmt::Display for NightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Died { name, cause, .. } => match cause {
                DeathCause::Attacked => write!(f, "{name} was killed during the night."),
                DeathCause::Poisoned => write!(f, "{name} died of poison."),
                DeathCause::Shot => write!(f, "{name} was shot."),
                DeathCause::Unmasked => write!(f, "{name} was unmasked and killed."),
                DeathCause::Backfire => write!(f, "{name} guessed wrong and paid with their life."),
                DeathCause::Bond(BondKind::Love) => write!(f, "{name} died of a broken heart."),
                DeathCause::Bond(BondKind::Blood) => {
                    write!(f, "{name} followed their blood-bound partner into death.")
                }
            },
            Self::TalismanShattered { name, .. } => {
                write!(f, "{name}'s talisman shattered, absorbing an attack.")
            }
            Self::ShotWasted { name, .. } => write!(f, "The shot at {name} hit nothing."),
            Self::Silenced { name, .. } => {
                write!(f, "{name} has been silenced and cannot speak today.")
            }
            Self::Saved { player, by } => match by {
                Rescue::Healed => write!(f, "{player} was healed."),
                Rescue::Protected => write!(f, "{player} was protected."),
            },
            Self::Infected { player } => write!(f, "{player} was infected."),
            Self::BondSealed { a, b } => write!(f, "{a} and {b} sealed a blood bond."),
        }
    }
}

/// A private result delivered to one investigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Investigation {
    /// Alignment check: only ever `Good` or `Evil`.
    Alignment {
        /// Who was checked.
        target: PlayerId,
        /// What the investigator learned.
        alignment: Team,
    },
    /// Death audit: the literal role of a dead player.
    Autopsy {
        /// Who was examined.
        target: PlayerId,
        /// Their role at death.
        character: Character,
    },
}

impl Investigation {
    /// The investigated player.
    pub fn target(&self) -> PlayerId {
        match self {
            Self::Alignment { target, .. } | Self::Autopsy { target, .. } => *target,
        }
    }
}

impl fmt::Display for Investigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alignment { target, alignment } => write!(f, "{target} is {alignment}"),
            Self::Autopsy { target, character } => write!(f, "{target} was a {character}"),
        }
    }
}

/// The outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Everyone who died in this pass, without duplicates, in order of death.
    pub dead_players: Vec<PlayerId>,
    /// The full roster with all changes applied.
    pub updated_players: Vec<Player>,
    /// Narration, in the order things happened.
    pub messages: Vec<String>,
    /// Private results keyed by investigator.
    pub investigations: BTreeMap<PlayerId, Investigation>,
    /// Structured record of everything that happened, public or not.
    pub events: Vec<NightEvent>,
    /// Hunters who died in this pass and are owed a last-stand shot.
    pub pending_shots: Vec<PlayerId>,
}

impl ActionResult {
    /// Returns true if nobody died.
    pub fn is_peaceful(&self) -> bool {
        self.dead_players.is_empty()
    }

    /// Events that involve `id`.
    pub fn events_for(&self, id: PlayerId) -> Vec<&NightEvent> {
        self.events
            .iter()
            .filter(|e| match e {
                NightEvent::Died { player, .. }
                | NightEvent::TalismanShattered { player, .. }
                | NightEvent::ShotWasted { player, .. }
                | NightEvent::Silenced { player, .. }
                | NightEvent::Saved { player, .. }
                | NightEvent::Infected { player } => *player == id,
                NightEvent::BondSealed { a, b } => *a == id || *b == id,
            })
            .collect()
    }
}
