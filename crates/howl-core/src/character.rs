use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Faction alignment of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// The village.
    Good,
    /// Wolves, their allies, and the solitary killers.
    Evil,
    /// Unaligned until a copy-ability picks a side.
    Neutral,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Evil => write!(f, "Evil"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A role a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    /// Plain villager with no night action.
    Villager,
    /// Learns the alignment of one player per night.
    Seer,
    /// Learns the exact role of one dead player per night.
    Medium,
    /// Shields one player from attacks each night.
    Guardian,
    /// Cures one player under attack each night.
    Doctor,
    /// Holds both a cure and a poison.
    Witch,
    /// Fires a last-stand shot on death.
    Hunter,
    /// Binds two players as lovers at the start of the game.
    Matchmaker,
    /// Carries a talisman that absorbs one kill attempt.
    TalismanBearer,
    /// Seals a blood bond with another player.
    Bloodbinder,
    /// Silences a player for the following day.
    Silencer,
    /// The standard wolf.
    Werewolf,
    /// A young wolf; hunts with the pack.
    WolfCub,
    /// Pack leader able to kill by naming a victim's role.
    AlphaWolf,
    /// Human secretly allied with the wolves.
    Minion,
    /// Solitary killer who hunts alone.
    SerialKiller,
    /// Solitary infector who spreads a covert plague.
    Plaguebearer,
    /// Copies another player's role at the start of the game.
    Occult,
}

impl Character {
    /// Every character, in display order.
    pub const ALL: [Character; 18] = [
        Self::Villager,
        Self::Seer,
        Self::Medium,
        Self::Guardian,
        Self::Doctor,
        Self::Witch,
        Self::Hunter,
        Self::Matchmaker,
        Self::TalismanBearer,
        Self::Bloodbinder,
        Self::Silencer,
        Self::Werewolf,
        Self::WolfCub,
        Self::AlphaWolf,
        Self::Minion,
        Self::SerialKiller,
        Self::Plaguebearer,
        Self::Occult,
    ];

    /// The team this character plays for.
    pub fn team(self) -> Team {
        match self {
            Self::Werewolf
            | Self::WolfCub
            | Self::AlphaWolf
            | Self::Minion
            | Self::SerialKiller
            | Self::Plaguebearer => Team::Evil,
            Self::Occult => Team::Neutral,
            _ => Team::Good,
        }
    }

    /// Returns true for the wolf-pack roles.
    pub fn is_wolf(self) -> bool {
        matches!(self, Self::Werewolf | Self::WolfCub | Self::AlphaWolf)
    }

    /// Returns true for roles that win with the pack without being wolves.
    pub fn is_wolf_ally(self) -> bool {
        matches!(self, Self::Minion)
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Villager => "Villager",
            Self::Seer => "Seer",
            Self::Medium => "Medium",
            Self::Guardian => "Guardian",
            Self::Doctor => "Doctor",
            Self::Witch => "Witch",
            Self::Hunter => "Hunter",
            Self::Matchmaker => "Matchmaker",
            Self::TalismanBearer => "Talisman Bearer",
            Self::Bloodbinder => "Bloodbinder",
            Self::Silencer => "Silencer",
            Self::Werewolf => "Werewolf",
            Self::WolfCub => "Wolf Cub",
            Self::AlphaWolf => "Alpha Wolf",
            Self::Minion => "Minion",
            Self::SerialKiller => "Serial Killer",
            Self::Plaguebearer => "Plaguebearer",
            Self::Occult => "Occult",
        }
    }

    /// One-line description of what the role does.
    pub fn ability(self) -> &'static str {
        match self {
            Self::Villager => "No night action; votes by day",
            Self::Seer => "Investigate: learns Good or Evil",
            Self::Medium => "Investigate a dead player: learns their role",
            Self::Guardian => "Protect one player from attacks",
            Self::Doctor => "Heal one player under attack",
            Self::Witch => "Heal or poison one player",
            Self::Hunter => "Shoots one player when dying",
            Self::Matchmaker => "Binds two lovers at the start of the game",
            Self::TalismanBearer => "Talisman absorbs the first attack",
            Self::Bloodbinder => "Seals a blood bond with another player",
            Self::Silencer => "Silences one player for the next day",
            Self::Werewolf => "Kills with the pack",
            Self::WolfCub => "Kills with the pack",
            Self::AlphaWolf => "Kills, or guesses a victim's role to bypass protection",
            Self::Minion => "Wins with the wolves",
            Self::SerialKiller => "Kills alone; wins when one other survives",
            Self::Plaguebearer => "Infects; wins when all others are infected",
            Self::Occult => "Copies another player's role",
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Character {
    type Err = CoreError;

    /// Parses a role name case-insensitively, accepting spaces, dashes or
    /// underscores between words ("alpha wolf", "alpha-wolf", "AlphaWolf").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| CoreError::UnknownCharacter(s.to_string()))
    }
}
