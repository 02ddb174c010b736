use std::fmt;

use serde::{Deserialize, Serialize};

use crate::character::{Character, Team};

/// Stable identifier for a seat at the table. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A player and their mutable game status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current role.
    pub character: Character,
    /// Role held before a copy-ability overwrote `character`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_character: Option<Character>,
    /// Alignment, always derived from `character`.
    pub team: Team,
    /// False once the player has died.
    pub is_alive: bool,
    /// Silenced for the current day.
    #[serde(default)]
    pub is_silenced: bool,
    /// Carries the plague. Never cleared.
    #[serde(default)]
    pub is_infected: bool,
    /// Talisman still available to absorb an attack.
    #[serde(default)]
    pub has_protection: bool,
    /// Lover, if the matchmaker paired this player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub love_partner: Option<PlayerId>,
    /// Blood-bond partner, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_bond_partner: Option<PlayerId>,
}

impl Player {
    /// Create a living player with the given role.
    ///
    /// The talisman is handed out here: only a Talisman Bearer starts with one.
    pub fn new(id: PlayerId, name: impl Into<String>, character: Character) -> Self {
        Self {
            id,
            name: name.into(),
            character,
            original_character: None,
            team: character.team(),
            is_alive: true,
            is_silenced: false,
            is_infected: false,
            has_protection: character == Character::TalismanBearer,
            love_partner: None,
            blood_bond_partner: None,
        }
    }

    /// The role that decides which actions this player may take.
    pub fn effective_character(&self) -> Character {
        self.original_character.unwrap_or(self.character)
    }

    /// Replace the current role, keeping the first role in `original_character`
    /// and recomputing the team.
    pub fn set_character(&mut self, character: Character) {
        if self.original_character.is_none() {
            self.original_character = Some(self.character);
        }
        self.character = character;
        self.team = character.team();
    }

    /// Mark the player dead. Returns true if this call caused the death.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.is_alive;
        self.is_alive = false;
        was_alive
    }

    /// Returns true if the matchmaker paired this player with someone.
    pub fn is_in_love(&self) -> bool {
        self.love_partner.is_some()
    }

    /// Returns true if the player currently counts as a wolf.
    pub fn is_wolf(&self) -> bool {
        self.character.is_wolf()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
